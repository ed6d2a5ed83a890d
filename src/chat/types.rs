use serde::{Deserialize, Deserializer, Serialize};

use crate::upstream::types::WireMessage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// One turn of the conversation history; order is chronological.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn to_wire(&self) -> WireMessage {
        WireMessage {
            role: self.role.as_str().to_string(),
            content: self.content.clone(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    #[default]
    Rag,
    Search,
    Basic,
    Summarize,
}

impl ChatMode {
    /// Unknown or missing labels fall back to `Rag`.
    pub fn parse(value: Option<&str>) -> Self {
        match value
            .map(|v| v.trim().to_lowercase())
            .unwrap_or_default()
            .as_str()
        {
            "search" => ChatMode::Search,
            "basic" => ChatMode::Basic,
            "summarize" => ChatMode::Summarize,
            _ => ChatMode::Rag,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ChatMode::Rag => "rag",
            ChatMode::Search => "search",
            ChatMode::Basic => "basic",
            ChatMode::Summarize => "summarize",
        }
    }
}

impl<'de> Deserialize<'de> for ChatMode {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = Option::<String>::deserialize(deserializer)?;
        Ok(ChatMode::parse(label.as_deref()))
    }
}

/// Per-request mode selection sent by the browser client.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModeConfig {
    #[serde(default)]
    pub mode: ChatMode,
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_context: bool,
    #[serde(default, deserialize_with = "doc_id_set")]
    pub selected_docs: Vec<String>,
    #[serde(default, deserialize_with = "positive_or_none")]
    pub max_tokens: Option<u32>,
    #[serde(default)]
    pub temperature: Option<f64>,
}

/// The single chat request shape the bridge accepts on `/api/chat`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct UnifiedChatRequest {
    pub message: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub config: ModeConfig,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub history: Vec<ChatTurn>,
}

impl UnifiedChatRequest {
    /// The system prompt, if one was given and is not blank.
    pub fn system_turn(&self) -> Option<ChatTurn> {
        self.system_prompt
            .as_deref()
            .filter(|prompt| !prompt.is_empty())
            .map(|prompt| ChatTurn::new(Role::System, prompt))
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// Zero or negative means "not set", the same as omitting the field.
fn positive_or_none<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<i64>::deserialize(deserializer)?
        .filter(|v| *v > 0)
        .map(|v| u32::try_from(v).unwrap_or(u32::MAX)))
}

// Selection is a set: blanks dropped, first occurrence wins.
fn doc_id_set<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<String> = null_as_default(deserializer)?;
    let mut out: Vec<String> = Vec::with_capacity(raw.len());
    for id in raw {
        let id = id.trim();
        if !id.is_empty() && !out.iter().any(|seen| seen == id) {
            out.push(id.to_string());
        }
    }
    Ok(out)
}
