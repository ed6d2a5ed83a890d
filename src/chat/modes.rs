//! Mode translation: one generic chat request in, one upstream call out.
//!
//! | mode        | endpoint              | history          | context               | sources |
//! |-------------|-----------------------|------------------|-----------------------|---------|
//! | `search`    | `/v1/chunks`          | ignored          | filter iff docs       | n/a     |
//! | `basic`     | `/v1/chat/completions`| last 4 turns     | never                 | never   |
//! | `summarize` | `/v1/completions`     | ignored          | always, filter iff docs | always |
//! | `rag`       | `/v1/chat/completions`| full             | per config, filter iff both | always |
//!
//! No mode streams.

use serde_json::Value;

use super::types::{ChatMode, ChatTurn, Role, UnifiedChatRequest};
use crate::core::errors::ApiError;
use crate::upstream::endpoints;
use crate::upstream::types::{
    ChatCompletionPayload, ChunksPayload, CompletionPayload, ContextFilter, WireMessage,
};

pub const SEARCH_RESULT_LIMIT: u32 = 10;
pub const SEARCH_NEIGHBOR_CHUNKS: u32 = 1;
/// Basic mode keeps this many of the most recent history turns.
pub const BASIC_HISTORY_WINDOW: usize = 4;
pub const SUMMARY_INSTRUCTION: &str =
    "Please provide a comprehensive summary of the following content: ";

/// The upstream call selected for a chat request.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedRequest {
    pub mode: ChatMode,
    pub endpoint: &'static str,
    pub payload: Value,
}

/// Picks the upstream endpoint for `request` and builds its payload.
///
/// `model` is the model name the upstream expects in chat and completion
/// bodies.
pub fn translate(request: UnifiedChatRequest, model: &str) -> Result<TranslatedRequest, ApiError> {
    let mode = request.config.mode;
    let (endpoint, payload) = match mode {
        ChatMode::Search => (endpoints::CHUNKS, to_json(search_payload(request))?),
        ChatMode::Basic => (
            endpoints::CHAT_COMPLETIONS,
            to_json(basic_payload(request, model))?,
        ),
        ChatMode::Summarize => (
            endpoints::COMPLETIONS,
            to_json(summarize_payload(request, model))?,
        ),
        ChatMode::Rag => (
            endpoints::CHAT_COMPLETIONS,
            to_json(rag_payload(request, model))?,
        ),
    };

    Ok(TranslatedRequest {
        mode,
        endpoint,
        payload,
    })
}

fn search_payload(request: UnifiedChatRequest) -> ChunksPayload {
    ChunksPayload {
        context_filter: ContextFilter::for_docs(&request.config.selected_docs),
        text: request.message,
        limit: SEARCH_RESULT_LIMIT,
        prev_next_chunks: SEARCH_NEIGHBOR_CHUNKS,
        stream: false,
    }
}

fn basic_payload(request: UnifiedChatRequest, model: &str) -> ChatCompletionPayload {
    let recent_start = request.history.len().saturating_sub(BASIC_HISTORY_WINDOW);
    let messages = conversation(&request, &request.history[recent_start..]);

    ChatCompletionPayload {
        model: model.to_string(),
        messages,
        use_context: false,
        context_filter: None,
        include_sources: false,
        stream: false,
        max_tokens: request.config.max_tokens,
        temperature: request.config.temperature,
    }
}

fn summarize_payload(request: UnifiedChatRequest, model: &str) -> CompletionPayload {
    CompletionPayload {
        model: model.to_string(),
        prompt: format!("{}{}", SUMMARY_INSTRUCTION, request.message),
        use_context: true,
        context_filter: ContextFilter::for_docs(&request.config.selected_docs),
        include_sources: true,
        stream: false,
        max_tokens: request.config.max_tokens,
        temperature: request.config.temperature,
    }
}

fn rag_payload(request: UnifiedChatRequest, model: &str) -> ChatCompletionPayload {
    let use_context = request.config.use_context;
    let context_filter = if use_context {
        ContextFilter::for_docs(&request.config.selected_docs)
    } else {
        None
    };

    ChatCompletionPayload {
        model: model.to_string(),
        messages: conversation(&request, &request.history),
        use_context,
        context_filter,
        include_sources: true,
        stream: false,
        max_tokens: request.config.max_tokens,
        temperature: request.config.temperature,
    }
}

/// Optional system turn, then `history`, then the new user turn.
fn conversation(request: &UnifiedChatRequest, history: &[ChatTurn]) -> Vec<WireMessage> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    if let Some(system) = request.system_turn() {
        messages.push(system.to_wire());
    }
    messages.extend(history.iter().map(ChatTurn::to_wire));
    messages.push(ChatTurn::new(Role::User, request.message.as_str()).to_wire());
    messages
}

fn to_json<T: serde::Serialize>(payload: T) -> Result<Value, ApiError> {
    serde_json::to_value(payload).map_err(ApiError::internal)
}
