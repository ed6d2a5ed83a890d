pub mod modes;
pub mod types;

pub use modes::{translate, TranslatedRequest};
pub use types::{ChatMode, ChatTurn, ModeConfig, Role, UnifiedChatRequest};
