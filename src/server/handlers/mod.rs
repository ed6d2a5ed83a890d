pub mod chat;
pub mod embeddings;
pub mod files;
pub mod health;
pub mod proxy;
pub mod static_files;
pub mod upload;
pub mod utils;
