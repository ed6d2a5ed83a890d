pub mod chat;
pub mod core;
pub mod files;
pub mod server;
pub mod state;
pub mod upstream;
