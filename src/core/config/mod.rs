pub mod defaults;
pub mod paths;
pub mod service;
pub mod settings;
pub mod validation;

pub use service::{load_config, ConfigError};
pub use settings::{
    BridgeConfig, LoggingConfig, ServerConfig, TimeoutConfig, UploadConfig, UpstreamConfig,
};
