use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::*;

/// Process-wide bridge configuration.
///
/// Built once at startup and shared read-only through `Arc`; nothing mutates
/// it afterwards.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    pub server: ServerConfig,
    pub upstream: UpstreamConfig,
    pub uploads: UploadConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: PathBuf,
    pub index_file: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
            index_file: DEFAULT_INDEX_FILE.to_string(),
        }
    }
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn index_path(&self) -> PathBuf {
        self.static_dir.join(&self.index_file)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UpstreamConfig {
    pub base_url: String,
    /// Model name sent in chat and completion payloads.
    pub model: String,
    pub timeouts: TimeoutConfig,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            model: DEFAULT_UPSTREAM_MODEL.to_string(),
            timeouts: TimeoutConfig::default(),
        }
    }
}

/// Per-call ceilings, picked by how heavy the upstream operation is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Listing, deleting, health.
    pub short_secs: u64,
    /// Uploads and embeddings.
    pub medium_secs: u64,
    /// Chat, completion, chunk retrieval and raw proxying.
    pub long_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            short_secs: DEFAULT_SHORT_TIMEOUT_SECS,
            medium_secs: DEFAULT_MEDIUM_TIMEOUT_SECS,
            long_secs: DEFAULT_LONG_TIMEOUT_SECS,
        }
    }
}

impl TimeoutConfig {
    pub fn short(&self) -> Duration {
        Duration::from_secs(self.short_secs)
    }

    pub fn medium(&self) -> Duration {
        Duration::from_secs(self.medium_secs)
    }

    pub fn long(&self) -> Duration {
        Duration::from_secs(self.long_secs)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    pub max_bytes: usize,
    /// Lowercase extensions without the leading dot.
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Directory for the rolling log file. `None` disables file logging.
    pub dir: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            dir: Some(PathBuf::from(DEFAULT_LOG_DIR)),
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}
