use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::core::config::BridgeConfig;
use crate::upstream::UpstreamClient;

pub mod error;

use error::InitializationError;

/// Shared state handed to every route.
///
/// The bridge keeps nothing per user: the configuration, one pooled upstream
/// client, and the start time reported by `/health`.
pub struct AppState {
    pub config: Arc<BridgeConfig>,
    pub upstream: UpstreamClient,
    pub started_at: DateTime<Utc>,
}

impl AppState {
    pub fn initialize(config: BridgeConfig) -> Result<Arc<Self>, InitializationError> {
        let upstream =
            UpstreamClient::new(&config.upstream).map_err(InitializationError::Upstream)?;

        tracing::info!(upstream = %upstream.base_url(), "Upstream client ready");

        Ok(Arc::new(Self {
            config: Arc::new(config),
            upstream,
            started_at: Utc::now(),
        }))
    }

    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.started_at).num_seconds().max(0)
    }
}
