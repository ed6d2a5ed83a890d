use std::fs;
use std::path::Path;

use super::settings::BridgeConfig;

/// Creates the static asset and log directories if they are missing.
///
/// Failures are logged and otherwise ignored: a missing static directory
/// only means the UI answers 404, and file logging falls back to stdout.
pub fn prepare_directories(config: &BridgeConfig) {
    ensure_dir(&config.server.static_dir, "static");
    if let Some(log_dir) = &config.logging.dir {
        ensure_dir(log_dir, "log");
    }
}

fn ensure_dir(dir: &Path, label: &str) {
    if dir.is_dir() {
        return;
    }

    tracing::warn!("{} directory {} not found, creating it", label, dir.display());
    if let Err(err) = fs::create_dir_all(dir) {
        tracing::warn!(
            "Failed to create {} directory {}: {}",
            label,
            dir.display(),
            err
        );
    }
}
