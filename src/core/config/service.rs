use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::settings::BridgeConfig;
use super::validation::validate_config;

const CONFIG_PATH_ENV: &str = "BRIDGE_CONFIG_PATH";
const DEFAULT_CONFIG_FILE: &str = "bridge.yml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("invalid value for {key}: {value}")]
    InvalidEnv { key: &'static str, value: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Loads the configuration from the YAML file (if any) and the process
/// environment, then validates it.
pub fn load_config() -> Result<BridgeConfig, ConfigError> {
    let path = config_path();
    load_from(path.as_deref(), |key| env::var(key).ok())
}

/// `$BRIDGE_CONFIG_PATH` when set, otherwise `bridge.yml` in the working
/// directory if present.
pub fn config_path() -> Option<PathBuf> {
    if let Ok(path) = env::var(CONFIG_PATH_ENV) {
        return Some(PathBuf::from(path));
    }

    let local = PathBuf::from(DEFAULT_CONFIG_FILE);
    local.exists().then_some(local)
}

pub fn load_from<F>(path: Option<&Path>, lookup: F) -> Result<BridgeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => load_yaml_file(path)?,
        None => BridgeConfig::default(),
    };

    apply_env_overrides(&mut config, &lookup)?;
    validate_config(&config)?;
    Ok(config)
}

fn load_yaml_file(path: &Path) -> Result<BridgeConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if contents.trim().is_empty() {
        return Ok(BridgeConfig::default());
    }

    serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn apply_env_overrides<F>(config: &mut BridgeConfig, lookup: &F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let read = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(url) = read("BRIDGE_UPSTREAM_URL") {
        config.upstream.base_url = url;
    }
    if let Some(host) = read("BRIDGE_HOST") {
        config.server.host = host;
    }

    let port = read("BRIDGE_PORT")
        .map(|value| ("BRIDGE_PORT", value))
        .or_else(|| read("PORT").map(|value| ("PORT", value)));
    if let Some((key, value)) = port {
        config.server.port = value
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidEnv { key, value })?;
    }

    if let Some(dir) = read("BRIDGE_STATIC_DIR") {
        config.server.static_dir = PathBuf::from(dir);
    }
    if let Some(dir) = read("BRIDGE_LOG_DIR") {
        config.logging.dir = Some(PathBuf::from(dir));
    }

    Ok(())
}
