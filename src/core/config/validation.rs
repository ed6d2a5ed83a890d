use std::path::Path;

use reqwest::Url;

use super::service::ConfigError;
use super::settings::BridgeConfig;

pub fn validate_config(config: &BridgeConfig) -> Result<(), ConfigError> {
    validate_upstream_url(&config.upstream.base_url)?;

    if config.upstream.model.trim().is_empty() {
        return Err(invalid("upstream.model must not be empty"));
    }

    let timeouts = &config.upstream.timeouts;
    for (key, value) in [
        ("upstream.timeouts.short_secs", timeouts.short_secs),
        ("upstream.timeouts.medium_secs", timeouts.medium_secs),
        ("upstream.timeouts.long_secs", timeouts.long_secs),
    ] {
        if value == 0 {
            return Err(invalid(format!("{} must be greater than zero", key)));
        }
    }

    if config.uploads.max_bytes == 0 {
        return Err(invalid("uploads.max_bytes must be greater than zero"));
    }

    if config.uploads.allowed_extensions.is_empty() {
        return Err(invalid("uploads.allowed_extensions must not be empty"));
    }
    if let Some(ext) = config
        .uploads
        .allowed_extensions
        .iter()
        .find(|ext| ext.trim().is_empty() || ext.starts_with('.'))
    {
        return Err(invalid(format!(
            "uploads.allowed_extensions entry {:?} must be a bare extension",
            ext
        )));
    }

    let index = config.server.index_file.as_str();
    let is_bare_name = Path::new(index)
        .file_name()
        .and_then(|n| n.to_str())
        .map(|base| base == index)
        .unwrap_or(false);
    if !is_bare_name || index.contains("..") {
        return Err(invalid("server.index_file must be a plain file name"));
    }

    Ok(())
}

fn validate_upstream_url(raw: &str) -> Result<(), ConfigError> {
    let url = Url::parse(raw)
        .map_err(|e| invalid(format!("upstream.base_url {:?} is not a URL: {}", raw, e)))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(invalid(format!(
                "upstream.base_url must use http or https, got {}",
                other
            )))
        }
    }

    if url.host_str().is_none() {
        return Err(invalid("upstream.base_url must include a host"));
    }

    Ok(())
}

fn invalid(message: impl Into<String>) -> ConfigError {
    ConfigError::Invalid(message.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&BridgeConfig::default()).is_ok());
    }

    #[test]
    fn rejects_non_http_upstream() {
        let mut config = BridgeConfig::default();
        config.upstream.base_url = "ftp://localhost:8001".to_string();
        assert!(matches!(
            validate_config(&config),
            Err(ConfigError::Invalid(_))
        ));

        config.upstream.base_url = "localhost:8001".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_zero_timeouts_and_limits() {
        let mut config = BridgeConfig::default();
        config.upstream.timeouts.long_secs = 0;
        assert!(validate_config(&config).is_err());

        let mut config = BridgeConfig::default();
        config.uploads.max_bytes = 0;
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_dotted_or_empty_extensions() {
        let mut config = BridgeConfig::default();
        config.uploads.allowed_extensions = vec![".pdf".to_string()];
        assert!(validate_config(&config).is_err());

        config.uploads.allowed_extensions.clear();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn rejects_index_file_with_directories() {
        let mut config = BridgeConfig::default();
        config.server.index_file = "../index.html".to_string();
        assert!(validate_config(&config).is_err());

        config.server.index_file = "pages/index.html".to_string();
        assert!(validate_config(&config).is_err());
    }
}
