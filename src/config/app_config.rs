use std::env;

use reqwest::Client;
use thiserror::Error;
use url::Url;

use super::model::ProberConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in config file")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid base URL `{url}`")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("base URL `{0}` must use http or https")]
    UnsupportedScheme(String),

    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),
}

pub struct AppConfig {
    pub prober: ProberConfig,
    /// Path of the YAML file the configuration was read from, if any.
    pub config_file: Option<String>,
}

/// Load the prober configuration.
/// Starts from the built-in defaults, layers the YAML file named by `CONFIG_FILE` on top when
/// that variable is set, and finally lets `API_URL` override the base URL.
/// A `.env` file in the working directory is honoured for both variables.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        log::debug!("Loaded environment from {}", path.display());
    }

    let config_file = env::var("CONFIG_FILE").ok();
    let contents = match &config_file {
        Some(path) => Some(std::fs::read_to_string(path).map_err(|source| {
            ConfigError::Read {
                path: path.clone(),
                source,
            }
        })?),
        None => None,
    };

    let prober = resolve_config(contents.as_deref(), env::var("API_URL").ok())?;
    log::info!("Using API base URL: {}", prober.base_url);

    Ok(AppConfig {
        prober,
        config_file,
    })
}

/// Merge an optional YAML document and an optional base URL override into a `ProberConfig`.
pub fn resolve_config(
    yaml: Option<&str>,
    api_url: Option<String>,
) -> Result<ProberConfig, ConfigError> {
    let mut config = match yaml {
        Some(contents) => serde_yaml::from_str(contents)?,
        None => ProberConfig::default(),
    };

    if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
        config.base_url = url.trim().to_string();
    }

    Ok(config)
}

/// Parse and check the base URL. Only plain http(s) origins can be probed.
pub fn validate_base_url(base_url: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(base_url).map_err(|source| ConfigError::InvalidBaseUrl {
        url: base_url.to_string(),
        source,
    })?;

    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme(base_url.to_string())),
    }
}

/// Setup the HTTP client shared by all probes.
/// Timeouts are applied per request, since the predict upload needs a longer ceiling than the
/// simple GET probes.
pub fn setup_client(config: &ProberConfig) -> Result<Client, ConfigError> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .build()
        .map_err(ConfigError::Client)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::model::DEFAULT_BASE_URL;

    #[test]
    fn test_no_sources_gives_defaults() {
        let config = resolve_config(None, None).expect("defaults");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.probe_timeout_seconds, 10);
    }

    #[test]
    fn test_api_url_overrides_file() {
        let yaml = "base_url: http://from-file:8000\nprobe_timeout_seconds: 3\n";
        let config = resolve_config(Some(yaml), Some(" http://from-env:9000 ".to_string()))
            .expect("valid config");
        assert_eq!(config.base_url, "http://from-env:9000");
        assert_eq!(config.probe_timeout_seconds, 3);
    }

    #[test]
    fn test_blank_api_url_is_ignored() {
        let config = resolve_config(None, Some("   ".to_string())).expect("defaults");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let result = resolve_config(Some("probe_timeout_seconds: [not, a, number]"), None);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validate_base_url() {
        assert!(validate_base_url("https://cotton-weed-api.onrender.com").is_ok());
        assert!(validate_base_url("http://127.0.0.1:8080").is_ok());
        assert!(matches!(
            validate_base_url("not a url"),
            Err(ConfigError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            validate_base_url("ftp://example.com"),
            Err(ConfigError::UnsupportedScheme(_))
        ));
    }
}
