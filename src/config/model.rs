use std::time::Duration;

use serde::Deserialize;

/// Base URL of the hosted detection API, used when nothing overrides it.
pub const DEFAULT_BASE_URL: &str = "https://cotton-weed-api.onrender.com";

/// Configuration for the endpoint prober.
/// Every key is optional in a config file; missing keys fall back to the built-in defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct ProberConfig {
    /// The origin all probe paths are resolved against.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Timeout for the simple GET probes (`/health`, `/`, `/test`).
    #[serde(default = "default_probe_timeout_seconds")]
    pub probe_timeout_seconds: u64,

    /// Timeout for the `/predict` upload. Inference is slow, so this is much longer.
    #[serde(default = "default_predict_timeout_seconds")]
    pub predict_timeout_seconds: u64,

    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ProberConfig {
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_seconds)
    }

    pub fn predict_timeout(&self) -> Duration {
        Duration::from_secs(self.predict_timeout_seconds)
    }
}

impl Default for ProberConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            probe_timeout_seconds: default_probe_timeout_seconds(),
            predict_timeout_seconds: default_predict_timeout_seconds(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_probe_timeout_seconds() -> u64 {
    10
}

fn default_predict_timeout_seconds() -> u64 {
    60
}

fn default_user_agent() -> String {
    format!("inferprobe/{}", env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
pub mod test {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProberConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.probe_timeout(), Duration::from_secs(10));
        assert_eq!(config.predict_timeout(), Duration::from_secs(60));
        assert!(config.user_agent.starts_with("inferprobe/"));
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = r#"
                    base_url: http://localhost:8000
                    predict_timeout_seconds: 120
                    "#;

        let config: ProberConfig = serde_yaml::from_str(yaml).expect("Invalid YAML");
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.predict_timeout_seconds, 120);
        // untouched keys fall back
        assert_eq!(config.probe_timeout_seconds, 10);
        assert!(config.user_agent.starts_with("inferprobe/"));
    }

    #[test]
    fn test_empty_mapping_is_all_defaults() {
        let config: ProberConfig = serde_yaml::from_str("{}").expect("Invalid YAML");
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.predict_timeout_seconds, 60);
    }
}
