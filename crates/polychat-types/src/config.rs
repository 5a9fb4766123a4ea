//! Global configuration types for Polychat.
//!
//! `GlobalConfig` represents the top-level `config.toml` that controls
//! the server bind address, the database location, and the checkout
//! collaborator endpoint.

use serde::{Deserialize, Serialize};

/// Top-level configuration for Polychat.
///
/// Loaded from `~/.polychat/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Host the HTTP API binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP API binds to.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Override for the database URL; when absent, the database lives in
    /// the data directory.
    #[serde(default)]
    pub database_url: Option<String>,

    /// URL of the payments platform's create-checkout function.
    /// When absent, `POST /api/checkout` reports the collaborator as
    /// unconfigured.
    #[serde(default)]
    pub checkout_endpoint: Option<String>,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            database_url: None,
            checkout_endpoint: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_config_default_values() {
        let config = GlobalConfig::default();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert!(config.database_url.is_none());
        assert!(config.checkout_endpoint.is_none());
    }

    #[test]
    fn test_global_config_deserialize_with_defaults() {
        let config: GlobalConfig = toml::from_str("").unwrap();
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_global_config_deserialize_with_values() {
        let toml_str = r#"
host = "0.0.0.0"
port = 9090
checkout_endpoint = "https://functions.example.com/create-checkout"
"#;
        let config: GlobalConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 9090);
        assert_eq!(
            config.checkout_endpoint.as_deref(),
            Some("https://functions.example.com/create-checkout")
        );
    }
}
