use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Client configuration from config.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Base URL of the backend, e.g. "https://boards.example.com"
    #[serde(default = "default_url")]
    pub url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            url: default_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_url() -> String {
    "http://localhost:8000".to_string()
}

fn default_timeout() -> u64 {
    10
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UiConfig {
    /// Hex color overrides keyed by theme slot name (e.g. "highlight" = "#FB4196")
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Show key hints in the status row
    #[serde(default)]
    pub show_key_hints: bool,
}

impl ClientConfig {
    /// Parse a config file's contents, tolerating a missing file by using
    /// defaults for everything.
    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = ClientConfig::from_toml("").unwrap();
        assert_eq!(config.server.url, "http://localhost:8000");
        assert_eq!(config.server.timeout_secs, 10);
        assert!(config.ui.colors.is_empty());
    }

    #[test]
    fn partial_config_fills_in() {
        let config = ClientConfig::from_toml(
            r##"
[server]
url = "https://boards.example.com"

[ui.colors]
highlight = "#FF0000"
"##,
        )
        .unwrap();
        assert_eq!(config.server.url, "https://boards.example.com");
        assert_eq!(config.server.timeout_secs, 10);
        assert_eq!(config.ui.colors.get("highlight").unwrap(), "#FF0000");
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(ClientConfig::from_toml("server = [[").is_err());
    }
}
