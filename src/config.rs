use serde::Deserialize;
use std::path::Path;

/// Application configuration loaded from environment variables or TOML file.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Analytics view every report is scoped to. Required to build a report engine.
    #[serde(default)]
    pub view_id: Option<String>,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// Settings for the HTTP analytics gateway.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// OAuth bearer token. Acquiring and refreshing it happens outside this service.
    #[serde(default)]
    pub access_token: Option<String>,
    /// Per-request timeout in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

const fn default_port() -> u16 {
    8000
}

fn default_api_base_url() -> String {
    "https://www.googleapis.com/analytics/v3".to_string()
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            view_id: None,
            gateway: GatewayConfig::default(),
        }
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            access_token: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults.
    ///
    /// Environment variables override file values:
    /// - `ANALYTICS_HOST` → host
    /// - `ANALYTICS_PORT` → port
    /// - `ANALYTICS_VIEW_ID` → view_id
    /// - `ANALYTICS_API_BASE_URL` → gateway.api_base_url
    /// - `ANALYTICS_ACCESS_TOKEN` → gateway.access_token
    /// - `ANALYTICS_REQUEST_TIMEOUT` → gateway.timeout_secs
    pub fn load(config_path: Option<&Path>) -> Self {
        let mut config =
            config_path.map_or_else(Self::default, |path| match std::fs::read_to_string(path) {
                Ok(contents) => toml::from_str(&contents).unwrap_or_else(|e| {
                    tracing::warn!("Failed to parse config file: {e}, using defaults");
                    Self::default()
                }),
                Err(e) => {
                    tracing::warn!("Failed to read config file: {e}, using defaults");
                    Self::default()
                }
            });

        if let Ok(host) = std::env::var("ANALYTICS_HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("ANALYTICS_PORT") {
            if let Ok(p) = port.parse() {
                config.port = p;
            }
        }
        if let Ok(view_id) = std::env::var("ANALYTICS_VIEW_ID") {
            config.view_id = Some(view_id);
        }
        if let Ok(url) = std::env::var("ANALYTICS_API_BASE_URL") {
            config.gateway.api_base_url = url;
        }
        if let Ok(token) = std::env::var("ANALYTICS_ACCESS_TOKEN") {
            config.gateway.access_token = Some(token);
        }
        if let Ok(val) = std::env::var("ANALYTICS_REQUEST_TIMEOUT") {
            if let Ok(t) = val.parse() {
                config.gateway.timeout_secs = t;
            }
        }

        config
    }
}
