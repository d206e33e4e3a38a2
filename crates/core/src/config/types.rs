use serde::{Deserialize, Serialize};
use std::net::IpAddr;

/// Root configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    pub places: PlacesConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: IpAddr,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> IpAddr {
    IpAddr::from([0, 0, 0, 0])
}

fn default_port() -> u16 {
    5050
}

/// Places API (New) configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PlacesConfig {
    /// Places API key
    pub api_key: String,
    /// API base URL (default: "https://places.googleapis.com")
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Results requested per upstream call (default: 20, the API maximum)
    #[serde(default = "default_max_result_count")]
    pub max_result_count: u32,
    /// HTTP client timeout in seconds (default: 30)
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u32,
}

impl PlacesConfig {
    /// Config with the given key and every other field defaulted.
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            max_result_count: default_max_result_count(),
            timeout_secs: default_http_timeout(),
        }
    }
}

fn default_base_url() -> String {
    "https://places.googleapis.com".to_string()
}

fn default_max_result_count() -> u32 {
    20
}

fn default_http_timeout() -> u32 {
    30
}

/// How tiled sub-queries are dispatched.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FanOut {
    /// All sub-queries in flight at once.
    #[default]
    Concurrent,
    /// One sub-query at a time, in plan order.
    Sequential,
}

/// What a typed keyword turns into.
#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum KeywordStrategy {
    /// Send the keyword as a free-text search.
    #[default]
    Text,
    /// Map the keyword to place types and run a (possibly tiled) nearby search.
    Categories,
}

/// Search pipeline configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SearchConfig {
    /// Upper bound for each upstream sub-query in seconds (default: 10)
    #[serde(default = "default_sub_query_timeout")]
    pub sub_query_timeout_secs: u64,
    #[serde(default)]
    pub fan_out: FanOut,
    #[serde(default)]
    pub keyword_strategy: KeywordStrategy,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            sub_query_timeout_secs: default_sub_query_timeout(),
            fan_out: FanOut::default(),
            keyword_strategy: KeywordStrategy::default(),
        }
    }
}

fn default_sub_query_timeout() -> u64 {
    10
}

/// Sanitized config for API responses (secrets redacted)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedConfig {
    pub server: ServerConfig,
    pub places: SanitizedPlacesConfig,
    pub search: SearchConfig,
}

/// Sanitized places config (API key hidden)
#[derive(Debug, Clone, Serialize)]
pub struct SanitizedPlacesConfig {
    pub base_url: String,
    pub api_key_configured: bool,
    pub max_result_count: u32,
    pub timeout_secs: u32,
}

impl From<&Config> for SanitizedConfig {
    fn from(config: &Config) -> Self {
        Self {
            server: config.server.clone(),
            places: SanitizedPlacesConfig {
                base_url: config.places.base_url.clone(),
                api_key_configured: !config.places.api_key.trim().is_empty(),
                max_result_count: config.places.max_result_count,
                timeout_secs: config.places.timeout_secs,
            },
            search: config.search.clone(),
        }
    }
}
