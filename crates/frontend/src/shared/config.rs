//! Application configuration.
//!
//! Parsed from an embedded TOML document; the backend base URL may be
//! overridden at build time through `PORTAL_API_BASE`.

use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub explore: ExploreConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ApiConfig {
    /// Backend origin without trailing slash; empty means same origin
    pub base_url: String,
    pub request_timeout_ms: u32,
    /// AI answers are generated on demand and take far longer than list calls
    pub ai_timeout_ms: u32,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct ExploreConfig {
    pub page_size: u32,
    pub max_pages: u32,
    /// How many results a single external search request asks for
    pub search_display: u32,
}

/// Default configuration embedded in the bundle
const DEFAULT_CONFIG: &str = r#"
[api]
base_url = "http://localhost:8083"
request_timeout_ms = 10000
ai_timeout_ms = 60000

[explore]
page_size = 5
max_pages = 5
search_display = 20
"#;

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                base_url: "http://localhost:8083".to_string(),
                request_timeout_ms: 10_000,
                ai_timeout_ms: 60_000,
            },
            explore: ExploreConfig {
                page_size: 5,
                max_pages: 5,
                search_display: 20,
            },
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig, toml::de::Error> {
    let mut config: AppConfig = toml::from_str(contents)?;
    config.api.base_url = config.api.base_url.trim_end_matches('/').to_string();
    Ok(config)
}

/// Load the embedded configuration and apply the build-time override
pub fn load_config() -> AppConfig {
    let mut config = match parse_config(DEFAULT_CONFIG) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("Embedded config is invalid, using defaults: {}", e);
            AppConfig::default()
        }
    };
    if let Some(base) = option_env!("PORTAL_API_BASE") {
        config.api.base_url = base.trim_end_matches('/').to_string();
    }
    log::info!("Using backend at '{}'", config.api.base_url);
    config
}
