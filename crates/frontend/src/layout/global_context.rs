use crate::domain::a001_explore::api::BackendClient;
use crate::domain::a002_ai_search::model::AiSearchClient;
use crate::shared::api_utils::HttpBackend;
use crate::shared::config::AppConfig;
use std::sync::Arc;

/// Application-wide services, provided once through Leptos context
#[derive(Clone)]
pub struct AppGlobalContext {
    pub config: Arc<AppConfig>,
    pub backend: Arc<dyn BackendClient>,
    pub ai: Arc<dyn AiSearchClient>,
}

impl AppGlobalContext {
    pub fn new(config: AppConfig) -> Self {
        let http = Arc::new(HttpBackend::new(config.api.base_url.clone()));
        Self {
            config: Arc::new(config),
            backend: http.clone(),
            ai: http,
        }
    }
}
