use crate::adapters::NewsApiClient;
use crate::config::AppConfig;
use crate::core::service::NewsService;
use crate::domain::ports::NewsUpstream;
use crate::presentation::HeadlinesRenderer;
use crate::utils::error::Result;
use std::sync::Arc;

/// Read-only state shared by every handler.
pub struct AppState<U: NewsUpstream> {
    pub config: Arc<AppConfig>,
    pub service: Arc<NewsService<U>>,
    pub renderer: Arc<HeadlinesRenderer>,
}

// 手動實作：U 本身不需要 Clone
impl<U: NewsUpstream> Clone for AppState<U> {
    fn clone(&self) -> Self {
        Self {
            config: Arc::clone(&self.config),
            service: Arc::clone(&self.service),
            renderer: Arc::clone(&self.renderer),
        }
    }
}

impl<U: NewsUpstream> AppState<U> {
    pub fn with_upstream(config: AppConfig, upstream: U) -> Result<Self> {
        let service = NewsService::new(upstream, &config);
        Ok(Self {
            config: Arc::new(config),
            service: Arc::new(service),
            renderer: Arc::new(HeadlinesRenderer::new()?),
        })
    }
}

impl AppState<NewsApiClient> {
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let client = NewsApiClient::new(&config.upstream)?;
        Self::with_upstream(config, client)
    }
}
