#![allow(dead_code)]

use httpmock::MockServer;
use newsdesk::utils::redact::ApiKey;
use newsdesk::{build_router, AppConfig, AppState, NewsApiClient};
use tokio::net::TcpListener;

pub const TEST_KEY: &str = "test-secret-key";

/// 指向 mock 上游的配置
pub fn config_for(upstream: &MockServer, key: Option<&str>) -> AppConfig {
    let mut config = AppConfig::default();
    config.server.host = "127.0.0.1".to_string();
    config.upstream.base_url = upstream.url("/v2");
    config.upstream.api_key = key.and_then(ApiKey::new);
    config
}

/// 在隨機埠啟動完整路由，回傳 base URL
pub async fn spawn_app(config: AppConfig) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let state = AppState::<NewsApiClient>::from_config(config).unwrap();
    let app = build_router(state);

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}
