use crate::adapters::NewsApiClient;
use crate::app::handlers;
use crate::app::state::AppState;
use crate::config::AppConfig;
use crate::domain::ports::NewsUpstream;
use crate::utils::error::{ProxyError, Result};
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

pub fn build_router<U: NewsUpstream + 'static>(state: AppState<U>) -> Router {
    // 其他路徑交給靜態檔案（前端 bundle）
    let static_files = ServeDir::new(&state.config.server.public_dir);

    Router::new()
        .route("/api/news", get(handlers::news::<U>))
        .route("/check-key", get(handlers::check_key::<U>))
        .route("/health", get(handlers::health::<U>))
        .route("/headlines", get(handlers::headlines::<U>))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serves on an already bound listener until Ctrl-C.
pub async fn serve_on(listener: TcpListener, config: AppConfig) -> Result<()> {
    let state = AppState::<NewsApiClient>::from_config(config)?;
    let app = build_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ProxyError::ServerError {
            message: e.to_string(),
        })
}

pub async fn serve(mut config: AppConfig) -> Result<()> {
    let listener = TcpListener::bind(config.bind_address()).await?;
    let local_addr = listener.local_addr()?;
    // 以實際綁定的埠回報 /health
    config.server.port = local_addr.port();

    tracing::info!(
        "🚀 Server listening on http://{} (all interfaces when host is 0.0.0.0)",
        local_addr
    );
    tracing::info!("NEWSAPI_KEY set: {}", config.has_api_key());

    serve_on(listener, config).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received, stopping server");
}
