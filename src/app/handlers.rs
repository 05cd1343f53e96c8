use crate::app::state::AppState;
use crate::core::service::{KeyCheck, MISSING_KEY_MESSAGE};
use crate::domain::model::{articles_from_payload, HealthReport, KeyStatus, SearchParams};
use crate::domain::ports::NewsUpstream;
use crate::presentation::ViewState;
use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

/// GET /api/news
pub async fn news<U: NewsUpstream + 'static>(
    State(state): State<AppState<U>>,
    Query(params): Query<SearchParams>,
) -> Response {
    match state.service.search(&params).await {
        // 上游內容逐位元組轉發，不重新序列化
        Ok(response) => (
            [(header::CONTENT_TYPE, "application/json")],
            response.raw,
        )
            .into_response(),
        Err(e) => e.into_response(),
    }
}

/// GET /check-key
///
/// Probe outcomes are always 200 with `valid: false`; only a missing
/// credential is a 400.
pub async fn check_key<U: NewsUpstream + 'static>(State(state): State<AppState<U>>) -> Response {
    match state.service.check_key().await {
        KeyCheck::NotConfigured => (
            StatusCode::BAD_REQUEST,
            Json(KeyStatus::invalid(MISSING_KEY_MESSAGE, None)),
        )
            .into_response(),
        KeyCheck::Checked(status) => (StatusCode::OK, Json(status)).into_response(),
    }
}

/// GET /health
pub async fn health<U: NewsUpstream + 'static>(
    State(state): State<AppState<U>>,
) -> Json<HealthReport> {
    Json(HealthReport {
        ok: true,
        pid: std::process::id(),
        port: state.config.server.port,
        newsapi_key_set: state.config.has_api_key(),
    })
}

#[derive(Debug, Default, Deserialize)]
pub struct HeadlinesParams {
    pub q: Option<String>,
    pub country: Option<String>,
    pub nav: Option<String>,
}

/// GET /headlines：伺服器端渲染版本
pub async fn headlines<U: NewsUpstream + 'static>(
    State(state): State<AppState<U>>,
    Query(params): Query<HeadlinesParams>,
) -> Response {
    let mut view = ViewState::default();

    let selected = params
        .nav
        .as_deref()
        .and_then(|n| n.trim().parse::<usize>().ok())
        .and_then(|index| view.select_nav(index));
    let search = match selected {
        Some(search) => search,
        None => view.submit(
            params.q.as_deref().unwrap_or_default(),
            params.country.as_deref().unwrap_or_default(),
        ),
    };

    match state.service.search(&search).await {
        Ok(response) => {
            let articles = response
                .body
                .as_ref()
                .map(articles_from_payload)
                .unwrap_or_default();
            view.complete_ok(articles, Utc::now());
        }
        Err(e) => {
            tracing::warn!("Headlines page fetch failed: {}", e);
            view.complete_err();
        }
    }

    match state.renderer.render(&view, Utc::now()) {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render headlines page: {}", e);
            e.into_response()
        }
    }
}
