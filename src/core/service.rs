use crate::config::AppConfig;
use crate::core::translator::{select_upstream, PageSizePolicy};
use crate::domain::model::{Endpoint, KeyStatus, SearchParams, SearchRequest, UpstreamRequest};
use crate::domain::ports::{NewsUpstream, UpstreamResponse};
use crate::utils::error::{ProxyError, Result};
use crate::utils::redact::REDACTED;
use serde_json::Value;

pub const UNAUTHORIZED_PROBE_MESSAGE: &str = "Unauthorized (401) from NewsAPI";
pub const MISSING_KEY_MESSAGE: &str = "NEWSAPI_KEY not set in environment";

/// Outcome of the credential probe.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyCheck {
    NotConfigured,
    Checked(KeyStatus),
}

/// 請求轉換器：選擇上游資源、發送請求並正規化錯誤
pub struct NewsService<U: NewsUpstream> {
    upstream: U,
    policy: PageSizePolicy,
    fallback_query: String,
}

impl<U: NewsUpstream> NewsService<U> {
    pub fn new(upstream: U, config: &AppConfig) -> Self {
        Self {
            upstream,
            policy: config.page_size_policy(),
            fallback_query: config.upstream.fallback_query.clone(),
        }
    }

    pub fn has_credential(&self) -> bool {
        self.upstream.has_credential()
    }

    pub fn plan(&self, params: &SearchParams) -> UpstreamRequest {
        let search = SearchRequest::from_params(params, &self.policy);
        select_upstream(&search, &self.fallback_query)
    }

    /// 成功時回傳上游回應本身，`raw` 供原樣轉發
    pub async fn search(&self, params: &SearchParams) -> Result<UpstreamResponse> {
        let request = self.plan(params);
        tracing::debug!(
            endpoint = request.endpoint.path(),
            q = ?request.query,
            country = ?request.country,
            page_size = request.page_size,
            api_key = REDACTED,
            "Proxying to NewsAPI"
        );

        let response = match self.upstream.send(&request).await {
            Ok(response) => response,
            Err(e) => {
                log_failure(&request, &e);
                return Err(e);
            }
        };

        if response.is_success() {
            tracing::debug!(status = response.status, "NewsAPI request succeeded");
            return Ok(response);
        }

        let err = normalize_failure(response);
        log_failure(&request, &err);
        Err(err)
    }

    /// 以最小請求確認金鑰是否有效
    pub async fn check_key(&self) -> KeyCheck {
        if !self.upstream.has_credential() {
            return KeyCheck::NotConfigured;
        }

        let probe = UpstreamRequest {
            endpoint: Endpoint::TopHeadlines,
            query: None,
            country: Some("us".to_string()),
            page_size: 1,
        };

        let status = match self.upstream.send(&probe).await {
            Ok(response) if response.status == 200 => KeyStatus::valid(),
            Ok(response) if response.is_success() => KeyStatus {
                valid: false,
                message: None,
                status: Some(response.status),
                details: response.body,
            },
            Ok(response) if response.status == 401 => {
                tracing::warn!("Key check rejected by NewsAPI (401)");
                KeyStatus::invalid(UNAUTHORIZED_PROBE_MESSAGE, response.body)
            }
            Ok(response) => {
                let message = upstream_message(response.status, response.body.as_ref());
                KeyStatus::invalid(message, response.body)
            }
            Err(e) => KeyStatus::invalid(e.to_string(), None),
        };

        KeyCheck::Checked(status)
    }
}

fn upstream_message(status: u16, body: Option<&Value>) -> String {
    body.and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status code {}", status))
}

/// 非 2xx 上游回應 → 對外錯誤；401 獨立處理
pub fn normalize_failure(response: UpstreamResponse) -> ProxyError {
    if response.status == 401 {
        return ProxyError::Unauthorized {
            details: response.body,
        };
    }

    ProxyError::Upstream {
        status: response.status,
        message: upstream_message(response.status, response.body.as_ref()),
        details: response.body,
    }
}

fn log_failure(request: &UpstreamRequest, err: &ProxyError) {
    match err {
        ProxyError::Unauthorized { details } => {
            tracing::error!("NewsAPI unauthorized (401). Check NEWSAPI_KEY in environment.");
            tracing::error!(
                endpoint = request.endpoint.path(),
                q = ?request.query,
                country = ?request.country,
                page_size = request.page_size,
                api_key = REDACTED,
                details = ?details,
                "Rejected NewsAPI request"
            );
        }
        other => {
            tracing::error!(
                endpoint = request.endpoint.path(),
                q = ?request.query,
                country = ?request.country,
                page_size = request.page_size,
                api_key = REDACTED,
                status = other.status_code(),
                details = ?other.details(),
                "Error proxying to NewsAPI: {}",
                other
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    #[derive(Clone)]
    struct MockUpstream {
        reply: Arc<dyn Fn() -> Result<UpstreamResponse> + Send + Sync>,
        seen: Arc<Mutex<Vec<UpstreamRequest>>>,
        credential: bool,
    }

    impl MockUpstream {
        fn replying(status: u16, body: Option<Value>) -> Self {
            Self {
                reply: Arc::new(move || {
                    let raw = body.as_ref().map(Value::to_string).unwrap_or_default();
                    Ok(UpstreamResponse::new(status, raw))
                }),
                seen: Arc::new(Mutex::new(Vec::new())),
                credential: true,
            }
        }

        fn failing() -> Self {
            Self {
                reply: Arc::new(|| {
                    Err(ProxyError::Transport {
                        message: "error sending request".to_string(),
                    })
                }),
                seen: Arc::new(Mutex::new(Vec::new())),
                credential: true,
            }
        }

        fn without_credential(mut self) -> Self {
            self.credential = false;
            self
        }
    }

    #[async_trait]
    impl NewsUpstream for MockUpstream {
        async fn send(&self, request: &UpstreamRequest) -> Result<UpstreamResponse> {
            self.seen.lock().await.push(request.clone());
            (self.reply)()
        }

        fn has_credential(&self) -> bool {
            self.credential
        }
    }

    fn params(q: &str, country: &str) -> SearchParams {
        SearchParams {
            q: Some(q.to_string()),
            country: Some(country.to_string()),
            page_size: None,
        }
    }

    #[tokio::test]
    async fn test_search_returns_upstream_body_verbatim() {
        let body = json!({"status": "ok", "totalResults": 1, "articles": [{"title": "A"}]});
        let upstream = MockUpstream::replying(200, Some(body.clone()));
        let service = NewsService::new(upstream.clone(), &AppConfig::default());

        let result = service.search(&params("", "")).await.unwrap();

        assert_eq!(result.raw, body.to_string());
        assert_eq!(result.body, Some(body));
        let seen = upstream.seen.lock().await;
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].endpoint, Endpoint::Everything);
        assert_eq!(seen[0].query.as_deref(), Some("news"));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_credential_error() {
        let details = json!({"status": "error", "code": "apiKeyInvalid", "message": "Your API key is invalid"});
        let upstream = MockUpstream::replying(401, Some(details.clone()));
        let service = NewsService::new(upstream, &AppConfig::default());

        let err = service.search(&params("rust", "")).await.unwrap_err();

        assert!(matches!(err, ProxyError::Unauthorized { .. }));
        assert_eq!(err.status_code(), 401);
        assert!(err.to_string().contains("NEWSAPI_KEY"));
        assert_eq!(err.details(), Some(&details));
    }

    #[tokio::test]
    async fn test_generic_failure_mirrors_status_and_message() {
        let details = json!({"status": "error", "code": "rateLimited", "message": "Too many requests"});
        let upstream = MockUpstream::replying(429, Some(details.clone()));
        let service = NewsService::new(upstream, &AppConfig::default());

        let err = service.search(&params("rust", "")).await.unwrap_err();

        assert_eq!(err.status_code(), 429);
        assert_eq!(err.to_string(), "Too many requests");
        assert_eq!(err.details(), Some(&details));
    }

    #[tokio::test]
    async fn test_failure_without_message_uses_generic_text() {
        let upstream = MockUpstream::replying(502, None);
        let service = NewsService::new(upstream, &AppConfig::default());

        let err = service.search(&params("rust", "")).await.unwrap_err();

        assert_eq!(err.status_code(), 502);
        assert_eq!(err.to_string(), "Request failed with status code 502");
        assert!(err.details().is_none());
    }

    #[tokio::test]
    async fn test_transport_failure_is_500() {
        let service = NewsService::new(MockUpstream::failing(), &AppConfig::default());

        let err = service.search(&params("rust", "us")).await.unwrap_err();

        assert_eq!(err.status_code(), 500);
        assert!(err.details().is_none());
    }

    #[tokio::test]
    async fn test_check_key_outcomes() {
        let valid = NewsService::new(
            MockUpstream::replying(200, Some(json!({"articles": []}))),
            &AppConfig::default(),
        );
        assert_eq!(valid.check_key().await, KeyCheck::Checked(KeyStatus::valid()));

        let rejected = NewsService::new(
            MockUpstream::replying(401, Some(json!({"code": "apiKeyInvalid"}))),
            &AppConfig::default(),
        );
        match rejected.check_key().await {
            KeyCheck::Checked(status) => {
                assert!(!status.valid);
                assert_eq!(status.message.as_deref(), Some(UNAUTHORIZED_PROBE_MESSAGE));
                assert_eq!(status.details, Some(json!({"code": "apiKeyInvalid"})));
            }
            other => panic!("unexpected {:?}", other),
        }

        let partial = NewsService::new(MockUpstream::replying(204, None), &AppConfig::default());
        match partial.check_key().await {
            KeyCheck::Checked(status) => {
                assert!(!status.valid);
                assert_eq!(status.status, Some(204));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_check_key_without_credential_skips_upstream() {
        let upstream = MockUpstream::replying(200, None).without_credential();
        let service = NewsService::new(upstream.clone(), &AppConfig::default());

        assert_eq!(
            tokio_test::block_on(service.check_key()),
            KeyCheck::NotConfigured
        );
        assert!(tokio_test::block_on(upstream.seen.lock()).is_empty());
    }

    #[tokio::test]
    async fn test_check_key_probe_shape() {
        let upstream = MockUpstream::replying(200, None);
        let service = NewsService::new(upstream.clone(), &AppConfig::default());

        service.check_key().await;

        let seen = upstream.seen.lock().await;
        assert_eq!(seen[0].endpoint, Endpoint::TopHeadlines);
        assert_eq!(seen[0].country.as_deref(), Some("us"));
        assert_eq!(seen[0].page_size, 1);
    }
}
