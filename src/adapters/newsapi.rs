use crate::config::UpstreamSettings;
use crate::domain::model::{Endpoint, UpstreamRequest};
use crate::domain::ports::{NewsUpstream, UpstreamResponse};
use crate::utils::error::{ProxyError, Result};
use crate::utils::redact::{scrub, ApiKey};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

pub const API_KEY_HEADER: &str = "X-Api-Key";

/// NewsAPI over HTTP. One pooled client shared by every request.
#[derive(Debug, Clone)]
pub struct NewsApiClient {
    client: Client,
    base_url: String,
    api_key: Option<ApiKey>,
}

impl NewsApiClient {
    pub fn new(settings: &UpstreamSettings) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("newsdesk/", env!("CARGO_PKG_VERSION")));
        if let Some(secs) = settings.timeout_seconds {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().map_err(|e| ProxyError::ConfigError {
            message: format!("failed to build HTTP client: {}", e),
        })?;

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            api_key: settings.api_key.clone(),
        })
    }

    pub fn endpoint_url(&self, endpoint: Endpoint) -> String {
        format!("{}/{}", self.base_url, endpoint.path())
    }
}

#[async_trait]
impl NewsUpstream for NewsApiClient {
    async fn send(&self, request: &UpstreamRequest) -> Result<UpstreamResponse> {
        // 金鑰只放在 header，不進入 URL
        let mut builder = self
            .client
            .get(self.endpoint_url(request.endpoint))
            .query(&request.query_pairs());
        if let Some(key) = &self.api_key {
            builder = builder.header(API_KEY_HEADER, key.expose());
        }

        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let success = response.status().is_success();
        tracing::debug!("NewsAPI response status: {}", status);

        let text = response.text().await.map_err(transport_error)?;
        // 成功內容原樣轉發；錯誤內容會進入日誌與錯誤回應，先遮蔽金鑰
        let text = if success {
            text
        } else {
            scrub(&text, self.api_key.as_ref())
        };

        Ok(UpstreamResponse::new(status, text))
    }

    fn has_credential(&self) -> bool {
        self.api_key.is_some()
    }
}

fn transport_error(e: reqwest::Error) -> ProxyError {
    ProxyError::Transport {
        message: e.without_url().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use httpmock::prelude::*;
    use serde_json::{json, Value};

    fn settings(base_url: String, key: Option<&str>) -> UpstreamSettings {
        let mut upstream = AppConfig::default().upstream;
        upstream.base_url = base_url;
        upstream.api_key = key.and_then(ApiKey::new);
        upstream
    }

    #[tokio::test]
    async fn test_sends_key_as_header_only() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/v2/top-headlines")
                    .query_param("country", "us")
                    .query_param("pageSize", "20")
                    .header("X-Api-Key", "secret-key");
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(json!({"status": "ok", "articles": []}));
            })
            .await;
        let leak_mock = server
            .mock_async(|when, then| {
                when.query_param_exists("apiKey");
                then.status(418);
            })
            .await;

        let client = NewsApiClient::new(&settings(server.url("/v2"), Some("secret-key"))).unwrap();
        let request = UpstreamRequest {
            endpoint: Endpoint::TopHeadlines,
            query: None,
            country: Some("us".to_string()),
            page_size: 20,
        };

        let response = client.send(&request).await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(leak_mock.hits_async().await, 0);
        assert_eq!(response.status, 200);
        assert_eq!(response.body, Some(json!({"status": "ok", "articles": []})));
    }

    #[tokio::test]
    async fn test_non_success_is_returned_not_raised() {
        let server = MockServer::start_async().await;
        let api_mock = server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/everything").query_param("q", "rust");
                then.status(426)
                    .json_body(json!({"status": "error", "code": "parameterInvalid"}));
            })
            .await;

        let client = NewsApiClient::new(&settings(server.url("/v2/"), Some("k"))).unwrap();
        let request = UpstreamRequest {
            endpoint: Endpoint::Everything,
            query: Some("rust".to_string()),
            country: None,
            page_size: 5,
        };

        let response = client.send(&request).await.unwrap();

        api_mock.assert_async().await;
        assert_eq!(response.status, 426);
        assert_eq!(response.body.unwrap()["code"], "parameterInvalid");
    }

    #[tokio::test]
    async fn test_echoed_key_is_scrubbed_from_body() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/everything");
                then.status(401).body("key leaked-key rejected");
            })
            .await;

        let client = NewsApiClient::new(&settings(server.url("/v2"), Some("leaked-key"))).unwrap();
        let request = UpstreamRequest {
            endpoint: Endpoint::Everything,
            query: Some("news".to_string()),
            country: None,
            page_size: 20,
        };

        let response = client.send(&request).await.unwrap();

        assert_eq!(response.body, Some(Value::String("key *** rejected".to_string())));
    }

    #[tokio::test]
    async fn test_connection_failure_is_transport_error() {
        // 沒有服務監聽的埠
        let client = NewsApiClient::new(&settings("http://127.0.0.1:9".to_string(), None)).unwrap();
        let request = UpstreamRequest {
            endpoint: Endpoint::Everything,
            query: Some("news".to_string()),
            country: None,
            page_size: 20,
        };

        let err = client.send(&request).await.unwrap_err();

        assert!(matches!(err, ProxyError::Transport { .. }));
        assert!(!client.has_credential());
    }

    #[tokio::test]
    async fn test_success_text_is_kept_verbatim() {
        let raw = r#"{"status":"ok","totalResults":2,"articles":[{"title":"b","rank":2.50}]}"#;
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v2/everything");
                then.status(200).body(raw);
            })
            .await;

        let client = NewsApiClient::new(&settings(server.url("/v2"), Some("k"))).unwrap();
        let request = UpstreamRequest {
            endpoint: Endpoint::Everything,
            query: Some("news".to_string()),
            country: None,
            page_size: 20,
        };

        let response = client.send(&request).await.unwrap();

        assert_eq!(response.raw, raw);
        assert_eq!(response.body.unwrap()["totalResults"], 2);
    }
}
