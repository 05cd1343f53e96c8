use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 單次 `/api/news` 呼叫的搜尋條件（已正規化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub country: Option<String>,
    pub page_size: u32,
}

/// Raw query string of `/api/news` and `/headlines`. Every field stays a
/// string so that a non-numeric `pageSize` falls back instead of being
/// rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
    pub country: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    TopHeadlines,
    Everything,
}

impl Endpoint {
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::TopHeadlines => "top-headlines",
            Endpoint::Everything => "everything",
        }
    }
}

/// 上游呼叫：唯一的資源與參數組合
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamRequest {
    pub endpoint: Endpoint,
    pub query: Option<String>,
    pub country: Option<String>,
    pub page_size: u32,
}

impl UpstreamRequest {
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(3);
        if let Some(country) = &self.country {
            pairs.push(("country", country.clone()));
        }
        if let Some(q) = &self.query {
            pairs.push(("q", q.clone()));
        }
        pairs.push(("pageSize", self.page_size.to_string()));
        pairs
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArticleSource {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Upstream article. Never validated; every field may be missing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default, rename = "urlToImage")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source: Option<ArticleSource>,
    #[serde(default)]
    pub published_at: Option<String>,
}

impl Article {
    pub fn source_name(&self) -> Option<&str> {
        self.source.as_ref().and_then(|s| s.name.as_deref())
    }
}

/// 從上游 JSON 取出文章列表；格式不符時回傳空列表
pub fn articles_from_payload(payload: &Value) -> Vec<Article> {
    payload
        .get("articles")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyStatus {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl KeyStatus {
    pub fn valid() -> Self {
        Self {
            valid: true,
            ..Self::default()
        }
    }

    pub fn invalid(message: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
            status: None,
            details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthReport {
    pub ok: bool,
    pub pid: u32,
    pub port: u16,
    pub newsapi_key_set: bool,
}
