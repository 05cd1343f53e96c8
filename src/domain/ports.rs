use crate::domain::model::UpstreamRequest;
use crate::utils::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Raw outcome of one upstream call that reached the server.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    /// 上游回應文字；成功時原樣轉發給呼叫端
    pub raw: String,
    pub body: Option<Value>,
}

impl UpstreamResponse {
    pub fn new(status: u16, raw: String) -> Self {
        let body = parse_body(&raw);
        Self { status, raw, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// JSON 優先；非 JSON 內容保留為字串，空內容視為無
fn parse_body(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string())))
}

#[async_trait]
pub trait NewsUpstream: Send + Sync {
    /// 發送一次上游請求。只有連線層失敗才回傳 `Err`；
    /// 非 2xx 回應以 `UpstreamResponse` 原樣交回。
    async fn send(&self, request: &UpstreamRequest) -> Result<UpstreamResponse>;

    fn has_credential(&self) -> bool;
}
