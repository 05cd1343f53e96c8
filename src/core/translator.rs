use crate::domain::model::{Endpoint, SearchParams, SearchRequest, UpstreamRequest};

/// Default and upper bound applied to the inbound `pageSize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageSizePolicy {
    pub default: u32,
    pub max: u32,
}

impl PageSizePolicy {
    pub fn new(default: u32, max: u32) -> Self {
        Self { default, max }
    }

    /// 缺少、非數字、零或負數 → 預設值；超過上限 → 上限
    pub fn resolve(&self, raw: Option<&str>) -> u32 {
        match raw.and_then(leading_integer) {
            Some(n) if n > 0 => n.min(i64::from(self.max)) as u32,
            _ => self.default.min(self.max),
        }
    }
}

/// 讀取開頭的整數（可帶正負號），忽略其後內容："15abc"、"15.7" → 15。
/// 位數過多時飽和，交由上限處理。
fn leading_integer(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let run = &digits[..digits.bytes().take_while(u8::is_ascii_digit).count()];
    if run.is_empty() {
        return None;
    }

    let magnitude = run.bytes().fold(0i64, |acc, b| {
        acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
    });
    Some(if negative { -magnitude } else { magnitude })
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

impl SearchRequest {
    pub fn from_params(params: &SearchParams, policy: &PageSizePolicy) -> Self {
        Self {
            query: non_empty(params.q.as_deref()),
            country: non_empty(params.country.as_deref()),
            page_size: policy.resolve(params.page_size.as_deref()),
        }
    }
}

/// 依優先順序選出唯一的上游資源：
/// 1. 有 country → top-headlines（q 只在非空時附上）
/// 2. 只有 q → everything
/// 3. 兩者皆空 → everything + 預設查詢字
pub fn select_upstream(search: &SearchRequest, fallback_query: &str) -> UpstreamRequest {
    match (&search.country, &search.query) {
        (Some(country), query) => UpstreamRequest {
            endpoint: Endpoint::TopHeadlines,
            query: query.clone(),
            country: Some(country.clone()),
            page_size: search.page_size,
        },
        (None, Some(query)) => UpstreamRequest {
            endpoint: Endpoint::Everything,
            query: Some(query.clone()),
            country: None,
            page_size: search.page_size,
        },
        (None, None) => UpstreamRequest {
            endpoint: Endpoint::Everything,
            query: Some(fallback_query.to_string()),
            country: None,
            page_size: search.page_size,
        },
    }
}
