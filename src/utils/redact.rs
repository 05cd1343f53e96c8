use std::fmt;

pub const REDACTED: &str = "***";

/// 上游 API 金鑰；Debug / Display 一律遮蔽
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// 空白字串視為未設定
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// 只給 HTTP header 使用，不可寫入日誌或回應
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(REDACTED)
    }
}

/// Removes any occurrence of the secret from free text, e.g. an upstream
/// error message that echoes the key back.
pub fn scrub(text: &str, key: Option<&ApiKey>) -> String {
    match key {
        Some(key) => text.replace(key.expose(), REDACTED),
        None => text.to_string(),
    }
}
