use serde_json::Value;
use thiserror::Error;

pub const UNAUTHORIZED_MESSAGE: &str =
    "Unauthorized: invalid NEWSAPI_KEY. Check environment configuration.";

#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("{}", UNAUTHORIZED_MESSAGE)]
    Unauthorized { details: Option<Value> },

    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: Option<Value>,
    },

    #[error("{message}")]
    Transport { message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Server error: {message}")]
    ServerError { message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Credential,
    Upstream,
    Configuration,
    System,
}

impl ProxyError {
    /// 對外回應使用的 HTTP 狀態碼（上游狀態碼直接鏡像）
    pub fn status_code(&self) -> u16 {
        match self {
            ProxyError::Unauthorized { .. } => 401,
            ProxyError::Upstream { status, .. } => *status,
            _ => 500,
        }
    }

    /// 上游原始錯誤內容，用於診斷
    pub fn details(&self) -> Option<&Value> {
        match self {
            ProxyError::Unauthorized { details } | ProxyError::Upstream { details, .. } => {
                details.as_ref()
            }
            _ => None,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ProxyError::Unauthorized { .. } => ErrorCategory::Credential,
            ProxyError::Upstream { .. } | ProxyError::Transport { .. } => ErrorCategory::Upstream,
            ProxyError::ConfigError { .. }
            | ProxyError::ConfigValidationError { .. }
            | ProxyError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            ProxyError::IoError(_) | ProxyError::ServerError { .. } => ErrorCategory::System,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self.category() {
            ErrorCategory::Credential => {
                "The news API rejected the configured credential".to_string()
            }
            ErrorCategory::Upstream => format!("The news API request failed: {}", self),
            ErrorCategory::Configuration => format!("Invalid configuration: {}", self),
            ErrorCategory::System => format!("Internal error: {}", self),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            ProxyError::Unauthorized { .. } => {
                "Export a valid NEWSAPI_KEY (get one at https://newsapi.org) and restart the server"
            }
            ProxyError::Upstream { status: 429, .. } => {
                "The upstream rate limit was reached; wait before sending more requests"
            }
            ProxyError::Upstream { .. } => "Check the query parameters and the upstream status page",
            ProxyError::Transport { .. } => {
                "Check network connectivity and the configured upstream base URL"
            }
            ProxyError::ConfigError { .. }
            | ProxyError::ConfigValidationError { .. }
            | ProxyError::InvalidConfigValueError { .. } => {
                "Fix the configuration file, environment variables or command-line flags"
            }
            ProxyError::IoError(_) => "Check file paths and permissions",
            ProxyError::ServerError { .. } => "Re-run with --verbose and inspect the logs",
        }
    }
}

pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unauthorized_is_distinct_from_generic_failure() {
        let unauthorized = ProxyError::Unauthorized { details: None };
        let generic = ProxyError::Upstream {
            status: 401,
            message: "Request failed with status code 401".to_string(),
            details: None,
        };

        assert_eq!(unauthorized.status_code(), 401);
        assert_ne!(unauthorized.to_string(), generic.to_string());
        assert!(unauthorized.to_string().contains("NEWSAPI_KEY"));
        assert_eq!(unauthorized.category(), ErrorCategory::Credential);
    }

    #[test]
    fn test_upstream_status_is_mirrored() {
        let err = ProxyError::Upstream {
            status: 429,
            message: "rate limited".to_string(),
            details: Some(json!({"code": "rateLimited"})),
        };

        assert_eq!(err.status_code(), 429);
        assert_eq!(err.details(), Some(&json!({"code": "rateLimited"})));
        assert!(err.recovery_suggestion().contains("rate limit"));
    }

    #[test]
    fn test_transport_defaults_to_500() {
        let err = ProxyError::Transport {
            message: "connection refused".to_string(),
        };

        assert_eq!(err.status_code(), 500);
        assert!(err.details().is_none());
        assert_eq!(err.category(), ErrorCategory::Upstream);
    }

    #[test]
    fn test_configuration_errors_share_category_and_suggestion() {
        let errors = [
            ProxyError::ConfigError {
                message: "bad client".to_string(),
            },
            ProxyError::ConfigValidationError {
                field: "toml".to_string(),
                message: "expected table".to_string(),
            },
            ProxyError::InvalidConfigValueError {
                field: "PORT".to_string(),
                value: "eighty".to_string(),
                reason: "invalid digit".to_string(),
            },
        ];

        for err in &errors {
            assert_eq!(err.category(), ErrorCategory::Configuration);
            assert_eq!(err.status_code(), 500);
            assert!(err.user_friendly_message().starts_with("Invalid configuration"));
            assert!(err.recovery_suggestion().contains("configuration file"));
        }
    }
}
