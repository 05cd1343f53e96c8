use crate::config::AppConfig;
use crate::utils::error::{ProxyError, Result};
use crate::utils::redact::ApiKey;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub server: Option<ServerSection>,
    pub upstream: Option<UpstreamSection>,
    pub logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub public_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpstreamSection {
    pub base_url: Option<String>,
    pub api_key: Option<String>,
    pub default_page_size: Option<u32>,
    pub max_page_size: Option<u32>,
    pub fallback_query: Option<String>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSection {
    pub verbose: Option<bool>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ProxyError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ProxyError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${NEWSAPI_KEY})；未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ProxyError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 將檔案中出現的欄位覆蓋到現有配置
    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(server) = &self.server {
            if let Some(host) = &server.host {
                config.server.host = host.clone();
            }
            if let Some(port) = server.port {
                config.server.port = port;
            }
            if let Some(public_dir) = &server.public_dir {
                config.server.public_dir = public_dir.clone();
            }
        }

        if let Some(upstream) = &self.upstream {
            if let Some(base_url) = &upstream.base_url {
                config.upstream.base_url = base_url.clone();
            }
            // 未替換的 ${VAR} 佔位符視為沒有金鑰
            if let Some(key) = upstream
                .api_key
                .as_deref()
                .filter(|k| !k.starts_with("${"))
                .and_then(ApiKey::new)
            {
                config.upstream.api_key = Some(key);
            }
            if let Some(size) = upstream.default_page_size {
                config.upstream.default_page_size = size;
            }
            if let Some(size) = upstream.max_page_size {
                config.upstream.max_page_size = size;
            }
            if let Some(fallback) = &upstream.fallback_query {
                config.upstream.fallback_query = fallback.clone();
            }
            if upstream.timeout_seconds.is_some() {
                config.upstream.timeout_seconds = upstream.timeout_seconds;
            }
        }

        if let Some(logging) = &self.logging {
            if let Some(verbose) = logging.verbose {
                config.logging.verbose = verbose;
            }
            if let Some(json) = logging.json {
                config.logging.json = json;
            }
        }
    }
}
