#[cfg(feature = "cli")]
pub mod cli;
pub mod env;
pub mod toml_config;

use crate::core::translator::PageSizePolicy;
use crate::utils::error::Result;
use crate::utils::redact::ApiKey;
use crate::utils::validation::{self, Validate};
use std::path::Path;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BASE_URL: &str = "https://newsapi.org/v2";
pub const DEFAULT_PAGE_SIZE: u32 = 20;
pub const MAX_PAGE_SIZE: u32 = 100;
pub const DEFAULT_FALLBACK_QUERY: &str = "news";
pub const DEFAULT_PUBLIC_DIR: &str = "public";

#[derive(Debug, Clone, PartialEq)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub public_dir: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamSettings {
    pub base_url: String,
    pub api_key: Option<ApiKey>,
    pub default_page_size: u32,
    pub max_page_size: u32,
    pub fallback_query: String,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoggingSettings {
    pub verbose: bool,
    pub json: bool,
}

/// 程序啟動時建立一次，之後以 `Arc` 唯讀共享
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub server: ServerSettings,
    pub upstream: UpstreamSettings,
    pub logging: LoggingSettings,
}

/// Non-fatal findings of startup validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    MissingApiKey,
}

impl ConfigWarning {
    pub fn message(&self) -> &'static str {
        match self {
            ConfigWarning::MissingApiKey => {
                "NEWSAPI_KEY is not set; upstream calls will be rejected. Get a key at https://newsapi.org and export NEWSAPI_KEY"
            }
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerSettings {
                host: DEFAULT_HOST.to_string(),
                port: DEFAULT_PORT,
                public_dir: DEFAULT_PUBLIC_DIR.to_string(),
            },
            upstream: UpstreamSettings {
                base_url: DEFAULT_BASE_URL.to_string(),
                api_key: None,
                default_page_size: DEFAULT_PAGE_SIZE,
                max_page_size: MAX_PAGE_SIZE,
                fallback_query: DEFAULT_FALLBACK_QUERY.to_string(),
                timeout_seconds: None,
            },
            logging: LoggingSettings::default(),
        }
    }
}

impl AppConfig {
    /// 依序套用：預設值 → TOML 檔 → 環境變數
    pub fn from_sources<P: AsRef<Path>>(
        config_file: Option<P>,
        env: &env::EnvOverrides,
    ) -> Result<Self> {
        let mut config = Self::default();

        if let Some(path) = config_file {
            let file = toml_config::TomlConfig::from_file(path)?;
            file.apply_to(&mut config);
        }

        env.apply_to(&mut config);
        Ok(config)
    }

    pub fn page_size_policy(&self) -> PageSizePolicy {
        PageSizePolicy::new(
            self.upstream.default_page_size,
            self.upstream.max_page_size,
        )
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    pub fn has_api_key(&self) -> bool {
        self.upstream.api_key.is_some()
    }

    pub fn warnings(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();
        if self.upstream.api_key.is_none() {
            warnings.push(ConfigWarning::MissingApiKey);
        }
        warnings
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("server.host", &self.server.host)?;
        validation::validate_path("server.public_dir", &self.server.public_dir)?;
        validation::validate_url("upstream.base_url", &self.upstream.base_url)?;
        validation::validate_range(
            "upstream.max_page_size",
            self.upstream.max_page_size,
            1,
            MAX_PAGE_SIZE,
        )?;
        validation::validate_range(
            "upstream.default_page_size",
            self.upstream.default_page_size,
            1,
            self.upstream.max_page_size,
        )?;
        validation::validate_non_empty_string(
            "upstream.fallback_query",
            &self.upstream.fallback_query,
        )?;
        if let Some(timeout) = self.upstream.timeout_seconds {
            validation::validate_positive_number("upstream.timeout_seconds", timeout, 1)?;
        }
        Ok(())
    }
}
