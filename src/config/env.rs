use crate::config::AppConfig;
use crate::utils::error::{ProxyError, Result};
use crate::utils::redact::ApiKey;
use std::env;

pub const API_KEY_VAR: &str = "NEWSAPI_KEY";
pub const PORT_VAR: &str = "PORT";
pub const HOST_VAR: &str = "HOST";
pub const BASE_URL_VAR: &str = "NEWSAPI_BASE_URL";

/// 環境變數層的設定值
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnvOverrides {
    pub api_key: Option<ApiKey>,
    pub port: Option<u16>,
    pub host: Option<String>,
    pub base_url: Option<String>,
}

impl EnvOverrides {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let port = match non_empty(PORT_VAR) {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|e| {
                ProxyError::InvalidConfigValueError {
                    field: PORT_VAR.to_string(),
                    value: raw.clone(),
                    reason: e.to_string(),
                }
            })?),
            None => None,
        };

        Ok(Self {
            api_key: lookup(API_KEY_VAR).and_then(ApiKey::new),
            port,
            host: non_empty(HOST_VAR).map(|v| v.trim().to_string()),
            base_url: non_empty(BASE_URL_VAR).map(|v| v.trim().to_string()),
        })
    }

    pub fn apply_to(&self, config: &mut AppConfig) {
        if let Some(key) = &self.api_key {
            config.upstream.api_key = Some(key.clone());
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.upstream.base_url = base_url.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_reads_all_variables() {
        let overrides = EnvOverrides::from_lookup(lookup(&[
            ("NEWSAPI_KEY", "abc"),
            ("PORT", "8080"),
            ("HOST", "127.0.0.1"),
            ("NEWSAPI_BASE_URL", "http://localhost:9000/v2"),
        ]))
        .unwrap();

        let mut config = AppConfig::default();
        overrides.apply_to(&mut config);

        assert_eq!(config.upstream.api_key.as_ref().unwrap().expose(), "abc");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.upstream.base_url, "http://localhost:9000/v2");
    }

    #[test]
    fn test_empty_environment_keeps_defaults() {
        let overrides = EnvOverrides::from_lookup(lookup(&[("NEWSAPI_KEY", ""), ("PORT", " ")]))
            .unwrap();

        let mut config = AppConfig::default();
        overrides.apply_to(&mut config);

        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = EnvOverrides::from_lookup(lookup(&[("PORT", "eighty")]));

        assert!(matches!(
            result,
            Err(ProxyError::InvalidConfigValueError { ref field, .. }) if field == "PORT"
        ));
    }
}
