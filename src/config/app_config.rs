use std::time::Duration;

use serde::Deserialize;

use crate::domain::FileValidationPolicy;
use crate::infrastructure::http::RetryConfig;
use crate::infrastructure::idempotency::IdempotencyConfig;
use crate::infrastructure::kv_store::KvStoreConfig;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    #[serde(default)]
    pub idempotency: IdempotencyConfig,
    #[serde(default)]
    pub storage: KvStoreConfig,
    #[serde(default)]
    pub upload: FileValidationPolicy,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-attempt deadline; `0` disables it
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
    #[serde(default)]
    pub admin_token: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout_ms(),
            admin_token: None,
        }
    }
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_ms > 0).then(|| Duration::from_millis(self.request_timeout_ms))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::kv_store::KvStoreType;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();

        assert_eq!(config.api.base_url, "http://localhost:8080/api");
        assert_eq!(config.api.request_timeout(), Some(Duration::from_secs(30)));
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.idempotency.ttl_hours, 24);
        assert_eq!(config.idempotency.key_prefix, "idempotency_key_");
        assert_eq!(config.storage.store_type, KvStoreType::InMemory);
        assert_eq!(config.upload, FileValidationPolicy::default());
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn test_zero_timeout_disables_deadline() {
        let api = ApiConfig {
            request_timeout_ms: 0,
            ..ApiConfig::default()
        };
        assert_eq!(api.request_timeout(), None);
    }

    #[test]
    fn test_deserialize_sections() {
        let raw = serde_json::json!({
            "api": { "base_url": "https://cup.example/api", "admin_token": "t" },
            "retry": { "max_attempts": 5 },
            "idempotency": { "ttl_hours": 12 },
            "storage": { "store_type": "file", "path": "/tmp/kv.json" },
            "upload": { "max_size_bytes": 1048576 },
            "logging": { "level": "debug", "format": "json" }
        });

        let config: AppConfig = serde_json::from_value(raw).unwrap();

        assert_eq!(config.api.base_url, "https://cup.example/api");
        assert_eq!(config.api.admin_token.as_deref(), Some("t"));
        assert_eq!(config.retry.max_attempts, 5);
        assert_eq!(config.retry.initial_backoff_ms, 1_000);
        assert_eq!(config.idempotency.ttl_hours, 12);
        assert_eq!(config.storage.store_type, KvStoreType::File);
        assert_eq!(config.upload.max_size_bytes(), 1_048_576);
        assert_eq!(config.upload.allowed_extensions().len(), 4);
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_load_layers() {
        let config = AppConfig::load().unwrap();
        assert!(!config.api.base_url.is_empty());
    }
}
