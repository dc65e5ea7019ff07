//! Configuration management for the composite gateway

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::{env, time::Duration};

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Base addresses of the downstream services.
///
/// None of the addresses has a default: a route whose backend is unset fails
/// with a configuration error instead of calling anything.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct BackendsConfig {
    pub auth_url: Option<String>,
    pub search_url: Option<String>,
    pub upload_url: Option<String>,
    /// Bound applied to every outbound call, in milliseconds
    pub timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct AuthConfig {
    /// Role given to a verified identity when the auth service omits one
    pub fallback_role: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub backends: BackendsConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // GATEWAY__BACKENDS__TIMEOUT_MS=2000 and friends
            .add_source(
                Environment::with_prefix("GATEWAY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            // The backend addresses keep the names the services are deployed with
            .set_override_option("backends.auth_url", env::var("AUTH_SERVICE_URL").ok())?
            .set_override_option("backends.search_url", env::var("SEARCH_SERVICE_URL").ok())?
            .set_override_option("backends.upload_url", env::var("UPLOAD_SERVICE_URL").ok())?
            .build()?;

        config.try_deserialize()
    }
}

impl BackendsConfig {
    pub fn auth(&self) -> Option<String> {
        normalize_base_url(self.auth_url.as_deref())
    }

    pub fn search(&self) -> Option<String> {
        normalize_base_url(self.search_url.as_deref())
    }

    pub fn upload(&self) -> Option<String> {
        normalize_base_url(self.upload_url.as_deref())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Blank addresses count as unset; trailing slashes are dropped so paths can be appended.
fn normalize_base_url(url: Option<&str>) -> Option<String> {
    let url = url?.trim().trim_end_matches('/');
    if url.is_empty() {
        None
    } else {
        Some(url.to_string())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

impl Default for BackendsConfig {
    fn default() -> Self {
        Self {
            auth_url: None,
            search_url: None,
            upload_url: None,
            timeout_ms: 5_000,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            fallback_role: "student".to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_and_trailing_slash_addresses() {
        let backends = BackendsConfig {
            auth_url: Some("http://auth:8001/".to_string()),
            search_url: Some("   ".to_string()),
            upload_url: None,
            ..Default::default()
        };

        assert_eq!(backends.auth().as_deref(), Some("http://auth:8001"));
        assert_eq!(backends.search(), None);
        assert_eq!(backends.upload(), None);
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.backends.timeout(), Duration::from_secs(5));
        assert_eq!(config.auth.fallback_role, "student");
        assert_eq!(config.server.port, 8000);
    }
}
