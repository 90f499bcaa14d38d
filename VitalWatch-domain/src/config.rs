//! Application configuration read from the environment

use std::time::Duration;

use tracing::{debug, warn};

use vital_watch_data::analysis_client::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};

/// Listen port used when `PORT` is unset or invalid
pub const DEFAULT_PORT: u16 = 3000;

/// Request timeout, in seconds, for the analysis service and reading provider
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Runtime settings for the service
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port
    pub port: u16,
    /// Deployment environment name, reported by the health endpoint
    pub environment: String,
    /// Upstream reading provider; `None` uses the in-memory store
    pub readings_api_url: Option<String>,
    /// Request timeout for the upstream reading provider
    pub readings_timeout: Duration,
    /// Analysis service settings
    pub gemini: GeminiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            environment: "development".to_string(),
            readings_api_url: None,
            readings_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            gemini: GeminiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Read the configuration from process environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any variable source
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = match var("PORT") {
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!("PORT '{}' is not a valid port - using {}", value, DEFAULT_PORT);
                DEFAULT_PORT
            }),
            None => DEFAULT_PORT,
        };

        let environment = var("APP_ENV").unwrap_or_else(|| {
            debug!("APP_ENV not set - using development.");
            "development".to_string()
        });

        let readings_api_url = var("READINGS_API_URL");
        if readings_api_url.is_none() {
            debug!("READINGS_API_URL not set - readings are kept in memory.");
        }

        let api_key = var("GEMINI_API_KEY");
        if api_key.is_none() {
            warn!("GEMINI_API_KEY not set - reports will use the rule-based assessment.");
        }

        let timeout = |key: &str| {
            let secs = match var(key) {
                Some(value) => value.parse::<u64>().ok().filter(|secs| *secs > 0).unwrap_or_else(|| {
                    warn!("{} '{}' is not a positive number of seconds - using {}", key, value, DEFAULT_TIMEOUT_SECS);
                    DEFAULT_TIMEOUT_SECS
                }),
                None => DEFAULT_TIMEOUT_SECS,
            };
            Duration::from_secs(secs)
        };

        let config = Self {
            port,
            environment,
            readings_api_url,
            readings_timeout: timeout("READINGS_TIMEOUT_SECS"),
            gemini: GeminiConfig {
                api_key,
                model: var("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
                api_base: var("GEMINI_API_BASE").unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
                timeout: timeout("GEMINI_TIMEOUT_SECS"),
            },
        };

        // Log validation warnings but don't fail
        if let Err(errors) = config.validate() {
            for error in &errors {
                warn!("Configuration warning: {}", error);
            }
        }

        config
    }

    /// Check the configuration for values that are likely mistakes
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if let Some(url) = &self.readings_api_url {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                errors.push(format!("READINGS_API_URL '{}' is not an http(s) URL", url));
            }
        }

        if !self.gemini.api_base.starts_with("http://") && !self.gemini.api_base.starts_with("https://") {
            errors.push(format!("GEMINI_API_BASE '{}' is not an http(s) URL", self.gemini.api_base));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.environment, "development");
        assert!(config.readings_api_url.is_none());
        assert_eq!(config.readings_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.model, DEFAULT_MODEL);
        assert_eq!(config.gemini.api_base, DEFAULT_API_BASE);
        assert_eq!(config.gemini.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_values_from_environment() {
        let config = config_from(&[
            ("PORT", "8080"),
            ("APP_ENV", "production"),
            ("READINGS_API_URL", "http://backend:8000/api/health/"),
            ("GEMINI_API_KEY", "secret"),
            ("GEMINI_MODEL", "gemini-1.5-pro"),
            ("GEMINI_TIMEOUT_SECS", "10"),
            ("READINGS_TIMEOUT_SECS", "5"),
        ]);

        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, "production");
        assert_eq!(config.readings_api_url.as_deref(), Some("http://backend:8000/api/health/"));
        assert_eq!(config.gemini.api_key.as_deref(), Some("secret"));
        assert_eq!(config.gemini.model, "gemini-1.5-pro");
        assert_eq!(config.gemini.timeout, Duration::from_secs(10));
        assert_eq!(config.readings_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_and_empty_values_fall_back() {
        let config = config_from(&[
            ("PORT", "not-a-port"),
            ("GEMINI_API_KEY", "   "),
            ("GEMINI_TIMEOUT_SECS", "0"),
            ("READINGS_TIMEOUT_SECS", "soon"),
        ]);

        assert_eq!(config.port, DEFAULT_PORT);
        assert!(config.gemini.api_key.is_none());
        assert_eq!(config.gemini.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
        assert_eq!(config.readings_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_validate_flags_non_http_urls() {
        let config = config_from(&[("READINGS_API_URL", "backend:8000")]);
        let errors = config.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("READINGS_API_URL"));
    }
}
