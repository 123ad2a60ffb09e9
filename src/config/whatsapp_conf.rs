use std::env;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::config::ConfigError;

/// WhatsApp Cloud API settings used to notify the business owner
#[derive(Clone)]
pub struct WhatsAppConfig {
    /// Bearer token for the Cloud API
    pub access_token: String,
    /// Sender phone number id registered with the Cloud API
    pub phone_number_id: String,
    /// Recipient number in international format without "+"
    pub owner_number: String,
    /// Graph API host, overridable for tests
    pub api_base_url: String,
    /// Graph API version segment, e.g. "v19.0"
    pub api_version: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
    /// Extra attempts after the first failed send
    pub max_retries: u32,
    /// Delay before retry n is n * backoff
    pub retry_backoff_ms: u64,
}

// Keeps the token out of Debug output and therefore out of the logs.
impl std::fmt::Debug for WhatsAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WhatsAppConfig")
            .field("access_token", &"[REDACTED]")
            .field("phone_number_id", &self.phone_number_id)
            .field("owner_number", &self.owner_number)
            .field("api_base_url", &self.api_base_url)
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_retries", &self.max_retries)
            .field("retry_backoff_ms", &self.retry_backoff_ms)
            .finish()
    }
}

impl WhatsAppConfig {
    /// Create WhatsAppConfig from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        info!("Loading WhatsApp configuration from environment variables");

        let access_token = env::var("WHATSAPP_TOKEN")
            .map_err(|_| {
                error!("WHATSAPP_TOKEN environment variable not found");
                ConfigError::EnvVarNotFound("WHATSAPP_TOKEN".to_string())
            })?;
        debug!("WhatsApp token: [REDACTED]");

        let phone_number_id = env::var("WHATSAPP_PHONE_NUMBER_ID")
            .map_err(|_| {
                error!("WHATSAPP_PHONE_NUMBER_ID environment variable not found");
                ConfigError::EnvVarNotFound("WHATSAPP_PHONE_NUMBER_ID".to_string())
            })?;
        debug!("WhatsApp phone number id: {}", phone_number_id);

        let owner_number = env::var("WHATSAPP_OWNER_NUMBER")
            .map_err(|_| {
                error!("WHATSAPP_OWNER_NUMBER environment variable not found");
                ConfigError::EnvVarNotFound("WHATSAPP_OWNER_NUMBER".to_string())
            })?;
        debug!("WhatsApp owner number: {}", owner_number);

        let api_base_url = env::var("WHATSAPP_API_BASE_URL")
            .unwrap_or_else(|_| {
                warn!("WHATSAPP_API_BASE_URL not set, defaulting to https://graph.facebook.com");
                "https://graph.facebook.com".to_string()
            });

        let api_version = env::var("WHATSAPP_API_VERSION")
            .unwrap_or_else(|_| "v19.0".to_string());
        debug!("WhatsApp API: {}/{}", api_base_url, api_version);

        let request_timeout_secs = parse_or_default("WHATSAPP_TIMEOUT_SECS", 30u64)?;
        let max_retries = parse_or_default("WHATSAPP_MAX_RETRIES", 0u32)?;
        let retry_backoff_ms = parse_or_default("WHATSAPP_RETRY_BACKOFF_MS", 500u64)?;
        debug!(
            "Timeout: {}s, retries: {}, backoff: {}ms",
            request_timeout_secs, max_retries, retry_backoff_ms
        );

        let config = WhatsAppConfig {
            access_token,
            phone_number_id,
            owner_number,
            api_base_url,
            api_version,
            request_timeout_secs,
            max_retries,
            retry_backoff_ms,
        };

        config.validate()?;
        info!("WhatsApp configuration loaded successfully");
        Ok(config)
    }

    /// Create WhatsAppConfig for testing
    pub fn from_test_env() -> Self {
        WhatsAppConfig {
            access_token: "test-token".to_string(),
            phone_number_id: "1234567890".to_string(),
            owner_number: "919900000000".to_string(),
            api_base_url: "http://127.0.0.1:9".to_string(),
            api_version: "v19.0".to_string(),
            request_timeout_secs: 5,
            max_retries: 0,
            retry_backoff_ms: 10,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.access_token.trim().is_empty() {
            error!("WhatsApp token is empty");
            return Err(ConfigError::ValidationError("WhatsApp token cannot be empty".to_string()));
        }

        if self.phone_number_id.trim().is_empty() {
            error!("WhatsApp phone number id is empty");
            return Err(ConfigError::ValidationError("Phone number id cannot be empty".to_string()));
        }

        if self.owner_number.is_empty() || !self.owner_number.chars().all(|c| c.is_ascii_digit()) {
            error!("WhatsApp owner number is not a plain digit string");
            return Err(ConfigError::ValidationError(
                "Owner number must contain digits only (country code included, no '+')".to_string(),
            ));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            error!("Invalid WhatsApp API base url");
            return Err(ConfigError::ValidationError(format!(
                "API base url must be http(s): {}",
                self.api_base_url
            )));
        }

        if self.request_timeout_secs == 0 {
            error!("WhatsApp request timeout is 0");
            return Err(ConfigError::ValidationError("Request timeout cannot be 0".to_string()));
        }

        Ok(())
    }

    /// Full URL of the send-message endpoint
    pub fn messages_url(&self) -> String {
        format!(
            "{}/{}/{}/messages",
            self.api_base_url.trim_end_matches('/'),
            self.api_version,
            self.phone_number_id
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn retry_backoff(&self) -> Duration {
        Duration::from_millis(self.retry_backoff_ms)
    }
}

fn parse_or_default<T: std::str::FromStr>(key: &str, default: T) -> Result<T, ConfigError> {
    match env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().map_err(|_| {
            error!("Invalid {} value", key);
            ConfigError::InvalidValue(format!("Invalid {} value: {}", key, raw))
        }),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_test_config() {
        let config = WhatsAppConfig::from_test_env();
        assert_eq!(config.api_version, "v19.0");
        assert_eq!(config.max_retries, 0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_messages_url() {
        let mut config = WhatsAppConfig::from_test_env();
        config.api_base_url = "https://graph.facebook.com/".to_string();
        assert_eq!(
            config.messages_url(),
            "https://graph.facebook.com/v19.0/1234567890/messages"
        );
    }

    #[test]
    fn test_validate_empty_token() {
        let mut config = WhatsAppConfig::from_test_env();
        config.access_token = "".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_owner_number_with_plus() {
        let mut config = WhatsAppConfig::from_test_env();
        config.owner_number = "+919900000000".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_bad_base_url() {
        let mut config = WhatsAppConfig::from_test_env();
        config.api_base_url = "graph.facebook.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = WhatsAppConfig::from_test_env();
        config.request_timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = WhatsAppConfig::from_test_env();
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("test-token"));
        assert!(rendered.contains("[REDACTED]"));
    }
}
