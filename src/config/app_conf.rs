use std::env;
use std::net::{IpAddr, SocketAddr};
use tracing::{debug, warn};

use crate::config::ConfigError;

pub const DEFAULT_BUSINESS_NAME: &str = "Swagruha Interiors";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    /// Shown in the header of every relayed quote message
    pub business_name: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw.parse::<u16>().map_err(|_| {
                ConfigError::InvalidValue(format!("Invalid APP_PORT value: {}", raw))
            })?,
            Err(_) => {
                warn!("APP_PORT not set, defaulting to 5000");
                5000
            }
        };
        let business_name = env::var("BUSINESS_NAME")
            .unwrap_or_else(|_| DEFAULT_BUSINESS_NAME.to_string());
        debug!("App host: {}, port: {}, business: {}", host, port, business_name);

        let config = AppConfig { host, port, business_name };
        config.validate()?;
        Ok(config)
    }

    pub fn from_test_env() -> Self {
        AppConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            business_name: DEFAULT_BUSINESS_NAME.to_string(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.host.parse::<IpAddr>().map_err(|_| {
            ConfigError::ValidationError(format!("APP_HOST is not an IP address: {}", self.host))
        })?;
        if self.business_name.trim().is_empty() {
            return Err(ConfigError::ValidationError("Business name cannot be empty".to_string()));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = self.host.parse::<IpAddr>()
            .map_err(|e| ConfigError::ParseError(format!("Invalid host {}: {}", self.host, e)))?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
