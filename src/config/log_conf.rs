use std::env;

use crate::config::ConfigError;

/// Where and how much the file appenders write
#[derive(Debug, Clone)]
pub struct LogConfig {
    pub log_dir: String,
    pub file_log_level: String,
    pub log_to_file: bool,
}

impl LogConfig {
    // Runs before the subscriber exists, so nothing here logs.
    pub fn from_env() -> Result<Self, ConfigError> {
        let log_dir = env::var("LOG_DIR").unwrap_or_else(|_| "logs".to_string());
        let file_log_level = env::var("FILE_LOG_LEVEL").unwrap_or_else(|_| "debug".to_string());
        let log_to_file = match env::var("LOG_TO_FILE") {
            Ok(raw) => raw.parse::<bool>().map_err(|_| {
                ConfigError::InvalidValue(format!("Invalid LOG_TO_FILE value: {}", raw))
            })?,
            Err(_) => true,
        };
        let config = LogConfig { log_dir, file_log_level, log_to_file };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.log_to_file && self.log_dir.trim().is_empty() {
            return Err(ConfigError::ValidationError("LOG_DIR cannot be empty".to_string()));
        }
        Ok(())
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            log_dir: "logs".to_string(),
            file_log_level: "debug".to_string(),
            log_to_file: true,
        }
    }
}
