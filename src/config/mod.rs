pub mod app_conf;
pub mod whatsapp_conf;
pub mod log_conf;


pub use app_conf::AppConfig;
pub use whatsapp_conf::WhatsAppConfig;
pub use log_conf::LogConfig;

/// Common configuration error type
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Environment variable not found: {0}")]
    EnvVarNotFound(String),
    
    #[error("Invalid configuration value: {0}")]
    InvalidValue(String),
    
    #[error("Validation error: {0}")]
    ValidationError(String),
    
    #[error("Parse error: {0}")]
    ParseError(String),
}
