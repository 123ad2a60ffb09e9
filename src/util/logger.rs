use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};
use tracing_appender::{non_blocking, rolling};

use crate::config::LogConfig;


/// Holds the file writer guards; dropping it flushes and stops file logging.
pub struct Logger {
    pub guards: Vec<tracing_appender::non_blocking::WorkerGuard>,
}

impl Logger {
    pub fn new(config: &LogConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let guards = Self::setup_logging(config)?;
        Ok(Logger { guards })
    }


    pub fn setup_logging(config: &LogConfig) -> Result<Vec<tracing_appender::non_blocking::WorkerGuard>, Box<dyn std::error::Error>> {
        let console_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,swagruha_backend=debug,tower_http=debug"));

        let console = fmt::layer()
            .pretty()
            .with_target(true)
            .with_thread_ids(true)
            .with_ansi(true)
            .with_filter(console_filter);

        if !config.log_to_file {
            tracing_subscriber::registry().with(console).try_init()?;
            return Ok(Vec::new());
        }

        std::fs::create_dir_all(&config.log_dir)?;

        let general_file = rolling::daily(&config.log_dir, "swagruha-backend.log");
        let (non_blocking_general, general_guard) = non_blocking(general_file);

        let json_file = rolling::daily(format!("{}/json", config.log_dir), "swagruha-backend.json");
        let (non_blocking_json, json_guard) = non_blocking(json_file);

        tracing_subscriber::registry()
            .with(console)
            .with(
                // General log file - all logs
                fmt::layer()
                    .with_writer(non_blocking_general)
                    .with_ansi(false)
                    .with_target(true)
                    .with_thread_ids(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(config.file_log_level.clone()))
            )
            .with(
                fmt::layer()
                    .json()
                    .with_writer(non_blocking_json)
                    .with_ansi(false)
                    .with_target(true)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(EnvFilter::new(config.file_log_level.clone()))
            )
            .try_init()?;

        // Guards keep the background writer threads alive
        Ok(vec![general_guard, json_guard])
    }
}
