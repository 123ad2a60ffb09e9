use dotenv::dotenv;
use swagruha_backend::app::app::App;
use swagruha_backend::config::LogConfig;
use swagruha_backend::util::logger::Logger;
use tracing::{error, info, warn};


#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load .env before reading any configuration
    let dotenv_result = dotenv();

    let log_config = LogConfig::from_env()?;
    let _logger = Logger::new(&log_config)?;

    info!("🚀 Starting Swagruha quote relay");

    match dotenv_result {
        Ok(_) => info!("✅ Successfully loaded .env file"),
        Err(e) => warn!("⚠️ Failed to load .env file: {} (using system env vars)", e),
    }

    let app = match App::new() {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to start: {}", e);
            return Err(e.into());
        }
    };
    app.start().await?;
    Ok(())
}
