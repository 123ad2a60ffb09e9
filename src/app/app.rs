use axum::{Router, routing::get};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, error};
use crate::config::app_conf::AppConfig;
use crate::config::whatsapp_conf::WhatsAppConfig;
use crate::config::ConfigError;
use crate::router::quote_router::quote_router;
use crate::service::quote_service::QuoteServiceImpl;
use crate::util::whatsapp::{WhatsAppCloudClient, WhatsAppError, WhatsAppSender};
use std::sync::Arc;


#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("WhatsApp client error: {0}")]
    WhatsApp(#[from] WhatsAppError),

    #[error("Server error: {0}")]
    Io(#[from] std::io::Error),
}

pub struct App {
    config: AppConfig,
    router: Router,
    pub quote_service: Arc<QuoteServiceImpl>,
}

impl App {
    /// Build the app from environment configuration.
    pub fn new() -> Result<Self, AppError> {
        let config = AppConfig::from_env()?;
        let whatsapp_config = WhatsAppConfig::from_env()?;
        let owner_number = whatsapp_config.owner_number.clone();
        let sender = Arc::new(WhatsAppCloudClient::new(whatsapp_config)?) as Arc<dyn WhatsAppSender>;
        Ok(Self::with_sender(config, sender, owner_number))
    }

    /// Build the app around an already constructed sender.
    pub fn with_sender(config: AppConfig, sender: Arc<dyn WhatsAppSender>, owner_number: String) -> Self {
        let quote_service = Arc::new(QuoteServiceImpl::new(
            sender,
            owner_number,
            config.business_name.clone(),
        ));
        let router = create_router(quote_service.clone());
        App { config, router, quote_service }
    }

    pub fn router(&self) -> Router {
        self.router.clone()
    }

    pub async fn start(self) -> Result<(), AppError> {
        let addr = self.config.socket_addr()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        info!("🚀 Server running at http://{}", addr);
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        info!("Server stopped");
        Ok(())
    }
}

pub fn create_router(quote_service: Arc<QuoteServiceImpl>) -> Router {
    Router::new()
        .merge(quote_router(quote_service))
        .route("/health", get(|| async { "OK" }))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
