use axum::{Router, routing::post};
use crate::handler::quote_handler::send_quote_handler;
use std::sync::Arc;
use crate::service::quote_service::QuoteServiceImpl;


pub fn quote_router(service: Arc<QuoteServiceImpl>) -> Router {
    // Public route, called by the website's quote form
    Router::new()
        .route("/api/send-quote", post(send_quote_handler))
        .with_state(service)
}
