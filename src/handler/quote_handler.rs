use axum::{extract::{rejection::JsonRejection, State}, response::IntoResponse, Json, http::StatusCode};
use crate::dto::quote_dto::{SendQuoteRequest, SendQuoteResponse};
use crate::service::quote_service::{QuoteServiceImpl, QuoteService};
use crate::util::error::HandlerError;
use std::sync::Arc;
use tracing::{info, warn};

use validator::Validate;

pub const MESSAGE_SENT: &str = "Message sent";

// Handler: Relay a quote request to the owner (public)
pub async fn send_quote_handler(
    State(service): State<Arc<QuoteServiceImpl>>,
    payload: Result<Json<SendQuoteRequest>, JsonRejection>,
) -> Result<impl IntoResponse, HandlerError> {
    info!("[send_quote_handler] Handler called");

    // Extractor detail is logged only; the caller gets the generic 400.
    let Json(payload) = payload.map_err(|rejection| {
        warn!(
            "[send_quote_handler] Rejected unreadable body ({}): {}",
            rejection.status(),
            rejection.body_text()
        );
        HandlerError::missing_fields()
    })?;

    if let Err(e) = payload.validate() {
        warn!("[send_quote_handler] Rejected incomplete quote: {}", e);
        return Err(HandlerError::missing_fields());
    }

    service.send_quote(payload).await.map_err(HandlerError::from)?;

    Ok((StatusCode::OK, Json(SendQuoteResponse { status: MESSAGE_SENT.to_string() })))
}
