use axum::{response::{IntoResponse, Response}, http::StatusCode};
use serde::Serialize;

use crate::util::whatsapp::WhatsAppError;

pub const MISSING_FIELDS_MESSAGE: &str = "Missing fields";
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send WhatsApp message";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HandlerErrorKind {
    BadRequest,
    Internal,
}

impl std::fmt::Display for HandlerErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            HandlerErrorKind::BadRequest => "BadRequest",
            HandlerErrorKind::Internal => "Internal",
        };
        write!(f, "{}", s)
    }
}

/// Error returned by handlers. Only `message` reaches the client, as
/// `{ "error": message }`; anything more specific stays in the logs.
#[derive(Debug)]
pub struct HandlerError {
    pub kind: HandlerErrorKind,
    pub message: String,
}

impl HandlerError {
    pub fn missing_fields() -> Self {
        HandlerError {
            kind: HandlerErrorKind::BadRequest,
            message: MISSING_FIELDS_MESSAGE.to_string(),
        }
    }

    pub fn delivery_failed() -> Self {
        HandlerError {
            kind: HandlerErrorKind::Internal,
            message: DELIVERY_FAILED_MESSAGE.to_string(),
        }
    }
}

impl std::fmt::Display for HandlerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for HandlerError {}

impl IntoResponse for HandlerError {
    fn into_response(self) -> Response {
        let status = match self.kind {
            HandlerErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            HandlerErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = axum::Json(crate::dto::quote_dto::ErrorResponse { error: self.message });
        (status, body).into_response()
    }
}


#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("Invalid Input: {0}")]
    InvalidInput(String),

    #[error("Delivery failed: {0}")]
    Delivery(#[from] WhatsAppError),
}

impl From<ServiceError> for HandlerError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidInput(_) => HandlerError::missing_fields(),
            ServiceError::Delivery(_) => HandlerError::delivery_failed(),
        }
    }
}
