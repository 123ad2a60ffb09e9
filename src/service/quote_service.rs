use tracing::{info, error, instrument};
use crate::dto::quote_dto::SendQuoteRequest;
use crate::util::error::ServiceError;
use crate::util::whatsapp::{build_quote_message, WhatsAppSender};
use std::sync::Arc;
use validator::Validate;

use async_trait::async_trait;

#[async_trait]
pub trait QuoteService: Send + Sync {
	/// Format a quote and forward it to the business owner.
	async fn send_quote(&self, quote: SendQuoteRequest) -> Result<(), ServiceError>;
}

pub struct QuoteServiceImpl {
	pub sender: Arc<dyn WhatsAppSender>,
	pub owner_number: String,
	pub business_name: String,
}

impl QuoteServiceImpl {
	pub fn new(
		sender: Arc<dyn WhatsAppSender>,
		owner_number: impl Into<String>,
		business_name: impl Into<String>,
	) -> Self {
		QuoteServiceImpl {
			sender,
			owner_number: owner_number.into(),
			business_name: business_name.into(),
		}
	}
}

#[async_trait]
impl QuoteService for QuoteServiceImpl {
	#[instrument(skip(self, quote), fields(project_type = quote.project_type.as_deref().unwrap_or("")))]
	async fn send_quote(&self, quote: SendQuoteRequest) -> Result<(), ServiceError> {
		use chrono::Local;
		info!("Relaying new quote request");

		// Same presence rule as the handler: present and non-empty.
		quote.validate().map_err(|e| ServiceError::InvalidInput(e.to_string()))?;

		let message = build_quote_message(&quote, &self.business_name, Local::now().naive_local());

		match self.sender.send_text(&self.owner_number, &message).await {
			Ok(message_id) => {
				info!(?message_id, "Quote relayed to owner");
				Ok(())
			}
			Err(e) => {
				// Full provider detail stays here; callers only see a generic failure.
				error!("Failed to relay quote: {}", e);
				Err(ServiceError::Delivery(e))
			}
		}
	}
}
