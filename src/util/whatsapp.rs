use crate::config::{ConfigError, WhatsAppConfig};
use crate::dto::quote_dto::SendQuoteRequest;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info, instrument, warn};

const DIVIDER: &str = "———————————";

/// WhatsApp delivery errors
#[derive(Debug, thiserror::Error)]
pub enum WhatsAppError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("WhatsApp API returned {status}: {body}")]
    Api { status: u16, body: String },
}

impl WhatsAppError {
    /// Transport failures, throttling and provider faults are worth another
    /// attempt; rejected requests are not.
    pub fn is_retryable(&self) -> bool {
        match self {
            WhatsAppError::ConfigError(_) => false,
            WhatsAppError::Http(_) => true,
            WhatsAppError::Api { status, .. } => *status == 429 || *status >= 500,
        }
    }
}

impl From<ConfigError> for WhatsAppError {
    fn from(err: ConfigError) -> Self {
        WhatsAppError::ConfigError(err.to_string())
    }
}

impl From<reqwest::Error> for WhatsAppError {
    fn from(err: reqwest::Error) -> Self {
        WhatsAppError::Http(err.to_string())
    }
}

/// Render a quote as the text the owner receives.
pub fn build_quote_message(
    quote: &SendQuoteRequest,
    business_name: &str,
    received_at: NaiveDateTime,
) -> String {
    fn field(value: &Option<String>) -> &str {
        value.as_deref().unwrap_or("")
    }

    format!(
        "*New Quote Request - {business}*\n\
         {DIVIDER}\n\
         *Name:* {name}\n\
         *Email:* {email}\n\
         *Phone:* {phone}\n\
         *Project Type:* {project_type}\n\
         *Budget:* {budget}\n\
         *Timeline:* {timeline}\n\
         *Message:* {message}\n\
         {DIVIDER}\n\
         *Received on:* {received}",
        business = business_name,
        name = field(&quote.name),
        email = field(&quote.email),
        phone = field(&quote.phone),
        project_type = field(&quote.project_type),
        budget = field(&quote.budget),
        timeline = field(&quote.timeline),
        message = field(&quote.message),
        received = received_at.format("%-m/%-d/%Y, %-I:%M:%S %p"),
    )
    .trim()
    .to_string()
}

#[derive(Debug, Serialize)]
struct TextBody<'a> {
    body: &'a str,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    messaging_product: &'static str,
    to: &'a str,
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextBody<'a>,
}

#[derive(Debug, Default, Deserialize)]
struct SendMessageResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Debug, Deserialize)]
struct SentMessage {
    id: String,
}

#[async_trait]
pub trait WhatsAppSender: Send + Sync {
    /// Send a plain text message. Returns the provider message id when the
    /// provider reports one.
    async fn send_text(&self, to: &str, body: &str) -> Result<Option<String>, WhatsAppError>;
}

/// Client for the WhatsApp Cloud API send-message endpoint
pub struct WhatsAppCloudClient {
    config: WhatsAppConfig,
    client: reqwest::Client,
}

impl WhatsAppCloudClient {
    #[instrument(skip(config), fields(phone_number_id = %config.phone_number_id))]
    pub fn new(config: WhatsAppConfig) -> Result<Self, WhatsAppError> {
        info!("Initializing WhatsApp Cloud API client");

        config.validate().map_err(WhatsAppError::from)?;

        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|e| WhatsAppError::ConfigError(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &WhatsAppConfig {
        &self.config
    }

    async fn send_once(&self, to: &str, body: &str) -> Result<Option<String>, WhatsAppError> {
        let payload = SendMessageRequest {
            messaging_product: "whatsapp",
            to,
            kind: "text",
            text: TextBody { body },
        };

        let response = self
            .client
            .post(self.config.messages_url())
            .bearer_auth(&self.config.access_token)
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(WhatsAppError::Api { status: status.as_u16(), body: text });
        }

        // A 2xx means the provider accepted the message; the id is only for logs.
        match response.json::<SendMessageResponse>().await {
            Ok(parsed) => Ok(parsed.messages.into_iter().next().map(|m| m.id)),
            Err(e) => {
                warn!("Could not parse WhatsApp response body: {}", e);
                Ok(None)
            }
        }
    }
}

#[async_trait]
impl WhatsAppSender for WhatsAppCloudClient {
    #[instrument(skip(self, body), fields(to = %to, len = body.len()))]
    async fn send_text(&self, to: &str, body: &str) -> Result<Option<String>, WhatsAppError> {
        let mut attempt: u32 = 0;
        loop {
            match self.send_once(to, body).await {
                Ok(message_id) => {
                    info!(?message_id, "WhatsApp message accepted");
                    return Ok(message_id);
                }
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = self.config.retry_backoff() * attempt;
                    warn!("WhatsApp send failed ({}), retry {} in {:?}", e, attempt, delay);
                    tokio::time::sleep(delay).await;
                }
                Err(e) => {
                    error!("WhatsApp send failed: {}", e);
                    return Err(e);
                }
            }
            debug!("Retrying WhatsApp send, attempt {}", attempt + 1);
        }
    }
}
