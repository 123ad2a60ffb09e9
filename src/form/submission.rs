//! Submit flow for the quote dialog.
//!
//! `Idle -> Validating -> Submitting -> Success | Failed`. Validation is
//! synchronous. While a request is in flight further submits are ignored, so
//! one dialog never sends the same quote twice. Closing the dialog does not
//! cancel the request; its outcome is just no longer shown.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tracing::{debug, info, instrument, warn};

use crate::dto::quote_dto::{ErrorResponse, SendQuoteRequest};
use crate::form::validation::FieldErrors;
use crate::form::{QuoteField, QuoteFormFields};

pub const SUCCESS_DISPLAY: Duration = Duration::from_millis(1800);
pub const FAILURE_DISPLAY: Duration = Duration::from_millis(3000);

pub const VALIDATION_FAILED_NOTICE: &str = "Please fill all required fields.";
pub const SUBMISSION_FAILED_NOTICE: &str = "Submission failed. Please try again.";
pub const SUBMISSION_SENT_NOTICE: &str = "Thank you! Your quote request has been sent.";

pub const SEND_QUOTE_PATH: &str = "/api/send-quote";

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("Request failed: {0}")]
    Http(String),

    #[error("Relay responded {status}: {message}")]
    Rejected { status: u16, message: String },
}

impl From<reqwest::Error> for SubmitError {
    fn from(err: reqwest::Error) -> Self {
        SubmitError::Http(err.to_string())
    }
}

/// Sends a quote to the relay.
#[async_trait]
pub trait QuoteSubmitter: Send + Sync {
    async fn submit(&self, request: &SendQuoteRequest) -> Result<(), SubmitError>;
}

/// Posts quotes to a relay at `base_url`.
pub struct HttpQuoteSubmitter {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpQuoteSubmitter {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: format!("{}{}", base_url.trim_end_matches('/'), SEND_QUOTE_PATH),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl QuoteSubmitter for HttpQuoteSubmitter {
    #[instrument(skip(self, request), fields(endpoint = %self.endpoint))]
    async fn submit(&self, request: &SendQuoteRequest) -> Result<(), SubmitError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let message = match response.json::<ErrorResponse>().await {
            Ok(body) => body.error,
            Err(_) => status.canonical_reason().unwrap_or("unknown error").to_string(),
        };
        Err(SubmitError::Rejected { status: status.as_u16(), message })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionState {
    Idle,
    Validating,
    Submitting,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub kind: NotificationKind,
    pub message: String,
}

impl Notification {
    fn success(message: &str) -> Self {
        Notification { kind: NotificationKind::Success, message: message.to_string() }
    }

    fn error(message: &str) -> Self {
        Notification { kind: NotificationKind::Error, message: message.to_string() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; nothing was sent.
    Invalid(FieldErrors),
    /// The dialog is closed, a submit was already running, or the dialog is closing.
    Ignored,
    Sent,
    Failed,
    /// The dialog was closed while the request was in flight.
    Detached,
}

/// What the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    pub state: SubmissionState,
    pub fields: QuoteFormFields,
    pub field_errors: FieldErrors,
    pub notification: Option<Notification>,
    pub dialog_open: bool,
    pub submit_enabled: bool,
}

#[derive(Debug)]
struct FlowState {
    state: SubmissionState,
    fields: QuoteFormFields,
    field_errors: FieldErrors,
    notification: Option<Notification>,
    dialog_open: bool,
    /// Bumped on every close; stale requests and timers compare against it.
    session: u64,
    /// Bumped on every displayed outcome so only the latest timer fires.
    outcome_seq: u64,
}

impl FlowState {
    fn can_edit(&self) -> bool {
        matches!(self.state, SubmissionState::Idle | SubmissionState::Failed)
    }
}

pub struct SubmissionFlow {
    inner: Arc<Mutex<FlowState>>,
    submitter: Arc<dyn QuoteSubmitter>,
    success_display: Duration,
    failure_display: Duration,
}

impl SubmissionFlow {
    pub fn new(submitter: Arc<dyn QuoteSubmitter>) -> Self {
        Self::with_display_durations(submitter, SUCCESS_DISPLAY, FAILURE_DISPLAY)
    }

    pub fn with_display_durations(
        submitter: Arc<dyn QuoteSubmitter>,
        success_display: Duration,
        failure_display: Duration,
    ) -> Self {
        let state = FlowState {
            state: SubmissionState::Idle,
            fields: QuoteFormFields::default(),
            field_errors: FieldErrors::new(),
            notification: None,
            dialog_open: false,
            session: 0,
            outcome_seq: 0,
        };
        Self {
            inner: Arc::new(Mutex::new(state)),
            submitter,
            success_display,
            failure_display,
        }
    }

    fn lock(&self) -> MutexGuard<'_, FlowState> {
        lock_state(&self.inner)
    }

    pub fn snapshot(&self) -> FormSnapshot {
        let inner = self.lock();
        FormSnapshot {
            state: inner.state,
            fields: inner.fields.clone(),
            field_errors: inner.field_errors.clone(),
            notification: inner.notification.clone(),
            dialog_open: inner.dialog_open,
            submit_enabled: inner.dialog_open && inner.can_edit(),
        }
    }

    pub fn state(&self) -> SubmissionState {
        self.lock().state
    }

    pub fn open_dialog(&self) {
        let mut inner = self.lock();
        inner.dialog_open = true;
        inner.notification = None;
    }

    /// Close the dialog. Typed values are kept for next time; an in-flight
    /// request keeps running but its result is dropped.
    pub fn close_dialog(&self) {
        let mut inner = self.lock();
        if inner.state == SubmissionState::Submitting {
            debug!("Quote dialog closed while a request is in flight");
        }
        inner.dialog_open = false;
        inner.session += 1;
        inner.state = SubmissionState::Idle;
        inner.field_errors.clear();
        inner.notification = None;
    }

    /// Update one field. Returns false when the form is locked.
    pub fn set_field(&self, field: QuoteField, value: impl Into<String>) -> bool {
        let mut inner = self.lock();
        if !inner.can_edit() {
            return false;
        }
        inner.fields.set(field, value);
        inner.field_errors.remove(field.as_str());
        true
    }

    pub async fn submit(&self) -> SubmitOutcome {
        let (request, session) = {
            let mut inner = self.lock();
            if !inner.dialog_open || !inner.can_edit() {
                debug!(state = ?inner.state, dialog_open = inner.dialog_open, "Submit ignored");
                return SubmitOutcome::Ignored;
            }

            inner.state = SubmissionState::Validating;
            match inner.fields.to_request() {
                Ok(quote) => {
                    inner.state = SubmissionState::Submitting;
                    inner.field_errors.clear();
                    inner.notification = None;
                    (SendQuoteRequest::from(&quote), inner.session)
                }
                Err(errors) => {
                    debug!(fields = ?errors.keys().collect::<Vec<_>>(), "Quote form invalid");
                    inner.state = SubmissionState::Idle;
                    inner.field_errors = errors.clone();
                    inner.notification = Some(Notification::error(VALIDATION_FAILED_NOTICE));
                    return SubmitOutcome::Invalid(errors);
                }
            }
        };

        // The lock is not held across the request so the UI can still read
        // state and close the dialog meanwhile.
        let result = self.submitter.submit(&request).await;

        let mut inner = self.lock();
        if inner.session != session {
            info!(ok = result.is_ok(), "Quote request finished after dialog was closed");
            return SubmitOutcome::Detached;
        }

        inner.outcome_seq += 1;
        let seq = inner.outcome_seq;
        match result {
            Ok(()) => {
                info!("Quote request sent");
                inner.state = SubmissionState::Success;
                inner.fields = QuoteFormFields::default();
                inner.notification = Some(Notification::success(SUBMISSION_SENT_NOTICE));
                drop(inner);
                self.schedule_success_close(session, seq);
                SubmitOutcome::Sent
            }
            Err(e) => {
                warn!("Quote request failed: {}", e);
                inner.state = SubmissionState::Failed;
                inner.notification = Some(Notification::error(SUBMISSION_FAILED_NOTICE));
                drop(inner);
                self.schedule_failure_reset(session, seq);
                SubmitOutcome::Failed
            }
        }
    }

    fn schedule_success_close(&self, session: u64, seq: u64) {
        let inner = Arc::clone(&self.inner);
        let delay = self.success_display;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock_state(&inner);
            if state.session == session && state.outcome_seq == seq {
                state.dialog_open = false;
                state.session += 1;
                state.state = SubmissionState::Idle;
                state.notification = None;
            }
        });
    }

    fn schedule_failure_reset(&self, session: u64, seq: u64) {
        let inner = Arc::clone(&self.inner);
        let delay = self.failure_display;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let mut state = lock_state(&inner);
            if state.session == session
                && state.outcome_seq == seq
                && state.state == SubmissionState::Failed
            {
                state.state = SubmissionState::Idle;
                state.notification = None;
            }
        });
    }
}

fn lock_state(inner: &Mutex<FlowState>) -> MutexGuard<'_, FlowState> {
    inner.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSubmitter {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl QuoteSubmitter for CountingSubmitter {
        async fn submit(&self, _request: &SendQuoteRequest) -> Result<(), SubmitError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(SubmitError::Rejected { status: 500, message: "boom".to_string() })
            } else {
                Ok(())
            }
        }
    }

    fn flow(fail: bool) -> (SubmissionFlow, Arc<CountingSubmitter>) {
        let submitter = Arc::new(CountingSubmitter { calls: AtomicUsize::new(0), fail });
        let flow = SubmissionFlow::new(submitter.clone());
        flow.open_dialog();
        (flow, submitter)
    }

    #[tokio::test]
    async fn test_invalid_form_never_reaches_submitter() {
        let (flow, submitter) = flow(false);
        flow.set_field(QuoteField::Name, "Asha Rao");
        flow.set_field(QuoteField::Email, "abc@");
        flow.set_field(QuoteField::Phone, "9845012345");
        flow.set_field(QuoteField::ProjectType, "residential");

        let outcome = flow.submit().await;
        assert!(matches!(outcome, SubmitOutcome::Invalid(ref e) if e.contains_key("email")));
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);

        let snapshot = flow.snapshot();
        assert_eq!(snapshot.state, SubmissionState::Idle);
        assert_eq!(
            snapshot.notification,
            Some(Notification::error(VALIDATION_FAILED_NOTICE))
        );
        assert!(snapshot.submit_enabled);
    }

    #[tokio::test]
    async fn test_submit_with_closed_dialog_is_ignored() {
        let (flow, submitter) = flow(false);
        flow.set_field(QuoteField::Name, "Asha Rao");
        flow.set_field(QuoteField::Email, "asha@example.com");
        flow.set_field(QuoteField::Phone, "9845012345");
        flow.set_field(QuoteField::ProjectType, "office");
        flow.close_dialog();

        assert!(!flow.snapshot().submit_enabled);
        assert_eq!(flow.submit().await, SubmitOutcome::Ignored);
        assert_eq!(submitter.calls.load(Ordering::SeqCst), 0);
        assert_eq!(flow.state(), SubmissionState::Idle);
    }

    #[tokio::test]
    async fn test_editing_clears_field_error() {
        let (flow, _submitter) = flow(false);
        flow.submit().await;
        assert!(flow.snapshot().field_errors.contains_key("name"));
        assert!(flow.set_field(QuoteField::Name, "Asha"));
        assert!(!flow.snapshot().field_errors.contains_key("name"));
    }
}
