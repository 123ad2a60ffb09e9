//! Client side of the quote form: field validation and the submit flow that
//! talks to the relay.

pub mod submission;
pub mod validation;

pub use submission::{
    FormSnapshot, HttpQuoteSubmitter, Notification, NotificationKind, QuoteSubmitter,
    SubmissionFlow, SubmissionState, SubmitError, SubmitOutcome,
};
pub use validation::{validate_email, validate_form, validate_name, validate_phone, FieldErrors};

use crate::model::quote::{BudgetRange, ProjectType, QuoteRequest, Timeline};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteField {
    Name,
    Email,
    Phone,
    ProjectType,
    Budget,
    Timeline,
    Message,
}

impl QuoteField {
    /// Key used in `FieldErrors` and on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteField::Name => "name",
            QuoteField::Email => "email",
            QuoteField::Phone => "phone",
            QuoteField::ProjectType => "projectType",
            QuoteField::Budget => "budget",
            QuoteField::Timeline => "timeline",
            QuoteField::Message => "message",
        }
    }
}

/// Raw form input, exactly as typed or selected. Empty string means unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuoteFormFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub budget: String,
    pub timeline: String,
    pub message: String,
}

impl QuoteFormFields {
    pub fn set(&mut self, field: QuoteField, value: impl Into<String>) {
        let value = value.into();
        match field {
            QuoteField::Name => self.name = value,
            QuoteField::Email => self.email = value,
            QuoteField::Phone => self.phone = value,
            QuoteField::ProjectType => self.project_type = value,
            QuoteField::Budget => self.budget = value,
            QuoteField::Timeline => self.timeline = value,
            QuoteField::Message => self.message = value,
        }
    }

    pub fn get(&self, field: QuoteField) -> &str {
        match field {
            QuoteField::Name => &self.name,
            QuoteField::Email => &self.email,
            QuoteField::Phone => &self.phone,
            QuoteField::ProjectType => &self.project_type,
            QuoteField::Budget => &self.budget,
            QuoteField::Timeline => &self.timeline,
            QuoteField::Message => &self.message,
        }
    }

    /// Validate and convert to a typed request.
    pub fn to_request(&self) -> Result<QuoteRequest, FieldErrors> {
        let errors = validate_form(self);
        if !errors.is_empty() {
            return Err(errors);
        }

        // validate_form has already checked every select value
        let invalid = |field: QuoteField| {
            let mut errors = FieldErrors::new();
            errors.insert(field.as_str(), format!("Invalid {}", field.as_str()));
            errors
        };
        let project_type = self
            .project_type
            .parse::<ProjectType>()
            .map_err(|_| invalid(QuoteField::ProjectType))?;
        let budget = match self.budget.as_str() {
            "" => None,
            value => Some(value.parse::<BudgetRange>().map_err(|_| invalid(QuoteField::Budget))?),
        };
        let timeline = match self.timeline.as_str() {
            "" => None,
            value => Some(value.parse::<Timeline>().map_err(|_| invalid(QuoteField::Timeline))?),
        };
        let message = match self.message.trim() {
            "" => None,
            value => Some(value.to_string()),
        };

        Ok(QuoteRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            project_type,
            budget,
            timeline,
            message,
        })
    }
}
