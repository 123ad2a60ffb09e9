//! Field checks for the quote form.
//!
//! All checks are pure functions of their input, so the form can run them on
//! every submit without side effects.

use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

use crate::form::QuoteFormFields;
use crate::model::quote::{BudgetRange, ProjectType, Timeline};

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z\s]+$").expect("valid name pattern")
});

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern")
});

// `\d` would also admit non-ASCII digits.
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+]?[1-9][0-9]{0,15}$").expect("valid phone pattern")
});

pub const MIN_NAME_LEN: usize = 2;
pub const MIN_PHONE_LEN: usize = 10;
pub const MIN_MESSAGE_LEN: usize = 10;

/// Field name to error message, ordered by field name. Empty means valid.
pub type FieldErrors = BTreeMap<&'static str, String>;

pub fn validate_name(name: &str) -> bool {
    let trimmed = name.trim();
    trimmed.chars().count() >= MIN_NAME_LEN && NAME_RE.is_match(trimmed)
}

pub fn validate_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

/// Spaces, hyphens and parentheses are formatting, not part of the number.
pub fn strip_phone_separators(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !c.is_whitespace() && !matches!(c, '-' | '(' | ')'))
        .collect()
}

pub fn validate_phone(phone: &str) -> bool {
    let stripped = strip_phone_separators(phone);
    PHONE_RE.is_match(&stripped) && stripped.chars().count() >= MIN_PHONE_LEN
}

/// An empty message is fine; a non-empty one must say something.
pub fn validate_message(message: &str) -> bool {
    let trimmed = message.trim();
    trimmed.is_empty() || trimmed.chars().count() >= MIN_MESSAGE_LEN
}

pub fn validate_form(fields: &QuoteFormFields) -> FieldErrors {
    let mut errors = FieldErrors::new();

    if fields.name.trim().is_empty() {
        errors.insert("name", "Name is required".to_string());
    } else if !validate_name(&fields.name) {
        errors.insert(
            "name",
            "Name must be at least 2 characters and contain only letters and spaces".to_string(),
        );
    }

    if fields.email.trim().is_empty() {
        errors.insert("email", "Email is required".to_string());
    } else if !validate_email(fields.email.trim()) {
        errors.insert("email", "Please enter a valid email address".to_string());
    }

    if fields.phone.trim().is_empty() {
        errors.insert("phone", "Phone number is required".to_string());
    } else if !validate_phone(&fields.phone) {
        errors.insert(
            "phone",
            "Please enter a valid phone number (at least 10 digits)".to_string(),
        );
    }

    if fields.project_type.is_empty() {
        errors.insert("projectType", "Please select a project type".to_string());
    } else if fields.project_type.parse::<ProjectType>().is_err() {
        errors.insert("projectType", "Please select a valid project type".to_string());
    }

    if !fields.budget.is_empty() && fields.budget.parse::<BudgetRange>().is_err() {
        errors.insert("budget", "Please select a valid budget range".to_string());
    }

    if !fields.timeline.is_empty() && fields.timeline.parse::<Timeline>().is_err() {
        errors.insert("timeline", "Please select a valid timeline".to_string());
    }

    if !validate_message(&fields.message) {
        errors.insert("message", "Message must be at least 10 characters".to_string());
    }

    errors
}
