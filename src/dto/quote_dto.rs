use crate::model::quote::QuoteRequest;
use serde::{Deserialize, Serialize};

use validator::Validate;

/// Body of `POST /api/send-quote`.
///
/// The relay only insists on the contact fields; everything else is passed
/// through to the message as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SendQuoteRequest {
    #[validate(required, length(min = 1))]
    pub name: Option<String>,

    #[validate(required, length(min = 1))]
    pub email: Option<String>,

    #[validate(required, length(min = 1))]
    pub phone: Option<String>,

    pub project_type: Option<String>,

    pub budget: Option<String>,

    pub timeline: Option<String>,

    pub message: Option<String>,
}

impl From<&QuoteRequest> for SendQuoteRequest {
    // Unset selects go out as "" like the browser form posts them.
    fn from(quote: &QuoteRequest) -> Self {
        SendQuoteRequest {
            name: Some(quote.name.trim().to_string()),
            email: Some(quote.email.trim().to_string()),
            phone: Some(quote.phone.trim().to_string()),
            project_type: Some(quote.project_type.as_str().to_string()),
            budget: Some(quote.budget.map(|b| b.as_str().to_string()).unwrap_or_default()),
            timeline: Some(quote.timeline.map(|t| t.as_str().to_string()).unwrap_or_default()),
            message: Some(quote.message.clone().unwrap_or_default()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SendQuoteResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::quote::{BudgetRange, ProjectType};

    fn full_request() -> SendQuoteRequest {
        SendQuoteRequest {
            name: Some("Asha Rao".to_string()),
            email: Some("asha@example.com".to_string()),
            phone: Some("+91 98450 12345".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_contact_fields_are_enough() {
        assert!(full_request().validate().is_ok());
    }

    #[test]
    fn test_missing_email_fails() {
        let mut req = full_request();
        req.email = None;
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_empty_phone_fails() {
        let mut req = full_request();
        req.phone = Some(String::new());
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_deserializes_camel_case() {
        let req: SendQuoteRequest = serde_json::from_str(
            r#"{"name":"A B","email":"a@b.co","phone":"9876543210","projectType":"office"}"#,
        )
        .unwrap();
        assert_eq!(req.project_type.as_deref(), Some("office"));
        assert_eq!(req.budget, None);
    }

    #[test]
    fn test_from_quote_request_blanks_unset_options() {
        let quote = QuoteRequest {
            name: " Asha Rao ".to_string(),
            email: "asha@example.com".to_string(),
            phone: "9845012345".to_string(),
            project_type: ProjectType::Renovation,
            budget: Some(BudgetRange::From1LTo3L),
            timeline: None,
            message: None,
        };
        let req = SendQuoteRequest::from(&quote);
        assert_eq!(req.name.as_deref(), Some("Asha Rao"));
        assert_eq!(req.project_type.as_deref(), Some("renovation"));
        assert_eq!(req.budget.as_deref(), Some("1l-3l"));
        assert_eq!(req.timeline.as_deref(), Some(""));
        assert_eq!(req.message.as_deref(), Some(""));
    }
}
