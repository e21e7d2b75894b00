//! Newsletter subscriptions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scalebreakers_core::Email;

use super::optional_text;
use crate::error::ValidationError;

/// A newsletter subscriber. The email is unique across subscribers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterSubscriber {
    pub email: Email,
    pub name: Option<String>,
    pub subscribed_at: DateTime<Utc>,
}

/// `newsletter.subscribe` input.
#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeInput {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

impl SubscribeInput {
    /// Normalize and validate the address.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] on `email` if it is not a valid address.
    pub fn validate(self) -> Result<(Email, Option<String>), ValidationError> {
        let email = Email::parse_normalized(&self.email)
            .map_err(|_| ValidationError::new("email", "Invalid email"))?;
        Ok((email, optional_text(self.name)))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_email() {
        let input = SubscribeInput {
            email: " Fan@Example.com ".into(),
            name: Some("  ".into()),
        };
        let (email, name) = input.validate().unwrap();
        assert_eq!(email.as_str(), "fan@example.com");
        assert_eq!(name, None);
    }

    #[test]
    fn test_rejects_invalid_email() {
        let input = SubscribeInput {
            email: "not-an-email".into(),
            name: None,
        };
        let err = input.validate().unwrap_err();
        assert_eq!(err.field, "email");
        assert_eq!(err.message, "Invalid email");
    }
}
