//! Mural commission requests.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use scalebreakers_core::{Email, MuralRequestId};

use super::{optional_text, required_text};
use crate::error::ValidationError;

/// A submitted mural commission request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuralRequest {
    pub id: MuralRequestId,
    pub name: String,
    pub email: Email,
    #[serde(flatten)]
    pub details: MuralDetails,
    pub created_at: DateTime<Utc>,
}

/// Optional free-text description of the commission.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MuralDetails {
    pub phone: Option<String>,
    pub location: Option<String>,
    pub wall_size: Option<String>,
    pub wall_condition: Option<String>,
    pub theme: Option<String>,
    pub inspiration: Option<String>,
    pub timeline: Option<String>,
    pub budget: Option<String>,
    pub additional_notes: Option<String>,
}

/// A validated request ready to be written. The id is assigned separately.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMuralRequest {
    pub name: String,
    pub email: Email,
    pub details: MuralDetails,
}

/// `muralRequests.submit` input.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitMuralRequestInput {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub wall_size: Option<String>,
    #[serde(default)]
    pub wall_condition: Option<String>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub inspiration: Option<String>,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
}

impl SubmitMuralRequestInput {
    /// Validate name and email; the remaining fields are trimmed free text.
    ///
    /// # Errors
    ///
    /// Returns a [`ValidationError`] on `name` or `email`.
    pub fn validate(self) -> Result<NewMuralRequest, ValidationError> {
        let name = required_text("name", "Name", &self.name)?;
        let email = Email::parse(self.email.trim())
            .map_err(|_| ValidationError::new("email", "Invalid email"))?;

        Ok(NewMuralRequest {
            name,
            email,
            details: MuralDetails {
                phone: optional_text(self.phone),
                location: optional_text(self.location),
                wall_size: optional_text(self.wall_size),
                wall_condition: optional_text(self.wall_condition),
                theme: optional_text(self.theme),
                inspiration: optional_text(self.inspiration),
                timeline: optional_text(self.timeline),
                budget: optional_text(self.budget),
                additional_notes: optional_text(self.additional_notes),
            },
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn minimal() -> SubmitMuralRequestInput {
        serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com"
        }))
        .unwrap()
    }

    #[test]
    fn test_minimal_input_valid() {
        let request = minimal().validate().unwrap();
        assert_eq!(request.name, "Ada");
        assert_eq!(request.email.as_str(), "ada@example.com");
        assert_eq!(request.details, MuralDetails::default());
    }

    #[test]
    fn test_rejects_malformed_email() {
        let input = SubmitMuralRequestInput {
            email: "not-an-email".into(),
            ..minimal()
        };
        assert_eq!(input.validate().unwrap_err().field, "email");
    }

    #[test]
    fn test_rejects_blank_name() {
        let input = SubmitMuralRequestInput {
            name: "  ".into(),
            ..minimal()
        };
        assert_eq!(input.validate().unwrap_err().field, "name");
    }

    #[test]
    fn test_details_camel_case_and_flattened() {
        let input: SubmitMuralRequestInput = serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "wallSize": "4m x 3m",
            "additionalNotes": "  north-facing  "
        }))
        .unwrap();
        let new = input.validate().unwrap();
        assert_eq!(new.details.wall_size.as_deref(), Some("4m x 3m"));
        assert_eq!(new.details.additional_notes.as_deref(), Some("north-facing"));

        let request = MuralRequest {
            id: MuralRequestId::generate(),
            name: new.name,
            email: new.email,
            details: new.details,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["wallSize"], "4m x 3m");
        assert!(json.get("details").is_none());
    }
}
