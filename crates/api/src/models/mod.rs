//! Domain models and request inputs.
//!
//! Response types serialize with camelCase field names. Input types validate
//! into store-ready records before any store access happens.

pub mod mural_request;
pub mod newsletter;
pub mod portfolio;
pub mod product;
pub mod session;
pub mod workshop;

pub use mural_request::{MuralDetails, MuralRequest, NewMuralRequest, SubmitMuralRequestInput};
pub use newsletter::{NewsletterSubscriber, SubscribeInput};
pub use portfolio::PortfolioItem;
pub use product::{
    CreateProductInput, NewProduct, Product, ProductChanges, UpdateProductInput,
};
pub use session::{CurrentUser, session_keys};
pub use workshop::Workshop;

use crate::error::ValidationError;

/// Maximum length of short text fields (names, titles).
pub const MAX_NAME_LENGTH: usize = 255;

/// Trim a required text field, rejecting empty and overlong values.
pub(crate) fn required_text(
    field: &'static str,
    label: &str,
    value: &str,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::new(field, format!("{label} is required")));
    }
    if trimmed.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::new(
            field,
            format!("{label} must be at most {MAX_NAME_LENGTH} characters"),
        ));
    }
    Ok(trimmed.to_owned())
}

/// Trim an optional free-text field; blank becomes `None`.
pub(crate) fn optional_text(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
