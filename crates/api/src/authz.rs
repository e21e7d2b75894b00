//! Role-based authorization.
//!
//! [`authorize`] is a pure function of the caller and the required role. Admin
//! handlers call it before they parse input or touch the store.

use scalebreakers_core::Role;

use crate::error::ApiError;
use crate::models::CurrentUser;

/// Outcome of an authorization check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    Denied,
}

impl Authorization {
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Convert a denial into [`ApiError::Forbidden`] with the given message.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Forbidden` when the check was denied.
    pub fn or_forbidden(self, message: &str) -> Result<(), ApiError> {
        match self {
            Self::Allowed => Ok(()),
            Self::Denied => Err(ApiError::Forbidden(message.to_owned())),
        }
    }
}

/// Check whether `caller` holds `required`. Anonymous callers hold no role.
#[must_use]
pub fn authorize(caller: Option<&CurrentUser>, required: Role) -> Authorization {
    match caller {
        Some(user) if user.role.satisfies(required) => Authorization::Allowed,
        _ => Authorization::Denied,
    }
}
