//! Session-related types.
//!
//! The session provider writes the caller's identity under
//! [`session_keys::CURRENT_USER`]; this API only reads it (and clears it on logout).

use serde::{Deserialize, Serialize};

use scalebreakers_core::Role;

/// Session-stored user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    /// Identity provider's user id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
}

/// Session keys for authentication data.
pub mod session_keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";
}
