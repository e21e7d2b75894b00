//! Caller identity extraction.
//!
//! The identity provider writes a [`CurrentUser`] into the session; handlers
//! receive it through the [`Caller`] extractor and never reject on its absence.
//! Role checks live in [`crate::authz`].

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use crate::error::set_sentry_user;
use crate::models::{CurrentUser, session_keys};

/// The session identity of the caller, or `None` for anonymous requests.
///
/// A missing session layer, a missing key or an undecodable value all read as
/// anonymous. Session store failures are logged and also read as anonymous.
///
/// # Example
///
/// ```rust,ignore
/// async fn handler(Caller(user): Caller) -> impl IntoResponse {
///     match user {
///         Some(u) => format!("Hello, {}!", u.id),
///         None => "Hello, guest!".to_string(),
///     }
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub Option<CurrentUser>);

impl Caller {
    #[must_use]
    pub fn user(&self) -> Option<&CurrentUser> {
        self.0.as_ref()
    }
}

impl<S> FromRequestParts<S> for Caller
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = match parts.extensions.get::<Session>() {
            Some(session) => match session
                .get::<CurrentUser>(session_keys::CURRENT_USER)
                .await
            {
                Ok(user) => user,
                Err(e) => {
                    tracing::warn!(error = %e, "Failed to read current user from session");
                    None
                }
            },
            None => None,
        };

        if let Some(user) = &user {
            set_sentry_user(&user.id, user.email.as_deref());
        }

        Ok(Self(user))
    }
}

/// Store the caller's identity in the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn set_current_user(
    session: &Session,
    user: &CurrentUser,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CURRENT_USER, user).await
}

/// Remove the caller's identity from the session.
///
/// # Errors
///
/// Returns an error if the session cannot be modified.
pub async fn clear_current_user(session: &Session) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<CurrentUser>(session_keys::CURRENT_USER)
        .await?;
    Ok(())
}
