//! Client-side session model: who is signed in, and whether we know yet.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// AuthenticatedUser
///
/// The browser's view of the logged-in identity. Created on login or sign-up and
/// dropped on logout or expiry. Exported to TypeScript so the client and this crate
/// agree on the shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct AuthenticatedUser {
    // Only `token` and `role` are guaranteed by the client; the rest is optional.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub email: Option<String>,
    // Session token issued at login. Opaque to the guard.
    pub token: String,
    // The RBAC field: 'admin' or 'client'.
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(optional)]
    pub expires_at: Option<DateTime<Utc>>,
}

impl AuthenticatedUser {
    pub fn new(token: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            id: None,
            email: None,
            token: token.into(),
            role: role.into(),
            expires_at: None,
        }
    }

    pub fn with_id(mut self, id: Uuid) -> Self {
        self.id = Some(id);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_expiry(mut self, expires_at: DateTime<Utc>) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    /// A session without an expiry never expires on the client side.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at <= now)
    }
}

/// AuthState
///
/// The value the route guard reads instead of an ambient global. `Loading` covers
/// the window where a stored session is being restored, so a page reload does not
/// bounce a signed-in user to the login view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AuthState {
    Loading,
    #[default]
    SignedOut,
    SignedIn(AuthenticatedUser),
}

impl AuthState {
    /// Maps a nullable user (`user: null | {...}`) onto a settled state.
    pub fn from_user(user: Option<AuthenticatedUser>) -> Self {
        match user {
            Some(user) => AuthState::SignedIn(user),
            None => AuthState::SignedOut,
        }
    }

    pub fn begin_loading(&mut self) {
        *self = AuthState::Loading;
    }

    pub fn sign_in(&mut self, user: AuthenticatedUser) {
        *self = AuthState::SignedIn(user);
    }

    pub fn sign_out(&mut self) {
        *self = AuthState::SignedOut;
    }

    pub fn user(&self) -> Option<&AuthenticatedUser> {
        match self {
            AuthState::SignedIn(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, AuthState::Loading)
    }
}
