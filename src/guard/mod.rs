//! Role-based route guard for the browser client.
//!
//! The guard decides, synchronously and without side effects, whether a protected
//! view is rendered or the user is sent elsewhere. The current session is passed in
//! explicitly, so the decision can be tested without a rendering framework.

use std::sync::LazyLock;

use chrono::{DateTime, Utc};

pub mod route;
pub mod session;

pub use route::{Navigation, PathParams, Route, RouteAccess, RouteTable};
pub use session::{AuthState, AuthenticatedUser};

pub const ROLE_ADMIN: &str = "admin";
pub const ROLE_CLIENT: &str = "client";

static DEFAULT_TARGETS: LazyLock<RedirectTargets> = LazyLock::new(RedirectTargets::default);

/// Where the guard sends users it will not render for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectTargets {
    /// Used when nobody is signed in (or the session expired).
    pub login: String,
    /// Used when the user is signed in with a different role.
    pub home: String,
}

impl Default for RedirectTargets {
    fn default() -> Self {
        Self {
            login: "/login".to_string(),
            home: "/".to_string(),
        }
    }
}

/// The guard's view of the session relative to one required role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardState {
    Loading,
    Unauthenticated,
    AuthenticatedWrongRole,
    AuthenticatedCorrectRole,
}

/// What the caller should do after consulting the guard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome<V> {
    Render(V),
    Redirect(String),
    /// Session restore still running: render nothing and ask again later.
    Loading,
}

impl<V> GuardOutcome<V> {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            GuardOutcome::Redirect(target) => Some(target),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(V) -> U) -> GuardOutcome<U> {
        match self {
            GuardOutcome::Render(view) => GuardOutcome::Render(f(view)),
            GuardOutcome::Redirect(target) => GuardOutcome::Redirect(target),
            GuardOutcome::Loading => GuardOutcome::Loading,
        }
    }
}

/// RoleGuard
///
/// Renders its children only for a signed-in, unexpired user whose role equals the
/// required role (exact, case-sensitive). Never mutates the session.
#[derive(Debug, Clone, Copy)]
pub struct RoleGuard<'a> {
    required_role: &'a str,
    session: &'a AuthState,
    targets: &'a RedirectTargets,
}

impl<'a> RoleGuard<'a> {
    pub fn new(required_role: &'a str, session: &'a AuthState) -> Self {
        Self {
            required_role,
            session,
            targets: &DEFAULT_TARGETS,
        }
    }

    pub fn with_targets(mut self, targets: &'a RedirectTargets) -> Self {
        self.targets = targets;
        self
    }

    pub fn state(&self) -> GuardState {
        self.state_at(Utc::now())
    }

    pub fn state_at(&self, now: DateTime<Utc>) -> GuardState {
        match self.session {
            AuthState::Loading => GuardState::Loading,
            AuthState::SignedOut => GuardState::Unauthenticated,
            // An expired session is as good as none.
            AuthState::SignedIn(user) if user.is_expired_at(now) => GuardState::Unauthenticated,
            AuthState::SignedIn(user) if user.role == self.required_role => {
                GuardState::AuthenticatedCorrectRole
            }
            AuthState::SignedIn(_) => GuardState::AuthenticatedWrongRole,
        }
    }

    pub fn render<V>(&self, children: V) -> GuardOutcome<V> {
        self.render_at(children, Utc::now())
    }

    pub fn render_at<V>(&self, children: V, now: DateTime<Utc>) -> GuardOutcome<V> {
        match self.state_at(now) {
            GuardState::AuthenticatedCorrectRole => GuardOutcome::Render(children),
            GuardState::Loading => GuardOutcome::Loading,
            GuardState::Unauthenticated => {
                tracing::debug!(role = self.required_role, to = %self.targets.login, "Guard redirect: no session");
                GuardOutcome::Redirect(self.targets.login.clone())
            }
            GuardState::AuthenticatedWrongRole => {
                tracing::debug!(role = self.required_role, to = %self.targets.home, "Guard redirect: role mismatch");
                GuardOutcome::Redirect(self.targets.home.clone())
            }
        }
    }
}
