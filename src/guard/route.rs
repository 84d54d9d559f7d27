//! Declarative client-side routes: a URL pattern, the role it needs, and the view.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use super::{AuthState, GuardOutcome, RedirectTargets, RoleGuard};
use crate::error::RouteError;

/// Parameters captured from `{name}` segments.
pub type PathParams = HashMap<String, String>;

/// Who may see a route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteAccess {
    Public,
    Role(String),
}

#[derive(Debug, Clone)]
pub struct Route<V> {
    /// axum-style pattern, e.g. `/invoices/{id}`.
    pub pattern: String,
    pub access: RouteAccess,
    pub view: V,
}

/// Result of resolving a navigation against the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation<'a, V> {
    Render { view: &'a V, params: PathParams },
    Redirect(String),
    Loading,
    NotFound,
}

/// RouteTable
///
/// Client routes matched with the same `matchit` router axum uses on the server, so
/// patterns read identically on both sides. Static segments take priority over
/// `{param}` segments; two patterns that would match the same paths are rejected at
/// declaration. Role routes are resolved through [`RoleGuard`] with the table's
/// redirect targets.
pub struct RouteTable<V> {
    routes: Vec<Route<V>>,
    matcher: matchit::Router<usize>,
    targets: RedirectTargets,
}

impl<V> Default for RouteTable<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> RouteTable<V> {
    pub fn new() -> Self {
        Self {
            routes: Vec::new(),
            matcher: matchit::Router::new(),
            targets: RedirectTargets::default(),
        }
    }

    pub fn with_targets(mut self, targets: RedirectTargets) -> Self {
        self.targets = targets;
        self
    }

    pub fn route_public(self, pattern: &str, view: V) -> Result<Self, RouteError> {
        self.push(pattern, RouteAccess::Public, view)
    }

    pub fn route_for_role(
        self,
        pattern: &str,
        role: impl Into<String>,
        view: V,
    ) -> Result<Self, RouteError> {
        self.push(pattern, RouteAccess::Role(role.into()), view)
    }

    fn push(mut self, pattern: &str, access: RouteAccess, view: V) -> Result<Self, RouteError> {
        if !pattern.starts_with('/') {
            return Err(RouteError::MissingLeadingSlash(pattern.to_string()));
        }

        self.matcher
            .insert(pattern, self.routes.len())
            .map_err(|e| RouteError::InvalidPattern {
                pattern: pattern.to_string(),
                reason: e.to_string(),
            })?;

        self.routes.push(Route {
            pattern: pattern.to_string(),
            access,
            view,
        });
        Ok(self)
    }

    pub fn routes(&self) -> &[Route<V>] {
        &self.routes
    }

    pub fn navigate(&self, path: &str, session: &AuthState) -> Navigation<'_, V> {
        self.navigate_at(path, session, Utc::now())
    }

    pub fn navigate_at(
        &self,
        path: &str,
        session: &AuthState,
        now: DateTime<Utc>,
    ) -> Navigation<'_, V> {
        let Ok(matched) = self.matcher.at(normalize_path(path)) else {
            tracing::debug!(path, "No client route matches");
            return Navigation::NotFound;
        };

        let route = &self.routes[*matched.value];
        let params: PathParams = matched
            .params
            .iter()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        let outcome = match &route.access {
            RouteAccess::Public => GuardOutcome::Render(&route.view),
            RouteAccess::Role(role) => RoleGuard::new(role, session)
                .with_targets(&self.targets)
                .render_at(&route.view, now),
        };

        match outcome {
            GuardOutcome::Render(view) => Navigation::Render { view, params },
            GuardOutcome::Redirect(target) => Navigation::Redirect(target),
            GuardOutcome::Loading => Navigation::Loading,
        }
    }
}

/// Drops the query string and fragment, and any trailing slash except the root's.
fn normalize_path(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    match path.trim_end_matches('/') {
        "" => "/",
        trimmed => trimmed,
    }
}
