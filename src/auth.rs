use std::{fmt, sync::Arc};

use axum::{
    extract::{FromRef, FromRequestParts, Request},
    http::{HeaderMap, HeaderName, request::Parts},
    middleware::Next,
    response::Response,
};

use crate::{config::AppConfig, error::AuthError};

/// Header carrying the shared secret. Header names are case-insensitive, so
/// `X-API-Key` and `X-API-KEY` resolve to the same entry.
pub const X_API_KEY: HeaderName = HeaderName::from_static("x-api-key");

/// ApiKey
///
/// The Configured Secret. Loaded once into `AppConfig` and shared read-only across all
/// requests, so no locking is involved. An empty secret is stored as unconfigured,
/// and an unconfigured key matches nothing.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ApiKey(Option<Arc<str>>);

impl ApiKey {
    pub fn new(secret: impl Into<String>) -> Self {
        let secret = secret.into();
        if secret.is_empty() {
            Self::unset()
        } else {
            Self(Some(Arc::from(secret)))
        }
    }

    pub fn unset() -> Self {
        Self(None)
    }

    pub fn is_configured(&self) -> bool {
        self.0.is_some()
    }

    /// Exact, case-sensitive comparison of a presented key against the secret.
    ///
    /// Plain `==` is not constant-time; callers on untrusted networks should keep
    /// that in mind.
    pub fn matches(&self, presented: Option<&str>) -> bool {
        match (self.0.as_deref(), presented) {
            (Some(secret), Some(presented)) if !presented.is_empty() => secret == presented,
            _ => false,
        }
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(_) => f.write_str("ApiKey(<redacted>)"),
            None => f.write_str("ApiKey(<unset>)"),
        }
    }
}

/// ApiKeyGate Extractor
///
/// Proof that the request carried the configured API key. Taking it as a handler or
/// middleware argument is enough to protect a route: on failure the extractor rejects
/// with [`AuthError::InvalidApiKey`] (401 + JSON body) before the handler runs.
#[derive(Debug, Clone, Copy)]
pub struct ApiKeyGate;

impl<S> FromRequestParts<S> for ApiKeyGate
where
    S: Send + Sync,
    AppConfig: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let config = AppConfig::from_ref(state);
        let presented = presented_key(&parts.headers);

        if config.api_key.matches(presented) {
            tracing::debug!(path = %parts.uri.path(), "API key accepted");
            Ok(ApiKeyGate)
        } else {
            tracing::warn!(
                path = %parts.uri.path(),
                key_present = presented.is_some(),
                gate_configured = config.api_key.is_configured(),
                "Rejected request with missing or invalid API key"
            );
            Err(AuthError::InvalidApiKey)
        }
    }
}

/// Returns the single `x-api-key` value, if there is exactly one.
///
/// Repeated headers count as absent rather than letting the first one win, and so do
/// non-ASCII values, which cannot equal any secret we accept.
pub fn presented_key(headers: &HeaderMap) -> Option<&str> {
    let mut values = headers.get_all(&X_API_KEY).iter();
    match (values.next(), values.next()) {
        (Some(value), None) => value.to_str().ok(),
        _ => None,
    }
}

/// api_key_middleware
///
/// Route layer for the protected router. The work is done by the `ApiKeyGate`
/// extractor; reaching the body means the key matched, and the request is forwarded
/// untouched.
pub async fn api_key_middleware(_gate: ApiKeyGate, request: Request, next: Next) -> Response {
    next.run(request).await
}
