use std::env;

use crate::auth::ApiKey;

/// Port used when `PORT` is unset or unparseable.
pub const DEFAULT_PORT: u16 = 3000;

/// AppConfig
///
/// Holds the application's entire configuration state. Loaded once at startup and
/// immutable afterwards; handlers and extractors pull it out of the shared state via
/// `FromRef` instead of reading the process environment per request.
#[derive(Clone, Debug)]
pub struct AppConfig {
    // Runtime environment marker. Controls the log output format.
    pub env: Env,
    // The Configured Secret checked by the API-key gate on every protected request.
    pub api_key: ApiKey,
    // TCP port the HTTP server binds to.
    pub port: u16,
}

/// Env
///
/// Defines the runtime context: human-readable logs locally, JSON logs in production.
#[derive(Clone, PartialEq, Debug)]
pub enum Env {
    Local,
    Production,
}

impl Default for AppConfig {
    /// default
    ///
    /// Provides a safe, non-panicking AppConfig instance primarily used for test setup.
    /// The API key is left unconfigured, so the gate rejects everything until a test
    /// opts in with [`AppConfig::with_api_key`].
    fn default() -> Self {
        Self {
            env: Env::Local,
            api_key: ApiKey::unset(),
            port: DEFAULT_PORT,
        }
    }
}

impl AppConfig {
    /// load
    ///
    /// The canonical function for initializing the application configuration at startup.
    /// Reads `APP_ENV`, `API_KEY` and `PORT` from the environment.
    ///
    /// A missing or blank `API_KEY` does not abort startup: it yields an unconfigured
    /// key and the gate stays closed. `main` reports this once logging is up.
    pub fn load() -> Self {
        let env = match env::var("APP_ENV").as_deref() {
            Ok("production") => Env::Production,
            _ => Env::Local,
        };

        let api_key = env::var("API_KEY")
            .map(|value| ApiKey::new(value.trim()))
            .unwrap_or_else(|_| ApiKey::unset());

        let port = match env::var("PORT") {
            Ok(raw) => raw.trim().parse::<u16>().unwrap_or_else(|e| {
                tracing::warn!("Invalid PORT value {raw:?}: {e}, using default {DEFAULT_PORT}");
                DEFAULT_PORT
            }),
            Err(_) => DEFAULT_PORT,
        };

        Self { env, api_key, port }
    }

    /// Returns a copy of this configuration with the given secret installed.
    pub fn with_api_key(mut self, secret: impl Into<String>) -> Self {
        self.api_key = ApiKey::new(secret);
        self
    }
}
