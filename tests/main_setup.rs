use invoice_portal::{AppConfig, config::{DEFAULT_PORT, Env}};
use serial_test::serial;
use std::{env, panic};

// --- Setup/Teardown Utilities ---

const CONFIG_VARS: [&str; 3] = ["APP_ENV", "API_KEY", "PORT"];

/// Utility to run a test function and restore environment variables afterward
fn run_with_env<T, R>(test: T, cleanup_vars: &[&'static str]) -> R
where
    T: FnOnce() -> R + panic::UnwindSafe,
{
    // Save current environment variables
    let originals: Vec<(String, Option<String>)> = cleanup_vars
        .iter()
        .map(|&var| (var.to_string(), env::var(var).ok()))
        .collect();

    // Run the test
    let result = panic::catch_unwind(test);

    // Restore original environment variables
    for (key, original_value) in originals.into_iter().rev() {
        unsafe {
            if let Some(val) = original_value {
                env::set_var(&key, val);
            } else {
                env::remove_var(&key);
            }
        }
    }

    // Re-panic if the test failed
    match result {
        Ok(value) => value,
        Err(e) => panic::resume_unwind(e),
    }
}

/// Clears every config variable, applies `vars`, then loads.
fn load_with(vars: &'static [(&'static str, &'static str)]) -> AppConfig {
    run_with_env(
        || {
            unsafe {
                for var in CONFIG_VARS {
                    env::remove_var(var);
                }
                for (key, value) in vars {
                    env::set_var(key, value);
                }
            }
            AppConfig::load()
        },
        &CONFIG_VARS,
    )
}

// --- Tests ---

#[test]
#[serial]
fn test_app_config_local_defaults() {
    let config = load_with(&[]);

    assert_eq!(config.env, Env::Local);
    assert_eq!(config.port, DEFAULT_PORT);
    // No API_KEY: the gate is closed rather than open.
    assert!(!config.api_key.is_configured());
    assert!(!config.api_key.matches(None));
    assert!(!config.api_key.matches(Some("")));
}

#[test]
#[serial]
fn test_app_config_reads_api_key() {
    let config = load_with(&[("API_KEY", "abc123")]);

    assert!(config.api_key.is_configured());
    assert!(config.api_key.matches(Some("abc123")));
    assert!(!config.api_key.matches(Some("ABC123")));
}

#[test]
#[serial]
fn test_app_config_blank_api_key_is_unset() {
    let config = load_with(&[("API_KEY", "   ")]);

    assert!(!config.api_key.is_configured());
    assert!(!config.api_key.matches(Some("   ")));
}

#[test]
#[serial]
fn test_app_config_production_without_key_does_not_panic() {
    let config = load_with(&[("APP_ENV", "production")]);

    assert_eq!(config.env, Env::Production);
    assert!(!config.api_key.is_configured());
}

#[test]
#[serial]
fn test_app_config_port_parsing() {
    let config = load_with(&[("PORT", "8080")]);
    assert_eq!(config.port, 8080);

    let config = load_with(&[("PORT", "not-a-port")]);
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
#[serial]
fn test_app_config_is_snapshot_at_load() {
    // Changing the environment after load must not affect an already-loaded config.
    let config = load_with(&[("API_KEY", "first")]);

    run_with_env(
        || {
            unsafe { env::set_var("API_KEY", "second") };
        },
        &["API_KEY"],
    );

    assert!(config.api_key.matches(Some("first")));
    assert!(!config.api_key.matches(Some("second")));
}

#[test]
fn test_app_config_default_is_closed() {
    let config = AppConfig::default();
    assert_eq!(config.env, Env::Local);
    assert!(!config.api_key.is_configured());
}
