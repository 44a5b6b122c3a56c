//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::config::schema::BookingConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variables that override the file configuration.
pub const ENV_MONGO_URI: &str = "MONGO_URI";
pub const ENV_EMAIL_USER: &str = "EMAIL_USER";
pub const ENV_EMAIL_PASS: &str = "EMAIL_PASS";
pub const ENV_RECAPTCHA_SECRET: &str = "RECAPTCHA_SECRET";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment overrides, and validate.
pub fn load_config(path: Option<&Path>) -> Result<BookingConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => BookingConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay credentials and connection strings from the environment.
///
/// Empty values are ignored so an unset `.env` entry does not wipe the file value.
pub fn apply_env_overrides<F>(config: &mut BookingConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.is_empty());

    if let Some(uri) = get(ENV_MONGO_URI) {
        config.store.uri = uri;
    }
    if let Some(user) = get(ENV_EMAIL_USER) {
        config.mailer.username = user;
    }
    if let Some(pass) = get(ENV_EMAIL_PASS) {
        config.mailer.password = pass;
    }
    if let Some(secret) = get(ENV_RECAPTCHA_SECRET) {
        config.captcha.secret = secret;
    }
}
