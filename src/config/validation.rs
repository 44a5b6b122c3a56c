//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check that every collaborator has the credentials it needs
//! - Validate value ranges (timeouts > 0, limits > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: BookingConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::config::schema::BookingConfig;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is required")]
    Missing { field: &'static str },

    #[error("{field} must be greater than zero")]
    NotPositive { field: &'static str },

    #[error("{field} is not a valid socket address: {value}")]
    BadAddress { field: &'static str, value: String },

    #[error("{field} is not a valid URL: {reason}")]
    BadUrl { field: &'static str, reason: String },

    #[error("store.uri must start with mongodb:// or mongodb+srv://")]
    BadMongoUri,

    #[error("timeouts.request_secs ({request}s) must exceed the captcha, store and mailer deadlines combined ({steps}s)")]
    RequestDeadlineTooShort { request: u64, steps: u64 },
}

pub fn validate_config(config: &BookingConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address(&mut errors, "listener.bind_address", &config.listener.bind_address);
    if config.observability.metrics_enabled {
        check_address(
            &mut errors,
            "observability.metrics_address",
            &config.observability.metrics_address,
        );
    }

    if config.rate_limit.enabled {
        check_positive(&mut errors, "rate_limit.max_attempts", config.rate_limit.max_attempts as u64);
        check_positive(&mut errors, "rate_limit.window_secs", config.rate_limit.window_secs);
        check_positive(
            &mut errors,
            "rate_limit.sweep_interval_secs",
            config.rate_limit.sweep_interval_secs,
        );
    }

    check_present(&mut errors, "captcha.secret", &config.captcha.secret);
    if let Err(e) = url::Url::parse(&config.captcha.verify_url) {
        errors.push(ValidationError::BadUrl {
            field: "captcha.verify_url",
            reason: e.to_string(),
        });
    }
    check_positive(&mut errors, "captcha.timeout_secs", config.captcha.timeout_secs);

    if config.store.uri.is_empty() {
        errors.push(ValidationError::Missing { field: "store.uri" });
    } else if !(config.store.uri.starts_with("mongodb://")
        || config.store.uri.starts_with("mongodb+srv://"))
    {
        errors.push(ValidationError::BadMongoUri);
    }
    check_present(&mut errors, "store.collection", &config.store.collection);
    check_positive(&mut errors, "store.timeout_secs", config.store.timeout_secs);

    check_present(&mut errors, "mailer.smtp_host", &config.mailer.smtp_host);
    check_present(&mut errors, "mailer.username", &config.mailer.username);
    check_present(&mut errors, "mailer.password", &config.mailer.password);
    check_positive(&mut errors, "mailer.timeout_secs", config.mailer.timeout_secs);

    check_positive(&mut errors, "timeouts.request_secs", config.timeouts.request_secs);
    // A step that runs out of time must fail before the request does
    let steps = config
        .captcha
        .timeout_secs
        .saturating_add(config.store.timeout_secs)
        .saturating_add(config.mailer.timeout_secs);
    if config.timeouts.request_secs <= steps {
        errors.push(ValidationError::RequestDeadlineTooShort {
            request: config.timeouts.request_secs,
            steps,
        });
    }
    check_positive(&mut errors, "security.max_body_size", config.security.max_body_size as u64);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_present(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(ValidationError::Missing { field });
    }
}

fn check_positive(errors: &mut Vec<ValidationError>, field: &'static str, value: u64) {
    if value == 0 {
        errors.push(ValidationError::NotPositive { field });
    }
}

fn check_address(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    if value.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BadAddress {
            field,
            value: value.to_string(),
        });
    }
}
