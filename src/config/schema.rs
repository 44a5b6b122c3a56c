//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the booking service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the booking service.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BookingConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Per-address rate limiting for the booking route.
    pub rate_limit: RateLimitConfig,

    /// Human-verification (reCAPTCHA) settings.
    pub captcha: CaptchaConfig,

    /// Booking persistence settings.
    pub store: StoreConfig,

    /// Operator notification mail settings.
    pub mailer: MailerConfig,

    /// Booking pipeline policy.
    pub booking: BookingPolicyConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Request size and CORS settings.
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:3000").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:3000".to_string(),
        }
    }
}

/// Rate limiting configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RateLimitConfig {
    /// Enable rate limiting.
    pub enabled: bool,

    /// Maximum booking attempts per address inside one window.
    pub max_attempts: u32,

    /// Sliding window length in seconds.
    pub window_secs: u64,

    /// Key clients by the first `X-Forwarded-For` entry instead of the peer address.
    /// Only enable behind a proxy that overwrites the header.
    pub trust_forwarded_for: bool,

    /// How often idle client windows are dropped.
    pub sweep_interval_secs: u64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_attempts: 10,
            window_secs: 15 * 60,
            trust_forwarded_for: false,
            sweep_interval_secs: 60,
        }
    }
}

/// Human-verification service configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct CaptchaConfig {
    /// Site verification endpoint.
    pub verify_url: String,

    /// Shared secret (overridden by `RECAPTCHA_SECRET`).
    pub secret: String,

    /// Verification request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for CaptchaConfig {
    fn default() -> Self {
        Self {
            verify_url: "https://www.google.com/recaptcha/api/siteverify".to_string(),
            secret: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Persistence configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StoreConfig {
    /// MongoDB connection string (overridden by `MONGO_URI`).
    pub uri: String,

    /// Database name. Falls back to the database named in the URI, then "test".
    pub database: Option<String>,

    /// Collection holding booking documents.
    pub collection: String,

    /// Deadline for one insert, including server selection, in seconds.
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: String::new(),
            database: None,
            collection: "bookings".to_string(),
            timeout_secs: 5,
        }
    }
}

/// SMTP notification configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MailerConfig {
    /// SMTP relay host (implicit TLS on 465).
    pub smtp_host: String,

    /// SMTP login, also the sender address (overridden by `EMAIL_USER`).
    pub username: String,

    /// SMTP password (overridden by `EMAIL_PASS`).
    pub password: String,

    /// Display name on the From header.
    pub sender_name: String,

    /// Operator inbox. Defaults to the sender address.
    pub recipient: Option<String>,

    /// Subject line of the notification.
    pub subject: String,

    /// Deadline for delivering one notification, in seconds.
    pub timeout_secs: u64,
}

impl MailerConfig {
    /// The address notifications are delivered to.
    pub fn recipient(&self) -> &str {
        self.recipient.as_deref().unwrap_or(&self.username)
    }
}

impl Default for MailerConfig {
    fn default() -> Self {
        Self {
            smtp_host: "smtp.gmail.com".to_string(),
            username: String::new(),
            password: String::new(),
            sender_name: "Lotus Cabs Booking".to_string(),
            recipient: None,
            subject: "New Ride Booking Received".to_string(),
            timeout_secs: 10,
        }
    }
}

/// What the client is told when the booking was stored but the operator email failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum NotifyFailurePolicy {
    /// Report the request as failed (HTTP 500).
    #[default]
    Fail,
    /// Log the failure and acknowledge the booking.
    BestEffort,
}

/// Booking pipeline policy.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct BookingPolicyConfig {
    pub notify_failure: NotifyFailurePolicy,
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request deadline in seconds. Must exceed the sum of the
    /// captcha, store and mailer deadlines.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` takes precedence.
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum body size in bytes.
    pub max_body_size: usize,
    /// Allow cross-origin requests from any origin.
    pub cors_permissive: bool,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
            cors_permissive: true,
        }
    }
}
