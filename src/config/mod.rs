//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (MONGO_URI, EMAIL_USER, EMAIL_PASS, RECAPTCHA_SECRET)
//!     → validation.rs (semantic checks)
//!     → BookingConfig (validated, immutable)
//!     → consumed once at startup to build collaborators
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Secrets normally come from the environment, never from logs
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::BookingConfig;
pub use schema::{
    BookingPolicyConfig, CaptchaConfig, ListenerConfig, MailerConfig, NotifyFailurePolicy,
    ObservabilityConfig, RateLimitConfig, SecurityConfig, StoreConfig, TimeoutConfig,
};
