//! Security subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming booking request:
//!     → body limit (tower-http, configured in http::server)
//!     → rate_limit.rs (per-address sliding window)
//!     → Pass to booking handler
//! ```
//!
//! # Design Decisions
//! - Rate limiting runs before the body is parsed, so malformed payloads count too
//! - Fail closed: reject on any security check failure
//! - No trust in client input (X-Forwarded-For only when configured)

pub mod rate_limit;

pub use rate_limit::{rate_limit_middleware, RateDecision, RateLimiter, RATE_LIMIT_MESSAGE};
