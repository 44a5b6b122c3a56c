//! Human-verification subsystem.
//!
//! # Data Flow
//! ```text
//! BookingService
//!     → HumanVerifier::verify(token, client ip)
//!     → recaptcha.rs (POST siteverify with secret + token)
//!     → Ok(true)  : continue pipeline
//!       Ok(false) : client rejection "Captcha verification failed"
//!       Err(_)    : server error, request fails with 500
//! ```
//!
//! # Security Constraints
//! - The shared secret is never logged
//! - An unreachable service is a failure, never a pass

pub mod recaptcha;

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

pub use recaptcha::RecaptchaVerifier;

/// Errors talking to the verification service. A negative verdict is not an error.
#[derive(Debug, Error)]
pub enum VerifyError {
    /// Request failed, timed out, returned non-2xx, or the body did not decode.
    #[error("verification request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("verification did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Checks a client-supplied challenge token.
#[async_trait]
pub trait HumanVerifier: Send + Sync {
    /// Returns the service's verdict for `token`.
    async fn verify(&self, token: &str, remote_ip: Option<IpAddr>) -> Result<bool, VerifyError>;
}
