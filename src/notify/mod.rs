//! Operator notification subsystem.
//!
//! # Data Flow
//! ```text
//! Stored Booking
//!     → email.rs (render HTML summary)
//!     → smtp.rs (authenticated SMTP relay to the operator inbox)
//! ```
//!
//! Whether a send failure fails the request is decided by the pipeline's
//! `NotifyFailurePolicy`, not here.

pub mod email;
pub mod smtp;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::booking::Booking;

pub use email::render_booking_email;
pub use smtp::SmtpNotifier;

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("invalid mail address: {0}")]
    Address(#[from] lettre::address::AddressError),

    #[error("failed to build message: {0}")]
    Message(#[from] lettre::error::Error),

    #[error("SMTP error: {0}")]
    Smtp(#[from] lettre::transport::smtp::Error),

    #[error("notification did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Tells the operator a booking arrived.
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    async fn notify(&self, booking: &Booking) -> Result<(), NotifyError>;
}
