//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the booking pipeline's collaborators from validated config
//! - Fail fast: any construction error is fatal
//!
//! Collaborators are built in order: store, verifier, notifier.

use std::sync::Arc;

use thiserror::Error;

use crate::booking::{BookingService, StepDeadlines};
use crate::captcha::{RecaptchaVerifier, VerifyError};
use crate::config::BookingConfig;
use crate::notify::{NotifyError, SmtpNotifier};
use crate::store::{MongoBookingStore, StoreError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("booking store: {0}")]
    Store(#[from] StoreError),

    #[error("verification client: {0}")]
    Verifier(#[from] VerifyError),

    #[error("mailer: {0}")]
    Notifier(#[from] NotifyError),
}

/// Wire the production pipeline: MongoDB, reCAPTCHA and SMTP.
pub async fn build_service(config: &BookingConfig) -> Result<BookingService, StartupError> {
    let store = MongoBookingStore::connect(&config.store).await?;
    let verifier = RecaptchaVerifier::new(&config.captcha)?;
    let notifier = SmtpNotifier::new(&config.mailer)?;

    let deadlines = StepDeadlines::from_config(config);
    tracing::info!(
        notify_failure = ?config.booking.notify_failure,
        smtp_host = %config.mailer.smtp_host,
        ?deadlines,
        "Booking pipeline ready"
    );

    Ok(BookingService::new(
        Arc::new(verifier),
        Arc::new(store),
        Arc::new(notifier),
        config.booking.notify_failure,
    )
    .with_deadlines(deadlines))
}
