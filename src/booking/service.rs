//! The booking intake pipeline.
//!
//! # Steps
//! ```text
//! require_token → verify → validate → persist → notify → receipt
//! ```
//! Each step returns a typed error; the first failure ends the request.
//! Every collaborator call runs under its own deadline, so a hung service
//! becomes a typed error before the HTTP request deadline fires.
//! Rate limiting happens before this, in the HTTP layer.

use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;

use crate::booking::error::{BookingError, Rejection};
use crate::booking::types::{Booking, BookingReceipt, BookingRequest};
use crate::booking::validation;
use crate::captcha::{HumanVerifier, VerifyError};
use crate::config::{BookingConfig, NotifyFailurePolicy};
use crate::notify::{BookingNotifier, NotifyError};
use crate::observability::metrics;
use crate::store::{BookingStore, StoreError};

/// Per-collaborator time limits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepDeadlines {
    pub verify: Duration,
    pub store: Duration,
    pub notify: Duration,
}

impl StepDeadlines {
    pub fn from_config(config: &BookingConfig) -> Self {
        Self {
            verify: Duration::from_secs(config.captcha.timeout_secs),
            store: Duration::from_secs(config.store.timeout_secs),
            notify: Duration::from_secs(config.mailer.timeout_secs),
        }
    }
}

impl Default for StepDeadlines {
    fn default() -> Self {
        Self::from_config(&BookingConfig::default())
    }
}

/// Collaborators are injected once at startup and shared by all requests.
#[derive(Clone)]
pub struct BookingService {
    verifier: Arc<dyn HumanVerifier>,
    store: Arc<dyn BookingStore>,
    notifier: Arc<dyn BookingNotifier>,
    notify_failure: NotifyFailurePolicy,
    deadlines: StepDeadlines,
}

impl BookingService {
    pub fn new(
        verifier: Arc<dyn HumanVerifier>,
        store: Arc<dyn BookingStore>,
        notifier: Arc<dyn BookingNotifier>,
        notify_failure: NotifyFailurePolicy,
    ) -> Self {
        Self {
            verifier,
            store,
            notifier,
            notify_failure,
            deadlines: StepDeadlines::default(),
        }
    }

    pub fn with_deadlines(mut self, deadlines: StepDeadlines) -> Self {
        self.deadlines = deadlines;
        self
    }

    pub fn deadlines(&self) -> StepDeadlines {
        self.deadlines
    }

    pub fn notify_failure_policy(&self) -> NotifyFailurePolicy {
        self.notify_failure
    }

    /// Run a submission through every gate.
    pub async fn submit(
        &self,
        request: BookingRequest,
        client_ip: Option<IpAddr>,
    ) -> Result<BookingReceipt, BookingError> {
        let token = validation::require_token(&request)?;
        let verdict = tokio::time::timeout(self.deadlines.verify, self.verifier.verify(token, client_ip))
            .await
            .map_err(|_| VerifyError::TimedOut(self.deadlines.verify))??;
        if !verdict {
            return Err(Rejection::CaptchaFailed.into());
        }

        let booking = validation::validate(request)?.into_booking(Utc::now());

        let booking_id = tokio::time::timeout(self.deadlines.store, self.store.insert(&booking))
            .await
            .map_err(|_| StoreError::TimedOut(self.deadlines.store))??;
        tracing::info!(booking_id = %booking_id, ride_type = ?booking.ride_type, "Booking stored");

        let notified = self.notify(&booking, &booking_id).await?;

        Ok(BookingReceipt {
            booking_id,
            notified,
        })
    }

    /// Returns whether the email went out. Under `Fail` a send error aborts the request
    /// even though the booking is already stored.
    async fn notify(&self, booking: &Booking, booking_id: &str) -> Result<bool, BookingError> {
        let sent = tokio::time::timeout(self.deadlines.notify, self.notifier.notify(booking))
            .await
            .unwrap_or(Err(NotifyError::TimedOut(self.deadlines.notify)));

        match sent {
            Ok(()) => Ok(true),
            Err(e) => {
                metrics::record_notify_failure();
                match self.notify_failure {
                    NotifyFailurePolicy::Fail => {
                        tracing::error!(
                            booking_id = %booking_id,
                            error = %e,
                            "Operator notification failed; booking stored but request reported as failed"
                        );
                        Err(e.into())
                    }
                    NotifyFailurePolicy::BestEffort => {
                        tracing::warn!(
                            booking_id = %booking_id,
                            error = %e,
                            "Operator notification failed; booking acknowledged"
                        );
                        Ok(false)
                    }
                }
            }
        }
    }
}
