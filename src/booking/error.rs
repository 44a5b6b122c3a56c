//! Typed outcomes of the booking pipeline.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::captcha::VerifyError;
use crate::http::response::ApiResponse;
use crate::notify::NotifyError;
use crate::store::StoreError;

/// A client-side problem with the submission. The display text is sent to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Captcha required")]
    CaptchaRequired,

    #[error("Captcha verification failed")]
    CaptchaFailed,

    #[error("Please fill all required fields")]
    MissingFields,

    #[error("Invalid mobile number")]
    InvalidMobile,

    #[error("Pickup and Drop city cannot be the same for outstation rides")]
    SameCityOutstation,
}

impl Rejection {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            Rejection::CaptchaRequired => "captcha_required",
            Rejection::CaptchaFailed => "captcha_failed",
            Rejection::MissingFields => "missing_fields",
            Rejection::InvalidMobile => "invalid_mobile",
            Rejection::SameCityOutstation => "same_city_outstation",
        }
    }
}

/// Any reason a submission did not end in an acknowledged booking.
#[derive(Debug, Error)]
pub enum BookingError {
    #[error(transparent)]
    Rejected(#[from] Rejection),

    #[error("verification service failed: {0}")]
    Verification(#[from] VerifyError),

    #[error("failed to store booking: {0}")]
    Store(#[from] StoreError),

    #[error("failed to notify operator: {0}")]
    Notify(#[from] NotifyError),
}

impl BookingError {
    /// Metric label.
    pub fn label(&self) -> &'static str {
        match self {
            BookingError::Rejected(rejection) => rejection.label(),
            BookingError::Verification(_) => "verification_error",
            BookingError::Store(_) => "store_error",
            BookingError::Notify(_) => "notify_error",
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        match self {
            BookingError::Rejected(rejection) => (
                StatusCode::BAD_REQUEST,
                Json(ApiResponse::rejected(rejection.to_string())),
            )
                .into_response(),
            // Detail stays in the server log
            other => {
                tracing::error!(error = %other, "Booking failed");
                (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::failed())).into_response()
            }
        }
    }
}
