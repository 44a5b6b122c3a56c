//! Booking route handler and the middleware error handler.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    BoxError, Json,
};
use tower::timeout::error::Elapsed;

use crate::booking::{BookingError, BookingRequest};
use crate::http::response::ApiResponse;
use crate::http::server::AppState;
use crate::observability::metrics;

pub const MALFORMED_BODY_MESSAGE: &str = "Invalid request body";

/// `POST /api/book`
pub async fn book(
    State(state): State<AppState>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    payload: Result<Json<BookingRequest>, JsonRejection>,
) -> Response {
    let start = Instant::now();
    let client_ip = addr.ip();

    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(client = %client_ip, error = %rejection.body_text(), "Malformed booking payload");
            metrics::record_booking("malformed_body", start);
            let status = if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                StatusCode::PAYLOAD_TOO_LARGE
            } else {
                StatusCode::BAD_REQUEST
            };
            return (status, Json(ApiResponse::rejected(MALFORMED_BODY_MESSAGE))).into_response();
        }
    };

    match state.service.submit(request, Some(client_ip)).await {
        Ok(receipt) => {
            tracing::info!(
                client = %client_ip,
                booking_id = %receipt.booking_id,
                notified = receipt.notified,
                "Booking accepted"
            );
            metrics::record_booking("accepted", start);
            (StatusCode::OK, Json(ApiResponse::ok())).into_response()
        }
        Err(e) => {
            if let BookingError::Rejected(reason) = &e {
                tracing::info!(client = %client_ip, reason = %reason, "Booking rejected");
            }
            metrics::record_booking(e.label(), start);
            e.into_response()
        }
    }
}

/// Error handler for the middleware stack. Answers with the same envelope as
/// any other server-side failure.
pub async fn request_failed(err: BoxError) -> Response {
    if err.is::<Elapsed>() {
        tracing::error!("Booking request exceeded the request deadline");
        metrics::record_booking_timeout();
    } else {
        tracing::error!(error = %err, "Booking request failed in middleware");
    }
    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiResponse::failed())).into_response()
}
