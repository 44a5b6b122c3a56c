//! Submission gates that run without touching any collaborator.

use std::sync::LazyLock;

use regex::Regex;

use crate::booking::error::Rejection;
use crate::booking::types::{BookingRequest, NewBooking, OUTSTATION};

// 10-digit Indian mobile number. ASCII digits only.
static MOBILE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").expect("mobile pattern is valid"));

/// Gate 2: a verification token must be present and non-empty.
pub fn require_token(request: &BookingRequest) -> Result<&str, Rejection> {
    match request.token() {
        Some(token) if !token.is_empty() => Ok(token),
        _ => Err(Rejection::CaptchaRequired),
    }
}

pub fn is_valid_mobile(mobile: &str) -> bool {
    MOBILE_PATTERN.is_match(mobile)
}

/// Gates 4 to 6: required fields, mobile format, outstation city rule.
pub fn validate(request: BookingRequest) -> Result<NewBooking, Rejection> {
    let (Some(pickup_city), Some(drop_city), Some(mobile), Some(name)) = (
        non_empty(request.pickup_city),
        non_empty(request.drop_city),
        non_empty(request.mobile),
        non_empty(request.name),
    ) else {
        return Err(Rejection::MissingFields);
    };

    if !is_valid_mobile(&mobile) {
        return Err(Rejection::InvalidMobile);
    }

    if request.ride_type.as_deref() == Some(OUTSTATION) && pickup_city == drop_city {
        return Err(Rejection::SameCityOutstation);
    }

    Ok(NewBooking {
        ride_type: request.ride_type,
        pickup_city,
        drop_city,
        pickup_address: request.pickup_address,
        date: request.date,
        time: request.time,
        vehicle: request.vehicle,
        name,
        mobile,
        instructions: request.instructions,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
