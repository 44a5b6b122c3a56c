//! Booking request and record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ride type that forbids identical pickup and drop cities.
pub const OUTSTATION: &str = "outstation";

/// Form submission accepted by `POST /api/book`.
///
/// Every field is optional here so that a missing field reaches the
/// required-field gate instead of failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BookingRequest {
    pub ride_type: Option<String>,
    pub pickup_city: Option<String>,
    pub drop_city: Option<String>,
    pub pickup_address: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub vehicle: Option<String>,
    pub name: Option<String>,
    pub mobile: Option<String>,
    pub instructions: Option<String>,
    /// Human-verification token.
    pub verification_token: Option<String>,
    /// Name older forms post the token under. Both may be present.
    #[serde(rename = "recaptchaToken", skip_serializing_if = "Option::is_none")]
    pub legacy_token: Option<String>,
}

impl BookingRequest {
    /// The submitted token, preferring `verificationToken` when it is non-empty.
    pub fn token(&self) -> Option<&str> {
        self.verification_token
            .as_deref()
            .filter(|t| !t.is_empty())
            .or(self.legacy_token.as_deref())
    }
}

/// A submission that passed every validation gate, not yet stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub ride_type: Option<String>,
    pub pickup_city: String,
    pub drop_city: String,
    pub pickup_address: Option<String>,
    pub date: Option<String>,
    pub time: Option<String>,
    pub vehicle: Option<String>,
    pub name: String,
    pub mobile: String,
    pub instructions: Option<String>,
}

impl NewBooking {
    /// Stamp the booking with its creation time.
    pub fn into_booking(self, created_at: DateTime<Utc>) -> Booking {
        Booking {
            ride_type: self.ride_type,
            pickup_city: self.pickup_city,
            drop_city: self.drop_city,
            pickup_address: self.pickup_address,
            date: self.date,
            time: self.time,
            vehicle: self.vehicle,
            name: self.name,
            mobile: self.mobile,
            instructions: self.instructions,
            created_at,
        }
    }
}

/// The persisted booking document.
///
/// Field names are camelCase and absent optional fields are omitted, which is
/// the layout existing `bookings` collections already hold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ride_type: Option<String>,
    pub pickup_city: String,
    pub drop_city: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pickup_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vehicle: Option<String>,
    pub name: String,
    pub mobile: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
    #[serde(with = "bson::serde_helpers::chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn is_outstation(&self) -> bool {
        self.ride_type.as_deref() == Some(OUTSTATION)
    }
}

/// Outcome of a successful submission. Never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingReceipt {
    /// Identifier assigned by the store.
    pub booking_id: String,
    /// Whether the operator notification was delivered.
    pub notified: bool,
}
