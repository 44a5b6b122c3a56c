//! Booking intake subsystem.
//!
//! # Data Flow
//! ```text
//! POST /api/book (JSON)
//!     → types.rs (BookingRequest, every field optional)
//!     → service.rs (pipeline)
//!         → validation.rs (token presence)
//!         → captcha (remote verification)
//!         → validation.rs (required fields, mobile, outstation rule)
//!         → store (append Booking with createdAt)
//!         → notify (operator email, policy-controlled)
//!     → error.rs (typed outcome → HTTP status + envelope)
//! ```

pub mod error;
pub mod service;
pub mod types;
pub mod validation;

pub use error::{BookingError, Rejection};
pub use service::{BookingService, StepDeadlines};
pub use types::{Booking, BookingReceipt, BookingRequest, NewBooking};
