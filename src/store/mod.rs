//! Booking persistence subsystem.
//!
//! The service only appends: one `insert` per accepted submission, no updates,
//! no deletes. Write atomicity is the store's concern (one document per booking).

pub mod memory;
pub mod mongo;

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::booking::Booking;

pub use memory::InMemoryBookingStore;
pub use mongo::MongoBookingStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("MongoDB error: {0}")]
    Mongo(#[from] mongodb::error::Error),

    #[error("insert did not finish within {0:?}")]
    TimedOut(Duration),
}

/// Append-only booking storage.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Persist a booking and return the identifier the store assigned.
    async fn insert(&self, booking: &Booking) -> Result<String, StoreError>;
}
