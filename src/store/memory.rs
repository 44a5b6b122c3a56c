//! In-process booking store for tests and local runs.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::booking::Booking;
use crate::store::{BookingStore, StoreError};

#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    inner: Arc<DashMap<String, Booking>>,
}

impl InMemoryBookingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<Booking> {
        self.inner.get(id).map(|r| r.value().clone())
    }

    /// All stored bookings, oldest first.
    pub fn bookings(&self) -> Vec<Booking> {
        let mut all: Vec<Booking> = self.inner.iter().map(|r| r.value().clone()).collect();
        all.sort_by_key(|b| b.created_at);
        all
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn insert(&self, booking: &Booking) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        self.inner.insert(id.clone(), booking.clone());
        Ok(id)
    }
}
