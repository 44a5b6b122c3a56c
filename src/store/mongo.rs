//! MongoDB-backed booking store.

use std::time::Duration;

use async_trait::async_trait;
use mongodb::bson::Bson;
use mongodb::options::ClientOptions;
use mongodb::{Client, Collection};

use crate::booking::Booking;
use crate::config::StoreConfig;
use crate::store::{BookingStore, StoreError};

/// Database used when neither the config nor the URI names one.
pub const DEFAULT_DATABASE: &str = "test";

#[derive(Clone)]
pub struct MongoBookingStore {
    collection: Collection<Booking>,
}

impl MongoBookingStore {
    /// Build a client from the connection string. The driver connects lazily,
    /// so an unreachable server surfaces on the first insert.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        let mut options = ClientOptions::parse(&config.uri).await?;
        // Give up on an unreachable server within the insert deadline
        options.server_selection_timeout = Some(Duration::from_secs(config.timeout_secs));
        let database = resolve_database(config.database.as_deref(), options.default_database.as_deref());
        let client = Client::with_options(options)?;
        let collection = client.database(&database).collection::<Booking>(&config.collection);

        tracing::info!(
            database = %database,
            collection = %config.collection,
            "Booking store configured"
        );

        Ok(Self { collection })
    }
}

fn resolve_database(configured: Option<&str>, from_uri: Option<&str>) -> String {
    configured
        .or(from_uri)
        .unwrap_or(DEFAULT_DATABASE)
        .to_string()
}

#[async_trait]
impl BookingStore for MongoBookingStore {
    async fn insert(&self, booking: &Booking) -> Result<String, StoreError> {
        let result = self.collection.insert_one(booking).await?;
        let id = match result.inserted_id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_database_resolution() {
        assert_eq!(resolve_database(Some("cabs"), Some("other")), "cabs");
        assert_eq!(resolve_database(None, Some("lotus")), "lotus");
        assert_eq!(resolve_database(None, None), DEFAULT_DATABASE);
    }
}
