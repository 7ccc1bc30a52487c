//! Trip persistence seam.
//!
//! The planner only mutates the `DeliveryTrip` aggregate it is given; saving
//! the planned trip is the caller's job through `TripStore`. The real store
//! (a database, an ERP backend) lives outside this crate; `InMemoryTripStore`
//! covers tests and callers without one.

use std::collections::HashMap;
use std::sync::Mutex;

use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

use crate::types::DeliveryTrip;

/// Abstraction over durable trip storage.
#[async_trait]
pub trait TripStore: Send + Sync {
    async fn save(&self, trip: &DeliveryTrip) -> Result<()>;
    async fn load(&self, id: Uuid) -> Result<Option<DeliveryTrip>>;
}

/// Keeps trips in a map, keyed by id.
#[derive(Default)]
pub struct InMemoryTripStore {
    trips: Mutex<HashMap<Uuid, DeliveryTrip>>,
}

impl InMemoryTripStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripStore for InMemoryTripStore {
    async fn save(&self, trip: &DeliveryTrip) -> Result<()> {
        self.trips.lock().unwrap().insert(trip.id, trip.clone());
        Ok(())
    }

    async fn load(&self, id: Uuid) -> Result<Option<DeliveryTrip>> {
        Ok(self.trips.lock().unwrap().get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = InMemoryTripStore::new();
        let trip = DeliveryTrip::new(
            "Newton Scamander",
            "JB 007",
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        );

        store.save(&trip).await.unwrap();

        let loaded = store.load(trip.id).await.unwrap().unwrap();
        assert_eq!(loaded.driver_name, "Newton Scamander");
        assert_eq!(loaded.id, trip.id);
    }

    #[tokio::test]
    async fn load_missing_trip_is_none() {
        let store = InMemoryTripStore::new();
        assert!(store.load(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_existing_trip() {
        let store = InMemoryTripStore::new();
        let mut trip = DeliveryTrip::new(
            "Newton Scamander",
            "JB 007",
            Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap(),
        );
        store.save(&trip).await.unwrap();

        trip.vehicle = "JB 008".to_string();
        store.save(&trip).await.unwrap();

        let loaded = store.load(trip.id).await.unwrap().unwrap();
        assert_eq!(loaded.vehicle, "JB 008");
    }
}
