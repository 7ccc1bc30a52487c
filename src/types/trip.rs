//! Delivery trip types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Trip status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TripStatus {
    Draft,
    Scheduled,
    InTransit,
    Completed,
    Cancelled,
}

impl TripStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            TripStatus::Draft => "draft",
            TripStatus::Scheduled => "scheduled",
            TripStatus::InTransit => "in_transit",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }
}

/// A single stop on a delivery trip
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryStop {
    pub id: Uuid,
    /// Position within the trip (1-based)
    pub idx: u32,
    /// Delivery address as sent to the directions service
    pub address: String,
    /// Forces a route split immediately after this stop when optimizing
    #[serde(default)]
    pub locked: bool,
    /// Filled in by the planner; `None` until estimated (or when the
    /// directions service failed for this stop's leg)
    pub estimated_arrival: Option<DateTime<Utc>>,
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    #[serde(default)]
    pub notified_by_email: bool,
    pub email_sent_to: Option<String>,
}

impl DeliveryStop {
    pub fn new(idx: u32, address: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            idx,
            address: address.into(),
            locked: false,
            estimated_arrival: None,
            contact_name: None,
            contact_email: None,
            notified_by_email: false,
            email_sent_to: None,
        }
    }
}

/// Delivery trip (one vehicle's ordered stops for a day)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryTrip {
    pub id: Uuid,
    pub driver_name: String,
    pub vehicle: String,
    /// Departure from the home address
    pub departure_time: DateTime<Utc>,
    pub status: TripStatus,
    pub stops: Vec<DeliveryStop>,
}

impl DeliveryTrip {
    pub fn new(driver_name: impl Into<String>, vehicle: impl Into<String>, departure_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            driver_name: driver_name.into(),
            vehicle: vehicle.into(),
            departure_time,
            status: TripStatus::Draft,
            stops: Vec::new(),
        }
    }

    /// Restore contiguous 1-based stop positions after any re-ordering.
    pub fn renumber(&mut self) {
        for (i, stop) in self.stops.iter_mut().enumerate() {
            stop.idx = i as u32 + 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn renumber_restores_contiguous_positions() {
        let mut trip = DeliveryTrip::new("Newton Scamander", "JB 007", Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0).unwrap());
        trip.stops = vec![
            DeliveryStop::new(7, "A"),
            DeliveryStop::new(2, "B"),
            DeliveryStop::new(9, "C"),
        ];
        trip.renumber();
        let positions: Vec<u32> = trip.stops.iter().map(|s| s.idx).collect();
        assert_eq!(positions, vec![1, 2, 3]);
    }

    #[test]
    fn stop_serializes_camel_case() {
        let stop = DeliveryStop::new(1, "Karlova 12, Praha");
        let json = serde_json::to_string(&stop).unwrap();
        assert!(json.contains("\"estimatedArrival\":null"));
        assert!(json.contains("\"notifiedByEmail\":false"));
    }

    #[test]
    fn trip_status_as_str() {
        assert_eq!(TripStatus::InTransit.as_str(), "in_transit");
        assert_eq!(TripStatus::Draft.as_str(), "draft");
    }
}
