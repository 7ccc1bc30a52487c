//! Directions service for per-leg travel times
//!
//! Uses the Google Directions API in production, mock for tests/fallback.

mod google;

pub use google::GoogleDirectionsClient;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::config::PlannerConfig;

/// A single travel segment within a directions response
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSegment {
    /// Travel time in seconds
    pub duration_seconds: u64,
}

/// Directions for one route leg
#[derive(Debug, Clone, Default)]
pub struct DirectionsRoute {
    /// Travel segments in visit order (already the optimized order when
    /// optimization was requested)
    pub segments: Vec<RouteSegment>,
    /// Permutation of the request waypoints; empty unless optimization
    /// was requested
    pub waypoint_order: Vec<usize>,
}

/// Request for directions along one leg of a trip
#[derive(Debug, Clone)]
pub struct DirectionsRequest<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    /// Intermediate stops between origin and destination
    pub waypoints: &'a [String],
    pub optimize_waypoints: bool,
    pub departure_time: DateTime<Utc>,
}

/// Why a directions lookup produced no usable route
#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("directions request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("directions API returned {status}: {message}")]
    Api { status: String, message: String },

    #[error("no route found")]
    NoRoute,
}

/// Directions service trait for abstraction (Google, mock, etc.)
#[async_trait]
pub trait DirectionsService: Send + Sync {
    /// Fetch travel times (and, when requested, an optimized waypoint
    /// order) for one route leg
    async fn directions(
        &self,
        request: &DirectionsRequest<'_>,
    ) -> Result<DirectionsRoute, DirectionsError>;

    /// Get service name for logging
    fn name(&self) -> &str;
}

/// Mock directions service for tests and offline development
///
/// Every segment takes a fixed amount of time; the optimized order is the
/// identity permutation.
pub struct MockDirectionsService {
    /// Travel time per segment in seconds
    segment_seconds: u64,
}

impl Default for MockDirectionsService {
    fn default() -> Self {
        Self { segment_seconds: 600 }
    }
}

impl MockDirectionsService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_segment_seconds(segment_seconds: u64) -> Self {
        Self { segment_seconds }
    }
}

#[async_trait]
impl DirectionsService for MockDirectionsService {
    async fn directions(
        &self,
        request: &DirectionsRequest<'_>,
    ) -> Result<DirectionsRoute, DirectionsError> {
        // origin -> w1 -> ... -> wn -> destination
        let segment_count = request.waypoints.len() + 1;
        let segments = vec![
            RouteSegment { duration_seconds: self.segment_seconds };
            segment_count
        ];

        let waypoint_order = if request.optimize_waypoints {
            (0..request.waypoints.len()).collect()
        } else {
            Vec::new()
        };

        Ok(DirectionsRoute { segments, waypoint_order })
    }

    fn name(&self) -> &str {
        "MockDirections"
    }
}

/// Create a directions service based on configuration
///
/// Falls back to the mock when no config is given (offline development);
/// the fallback decision is logged.
pub fn create_directions_service(config: Option<&PlannerConfig>) -> Box<dyn DirectionsService> {
    use tracing::info;

    match config {
        Some(cfg) => Box::new(GoogleDirectionsClient::new(cfg.clone())),
        None => {
            info!("Using mock directions service (no directions API configured)");
            Box::new(MockDirectionsService::new())
        }
    }
}
