//! Google Directions API client
//!
//! API documentation:
//! https://developers.google.com/maps/documentation/directions/get-directions

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use super::{DirectionsError, DirectionsRequest, DirectionsRoute, DirectionsService, RouteSegment};
use crate::config::PlannerConfig;

/// Google Directions client
pub struct GoogleDirectionsClient {
    client: reqwest::Client,
    config: PlannerConfig,
}

impl GoogleDirectionsClient {
    pub fn new(config: PlannerConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_seconds))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, config }
    }

    /// Build the directions query parameters
    fn build_query(&self, request: &DirectionsRequest<'_>) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("origin", request.origin.to_string()),
            ("destination", request.destination.to_string()),
        ];

        if !request.waypoints.is_empty() {
            // "optimize:true|addr1|addr2" per the Directions API waypoint syntax
            let mut joined = String::new();
            if request.optimize_waypoints {
                joined.push_str("optimize:true|");
            }
            joined.push_str(&request.waypoints.join("|"));
            query.push(("waypoints", joined));
        }

        query.push(("departure_time", request.departure_time.timestamp().to_string()));
        query.push(("key", self.config.api_key.clone()));

        query
    }
}

#[async_trait]
impl DirectionsService for GoogleDirectionsClient {
    async fn directions(
        &self,
        request: &DirectionsRequest<'_>,
    ) -> Result<DirectionsRoute, DirectionsError> {
        let query = self.build_query(request);

        debug!(
            origin = request.origin,
            destination = request.destination,
            waypoints = request.waypoints.len(),
            optimize = request.optimize_waypoints,
            "Requesting directions"
        );

        let response = self
            .client
            .get(&self.config.directions_url)
            .query(&query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DirectionsError::Api {
                status: status.to_string(),
                message: body,
            });
        }

        let body: DirectionsResponse = response.json().await?;
        parse_response(body)
    }

    fn name(&self) -> &str {
        "GoogleDirections"
    }
}

/// Map the API response envelope to a route, or to the error taxonomy.
fn parse_response(body: DirectionsResponse) -> Result<DirectionsRoute, DirectionsError> {
    match body.status.as_str() {
        "OK" => {}
        "ZERO_RESULTS" => return Err(DirectionsError::NoRoute),
        other => {
            return Err(DirectionsError::Api {
                status: other.to_string(),
                message: body.error_message.unwrap_or_default(),
            })
        }
    }

    let route = body.routes.into_iter().next().ok_or(DirectionsError::NoRoute)?;

    debug!(
        segments = route.legs.len(),
        reordered = !route.waypoint_order.is_empty(),
        "Received directions"
    );

    Ok(DirectionsRoute {
        segments: route
            .legs
            .into_iter()
            .map(|leg| RouteSegment { duration_seconds: leg.duration.value })
            .collect(),
        waypoint_order: route.waypoint_order,
    })
}

// Directions API wire types

#[derive(Debug, Deserialize)]
struct DirectionsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    routes: Vec<ApiRoute>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    #[serde(default)]
    legs: Vec<ApiLeg>,
    #[serde(default)]
    waypoint_order: Vec<usize>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    duration: ApiDuration,
}

#[derive(Debug, Deserialize)]
struct ApiDuration {
    /// Seconds
    value: u64,
}
