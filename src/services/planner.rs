//! Route planning: leg segmentation and arrival-time estimation.
//!
//! A trip's ordered stops are split into contiguous legs at locked stops,
//! each leg is sent to the directions service as one request, and the
//! returned travel times are walked sequentially to fill in estimated
//! arrivals. Legs cannot be fetched in parallel: each leg's departure time
//! is the previous leg's last computed arrival.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::config::PlannerConfig;
use crate::services::directions::{DirectionsRequest, DirectionsService};
use crate::types::DeliveryTrip;

/// Split the trip's stops into route legs.
///
/// Every leg starts at the previous boundary (home, or a locked stop) and
/// the last leg returns to the home address. A locked stop closes its leg
/// and opens the next one, so it appears in both. Locks only apply when
/// `optimize` is set; without optimization the whole trip is one leg.
pub fn build_legs(trip: &DeliveryTrip, home_address: &str, optimize: bool) -> Vec<Vec<String>> {
    let mut legs = Vec::new();
    let mut leg = vec![home_address.to_string()];

    for stop in &trip.stops {
        leg.push(stop.address.clone());

        if optimize && stop.locked {
            legs.push(std::mem::replace(&mut leg, vec![stop.address.clone()]));
        }
    }

    // Return home only if the lock wasn't on the final stop
    if leg.len() > 1 {
        leg.push(home_address.to_string());
        legs.push(leg);
    }

    legs
}

/// Round to the nearest 10-minute mark: 5 minutes or more past the mark
/// rounds up, anything less truncates.
pub fn round_to_ten_minutes(ts: DateTime<Utc>) -> DateTime<Utc> {
    const BUCKET_SECONDS: i64 = 600;
    const MIDPOINT_SECONDS: i64 = 300;

    let seconds = ts.timestamp();
    let remainder = seconds.rem_euclid(BUCKET_SECONDS);
    let rounded = if remainder >= MIDPOINT_SECONDS {
        seconds - remainder + BUCKET_SECONDS
    } else {
        seconds - remainder
    };

    DateTime::from_timestamp(rounded, 0).unwrap_or(ts)
}

/// True when `order` is a real permutation of `0..order.len()` that fits
/// inside the stop list starting at `start`.
fn is_valid_waypoint_order(order: &[usize], start: usize, stop_count: usize) -> bool {
    if start + order.len() > stop_count {
        return false;
    }
    let mut seen = vec![false; order.len()];
    for &idx in order {
        if idx >= order.len() || seen[idx] {
            return false;
        }
        seen[idx] = true;
    }
    true
}

/// Re-order `order.len()` stops starting at `start` per the optimized
/// waypoint order, then restore contiguous 1-based positions.
pub fn rearrange_stops(trip: &mut DeliveryTrip, order: &[usize], start: usize) {
    let reordered: Vec<_> = order
        .iter()
        .map(|&old_idx| trip.stops[start + old_idx].clone())
        .collect();

    trip.stops.splice(start..start + order.len(), reordered);
    trip.renumber();
}

/// Estimate arrival times for every stop on the trip.
///
/// When `optimize` is set, stops are re-arranged per the optimized waypoint
/// order of each leg before travel times are applied. A failed directions
/// lookup downgrades to "no estimate" for that leg's stops; later legs are
/// still processed.
pub async fn plan_route(
    trip: &mut DeliveryTrip,
    directions: &dyn DirectionsService,
    config: &PlannerConfig,
    optimize: bool,
) -> Result<()> {
    config.validate()?;

    let legs = build_legs(trip, &config.home_address, optimize);
    let last_leg = legs.len().saturating_sub(1);

    debug!(trip = %trip.id, legs = legs.len(), optimize, "Planning route");

    // Departure clock and stop cursor carry across legs.
    let mut departure = trip.departure_time;
    let mut cursor = 0usize;

    for (leg_no, leg) in legs.iter().enumerate() {
        let request = DirectionsRequest {
            origin: &leg[0],
            destination: &leg[leg.len() - 1],
            waypoints: &leg[1..leg.len() - 1],
            optimize_waypoints: optimize,
            departure_time: departure,
        };

        let route = match directions.directions(&request).await {
            Ok(route) => route,
            Err(err) => {
                warn!(
                    trip = %trip.id,
                    leg = leg_no,
                    error = %err,
                    "No directions for leg, skipping its arrival estimates"
                );
                cursor += leg.len() - 1;
                continue;
            }
        };

        // Re-order before applying travel times so the returned segments
        // line up with the re-ordered stops.
        if optimize && route.waypoint_order.len() > 1 {
            if !is_valid_waypoint_order(&route.waypoint_order, cursor, trip.stops.len()) {
                warn!(
                    trip = %trip.id,
                    leg = leg_no,
                    order = ?route.waypoint_order,
                    "Invalid waypoint order for leg, skipping its arrival estimates"
                );
                cursor += leg.len() - 1;
                continue;
            }
            rearrange_stops(trip, &route.waypoint_order, cursor);
        }

        // The final leg ends with a synthetic return-home segment that maps
        // to no stop.
        let stop_segments = if leg_no == last_leg {
            route.segments.len().saturating_sub(1)
        } else {
            route.segments.len()
        };

        for segment in route.segments.iter().take(stop_segments) {
            departure = round_to_ten_minutes(
                departure + Duration::seconds(segment.duration_seconds as i64),
            );
            if let Some(stop) = trip.stops.get_mut(cursor) {
                stop.estimated_arrival = Some(departure);
            }
            cursor += 1;
        }
    }

    Ok(())
}
