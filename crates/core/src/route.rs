//! Delivery route estimation.
//!
//! A route begins at the starting merchant, visits every other merchant
//! in the cart and ends at the user. Serviceability is decided up front
//! from the geographic spread of the merchants around the destination;
//! the path itself is then built with a nearest-neighbour walk, which is
//! cheap and good enough for the handful of stops a cart contains.

use std::f64::consts::PI;

use smallvec::SmallVec;
use thiserror::Error;

use crate::geo::{self, GeoPoint};

/// Largest serviceable bounding-circle area around the destination, in
/// square kilometres.
const MAX_SERVICE_AREA_KM2: f64 = 3.0;

/// Assumed courier speed in metres per second.
const COURIER_SPEED_MPS: f64 = 11.11;

/// Route estimation failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RouteError {
    /// The cart's merchants are too spread out around the destination.
    #[error("distance too far")]
    DistanceTooFar,
}

/// Estimate the delivery time in whole minutes for a route that starts at
/// `start`, visits every point in `stops` and ends at `destination`.
///
/// The feasibility pre-check takes the merchant farthest from the
/// destination (the start counts as a merchant) as a radius; if the
/// circle it spans exceeds the serviceable area the route is rejected
/// before any path is constructed. The walk then greedily moves to the
/// nearest unvisited stop, ties going to the earliest entry in `stops`,
/// and finishes with the leg to the destination. Minutes are truncated,
/// not rounded.
///
/// # Errors
///
/// Returns [`RouteError::DistanceTooFar`] when the bounding circle around
/// the destination exceeds the serviceable area.
pub fn estimate_route(
    start: GeoPoint,
    stops: &[GeoPoint],
    destination: GeoPoint,
) -> Result<u32, RouteError> {
    let mut max_radius_km = geo::distance_km(start, destination);
    for &stop in stops {
        max_radius_km = max_radius_km.max(geo::distance_km(stop, destination));
    }

    if PI * max_radius_km * max_radius_km > MAX_SERVICE_AREA_KM2 {
        return Err(RouteError::DistanceTooFar);
    }

    let mut remaining: SmallVec<[GeoPoint; 8]> = SmallVec::from_slice(stops);
    let mut position = start;
    let mut total_km = 0.0;

    while !remaining.is_empty() {
        let mut nearest = 0;
        let mut nearest_km = f64::MAX;

        for (index, &stop) in remaining.iter().enumerate() {
            let km = geo::distance_km(position, stop);
            if km < nearest_km {
                nearest = index;
                nearest_km = km;
            }
        }

        position = remaining.remove(nearest);
        total_km += nearest_km;
    }

    total_km += geo::distance_km(position, destination);

    Ok(minutes(total_km))
}

/// Convert kilometres travelled into whole courier minutes.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "minutes are truncated towards zero and the distance is non-negative"
)]
fn minutes(total_km: f64) -> u32 {
    let seconds = total_km * 1000.0 / COURIER_SPEED_MPS;

    (seconds / 60.0) as u32
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn merchant_beyond_service_area_is_rejected() {
        let destination = GeoPoint::new(0.0, 0.0);
        // Roughly 2.2 km east, spanning a circle of about 15.5 km².
        let merchant = GeoPoint::new(0.0, 0.02);

        let result = estimate_route(merchant, &[], destination);

        assert_eq!(result, Err(RouteError::DistanceTooFar));
    }

    #[test]
    fn far_stop_rejects_even_with_close_start() {
        let destination = GeoPoint::new(0.0, 0.0);
        let start = GeoPoint::new(0.0, 0.001);
        let far_stop = GeoPoint::new(0.0, 0.02);

        let result = estimate_route(start, &[far_stop], destination);

        assert_eq!(result, Err(RouteError::DistanceTooFar));
    }

    #[test]
    fn zero_stops_travels_straight_to_destination() -> TestResult {
        let start = GeoPoint::new(0.0, 0.0);
        let destination = GeoPoint::new(0.0, 0.005);

        let total_km = geo::distance_km(start, destination);
        let expected = (total_km * 1000.0 / COURIER_SPEED_MPS / 60.0).floor();

        let minutes = estimate_route(start, &[], destination)?;

        assert_eq!(f64::from(minutes), expected);

        Ok(())
    }

    #[test]
    fn visits_stop_before_destination() -> TestResult {
        let start = GeoPoint::new(1.000, 1.000);
        let stop = GeoPoint::new(1.001, 1.001);
        let destination = GeoPoint::new(1.002, 1.002);

        let total_km =
            geo::distance_km(start, stop) + geo::distance_km(stop, destination);
        let expected = (total_km * 1000.0 / COURIER_SPEED_MPS / 60.0).floor();

        let minutes = estimate_route(start, &[stop], destination)?;

        assert_eq!(f64::from(minutes), expected);

        Ok(())
    }

    #[test]
    fn greedy_walk_takes_nearest_stop_first() -> TestResult {
        let destination = GeoPoint::new(0.0, 0.0);
        let start = GeoPoint::new(0.0, 0.008);
        let near = GeoPoint::new(0.0, 0.006);
        let far = GeoPoint::new(0.0, 0.002);

        // Nearest-neighbour order is start -> near -> far -> destination;
        // listing the farther stop first must not change that.
        let total_km = geo::distance_km(start, near)
            + geo::distance_km(near, far)
            + geo::distance_km(far, destination);
        let expected = (total_km * 1000.0 / COURIER_SPEED_MPS / 60.0).floor();

        let minutes = estimate_route(start, &[far, near], destination)?;

        assert_eq!(f64::from(minutes), expected);

        Ok(())
    }

    #[test]
    fn minutes_truncate_towards_zero() {
        // 1 km at 11.11 m/s is exactly 90.009 seconds, i.e. 1.5 minutes.
        assert_eq!(minutes(1.0), 1);
        assert_eq!(minutes(0.5), 0);
    }
}
