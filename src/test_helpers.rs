//! Shared test fixtures (§8 scenarios).
//!
//! Gated by the `test-helpers` feature rather than `#[cfg(test)]` (unlike the
//! teacher's own `test_helpers` module) so both this crate's unit tests and
//! its `tests/` integration suite — a separate compilation unit, which can't
//! see `#[cfg(test)]` items from the library — can share one set of fixtures.

use std::sync::Arc;

use crate::dispatch::BruteForceDispatcher;
use crate::fleet::Fleet;
use crate::space::euclidean::{EuclideanSpace, Metric, Point2};

/// A single vehicle at the origin, capacity 1, velocity 1, brute-force
/// dispatcher, Euclidean space — the setup shared by scenarios T1-T3, T6.
pub fn single_taxi_fleet() -> Fleet<Point2, EuclideanSpace, BruteForceDispatcher> {
    let mut fleet = Fleet::new(
        Arc::new(EuclideanSpace::new(1.0, Metric::Euclidean).unwrap()),
        Arc::new(BruteForceDispatcher),
    );
    fleet.add_vehicle(crate::vehicle::VehicleState::new(0, 1, Point2::new(0.0, 0.0), 0.0));
    fleet
}

/// A single pooling-capable vehicle (capacity 2) at the origin — scenario T5.
pub fn pooling_fleet(seat_capacity: u32) -> Fleet<Point2, EuclideanSpace, BruteForceDispatcher> {
    let mut fleet = Fleet::new(
        Arc::new(EuclideanSpace::new(1.0, Metric::Euclidean).unwrap()),
        Arc::new(BruteForceDispatcher),
    );
    fleet.add_vehicle(crate::vehicle::VehicleState::new(
        0,
        seat_capacity,
        Point2::new(0.0, 0.0),
        0.0,
    ));
    fleet
}

/// A request with both windows open, for scenarios that don't exercise
/// time-window rejection.
pub fn open_request(
    request_id: i64,
    origin: Point2,
    destination: Point2,
    created_at: f64,
) -> crate::request::TransportationRequest<Point2> {
    crate::request::TransportationRequest {
        request_id,
        creation_timestamp: created_at,
        origin,
        destination,
        pickup_window: crate::request::TimeWindow::unbounded(),
        delivery_window: crate::request::TimeWindow::unbounded(),
    }
}
