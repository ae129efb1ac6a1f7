#![allow(dead_code)]

use std::sync::Arc;

use ridepool_core::dispatch::{BruteForceDispatcher, SimpleEllipseDispatcher};
use ridepool_core::fleet::Fleet;
use ridepool_core::space::euclidean::{EuclideanSpace, Metric, Point2};
use ridepool_core::space::graph::GraphSpace;
use ridepool_core::vehicle::VehicleState;

/// `n` brute-force taxis at the origin, unit velocity, given seat capacity.
pub fn euclidean_fleet(n: u64, seat_capacity: u32) -> Fleet<Point2, EuclideanSpace, BruteForceDispatcher> {
    let mut fleet = Fleet::new(
        Arc::new(EuclideanSpace::new(1.0, Metric::Euclidean).unwrap()),
        Arc::new(BruteForceDispatcher),
    );
    for vehicle_id in 0..n {
        fleet.add_vehicle(VehicleState::new(vehicle_id, seat_capacity, Point2::new(0.0, 0.0), 0.0));
    }
    fleet
}

/// A single simple-ellipse taxi at the origin.
pub fn simple_ellipse_fleet(
    seat_capacity: u32,
    max_relative_detour: f64,
) -> Fleet<Point2, EuclideanSpace, SimpleEllipseDispatcher> {
    let mut fleet = Fleet::new(
        Arc::new(EuclideanSpace::new(1.0, Metric::Euclidean).unwrap()),
        Arc::new(SimpleEllipseDispatcher::new(max_relative_detour)),
    );
    fleet.add_vehicle(VehicleState::new(0, seat_capacity, Point2::new(0.0, 0.0), 0.0));
    fleet
}

/// The scenario T4 square-plus-diagonal graph: 101-102-103-104-101, plus a
/// 101-103 diagonal, every edge weight 9, with a single vehicle parked at
/// 101.
pub fn square_graph_fleet(seat_capacity: u32) -> Fleet<u64, GraphSpace, BruteForceDispatcher> {
    let space = GraphSpace::new(
        vec![
            (101, 102, 9.0),
            (102, 103, 9.0),
            (103, 104, 9.0),
            (104, 101, 9.0),
            (101, 103, 9.0),
        ],
        1.0,
    )
    .unwrap();
    let mut fleet = Fleet::new(Arc::new(space), Arc::new(BruteForceDispatcher));
    fleet.add_vehicle(VehicleState::new(0, seat_capacity, 101, 0.0));
    fleet
}
