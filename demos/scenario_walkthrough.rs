//! Walk a small fleet through a handful of requests and print the resulting
//! event stream.
//!
//! Run with: cargo run --example scenario_walkthrough

use std::sync::Arc;

use ridepool_core::config::Termination;
use ridepool_core::dispatch::BruteForceDispatcher;
use ridepool_core::event::Event;
use ridepool_core::fleet::Fleet;
use ridepool_core::request::{TimeWindow, TransportationRequest};
use ridepool_core::simulation::FleetLoop;
use ridepool_core::space::euclidean::{EuclideanSpace, Metric, Point2};
use ridepool_core::vehicle::VehicleState;

fn main() {
    const N_VEHICLES: u64 = 3;
    const SEAT_CAPACITY: u32 = 4;

    let space = Arc::new(EuclideanSpace::new(1.0, Metric::Euclidean).unwrap());
    let dispatcher = Arc::new(BruteForceDispatcher);
    let mut fleet = Fleet::new(space, dispatcher);
    for vehicle_id in 0..N_VEHICLES {
        fleet.add_vehicle(VehicleState::new(
            vehicle_id,
            SEAT_CAPACITY,
            Point2::new(0.0, 0.0),
            0.0,
        ));
    }

    let requests = vec![
        TransportationRequest {
            request_id: 1,
            creation_timestamp: 0.0,
            origin: Point2::new(1.0, 0.0),
            destination: Point2::new(10.0, 0.0),
            pickup_window: TimeWindow::unbounded(),
            delivery_window: TimeWindow::unbounded(),
        },
        TransportationRequest {
            request_id: 2,
            creation_timestamp: 0.5,
            origin: Point2::new(2.0, 0.0),
            destination: Point2::new(9.0, 0.0),
            pickup_window: TimeWindow::unbounded(),
            delivery_window: TimeWindow::unbounded(),
        },
        TransportationRequest {
            request_id: 3,
            creation_timestamp: 2.0,
            origin: Point2::new(-5.0, -5.0),
            destination: Point2::new(-20.0, -20.0),
            pickup_window: TimeWindow::unbounded(),
            delivery_window: TimeWindow::unbounded(),
        },
    ];

    let n_reqs = requests.len() as u64;
    let mut loop_ = FleetLoop::new(fleet, requests.into_iter(), Termination::RequestCount(n_reqs));

    println!("--- Scenario walkthrough ({N_VEHICLES} vehicles, seat capacity {SEAT_CAPACITY}) ---");
    let mut step_no = 0;
    let mut accepted = 0;
    let mut rejected = 0;
    while let Some(events) = loop_.step() {
        step_no += 1;
        for event in &events {
            println!("[step {step_no}] {event:?}");
            match event {
                Event::RequestAcceptance { .. } => accepted += 1,
                Event::RequestRejection { .. } => rejected += 1,
                _ => {}
            }
        }
    }

    println!("\n{accepted} accepted, {rejected} rejected, {} requests total", accepted + rejected);
}
