//! # Ridepool Core
//!
//! A discrete-event simulation engine for demand-responsive transit and
//! ridepooling fleets.
//!
//! ## Overview
//!
//! This crate provides the core simulation engine, including:
//!
//! - **Transport Spaces**: Euclidean and graph-based travel time/distance models
//! - **Dispatchers**: Pluggable single-vehicle insertion strategies
//! - **Vehicle State**: Stoplists, time-window propagation, and fast-forwarding
//! - **Fleet Simulation**: A request-driven event loop producing an event stream
//!
//! ## Key Concepts
//!
//! - **Stoplists**: Each vehicle's future route is an ordered list of stops,
//!   the first of which is always the vehicle's current position and estimate (CPE)
//! - **Insertion Dispatching**: New requests are matched by inserting a
//!   pickup/dropoff pair into a vehicle's existing stoplist at the cheapest
//!   feasible position
//! - **Deterministic**: Given the same request stream, fleet, space, and
//!   dispatcher, a run always produces the same event stream
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use ridepool_core::config::{SimulationConfig, Termination};
//! use ridepool_core::dispatch::BruteForceDispatcher;
//! use ridepool_core::fleet::Fleet;
//! use ridepool_core::simulation::FleetLoop;
//! use ridepool_core::space::euclidean::{EuclideanSpace, Metric, Point2};
//! use ridepool_core::vehicle::VehicleState;
//!
//! let config: SimulationConfig<Point2> = SimulationConfig::builder()
//!     .with_shared_initial_location(2, Point2::new(0.0, 0.0))
//!     .with_uniform_seat_capacity(4)
//!     .with_n_reqs(0)
//!     .build()
//!     .unwrap();
//!
//! let space = Arc::new(EuclideanSpace::new(1.0, Metric::Euclidean).unwrap());
//! let dispatcher = Arc::new(BruteForceDispatcher);
//! let mut fleet = Fleet::new(space, dispatcher);
//! for (vehicle_id, location) in config.vehicles() {
//!     fleet.add_vehicle(VehicleState::new(vehicle_id, config.seat_capacity_for(vehicle_id), location, 0.0));
//! }
//!
//! let requests = std::iter::empty();
//! let mut loop_ = FleetLoop::new(fleet, requests, config.termination);
//! let _events = loop_.run_to_completion();
//! ```

pub mod config;
pub mod dispatch;
pub mod error;
pub mod event;
pub mod fleet;
pub mod location;
pub mod request;
pub mod simulation;
pub mod space;
pub mod stop;
pub mod vehicle;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;
