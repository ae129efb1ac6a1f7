//! Scenario T2: a single-seat taxi cannot accept a second overlapping
//! request while still carrying the first.

mod support;

use ridepool_core::config::Termination;
use ridepool_core::error::RequestRejectionReason;
use ridepool_core::event::Event;
use ridepool_core::simulation::FleetLoop;
use ridepool_core::space::euclidean::Point2;

use support::fleets::euclidean_fleet;
use support::requests::open_euclidean_request;

#[test]
fn second_concurrent_request_is_rejected_at_capacity_one() {
    let fleet = euclidean_fleet(1, 1);
    let requests = vec![
        open_euclidean_request(1, 0.0, Point2::new(1.0, 0.0), Point2::new(10.0, 0.0)),
        open_euclidean_request(2, 0.0, Point2::new(1.0, 0.0), Point2::new(10.0, 0.0)),
    ];

    let mut loop_ = FleetLoop::new(fleet, requests.into_iter(), Termination::RequestCount(2));
    let events = loop_.run_to_completion();

    let rejection = events.iter().find_map(|e| match e {
        Event::RequestRejection { request_id, reason, .. } => Some((*request_id, *reason)),
        _ => None,
    });
    assert_eq!(rejection, Some((2, RequestRejectionReason::NoFeasibleInsertion)));
}

#[test]
fn a_second_seat_lets_both_requests_through() {
    let fleet = euclidean_fleet(1, 2);
    let requests = vec![
        open_euclidean_request(1, 0.0, Point2::new(1.0, 0.0), Point2::new(10.0, 0.0)),
        open_euclidean_request(2, 0.0, Point2::new(1.0, 0.0), Point2::new(10.0, 0.0)),
    ];

    let mut loop_ = FleetLoop::new(fleet, requests.into_iter(), Termination::RequestCount(2));
    let events = loop_.run_to_completion();

    let acceptances = events
        .iter()
        .filter(|e| matches!(e, Event::RequestAcceptance { .. }))
        .count();
    assert_eq!(acceptances, 2);
}
