//! `FleetLoop`-level coverage for `SimpleEllipseDispatcher`: two compatible
//! requests pooled onto one relative-detour-bounded vehicle, mirroring the
//! `BruteForceDispatcher` coverage in `pooling_tests.rs`.

mod support;

use ridepool_core::config::Termination;
use ridepool_core::event::Event;
use ridepool_core::simulation::FleetLoop;
use ridepool_core::space::euclidean::Point2;

use support::fleets::simple_ellipse_fleet;
use support::requests::open_euclidean_request;

#[test]
fn two_compatible_requests_are_pooled_via_simple_ellipse() {
    let fleet = simple_ellipse_fleet(2, 0.5);
    let requests = vec![
        open_euclidean_request(1, 0.0, Point2::new(1.0, 0.0), Point2::new(10.0, 0.0)),
        open_euclidean_request(2, 0.1, Point2::new(2.0, 0.0), Point2::new(9.0, 0.0)),
    ];

    let mut loop_ = FleetLoop::new(fleet, requests.into_iter(), Termination::RequestCount(2));
    let events = loop_.run_to_completion();

    let acceptances = events
        .iter()
        .filter(|e| matches!(e, Event::RequestAcceptance { .. }))
        .count();
    assert_eq!(acceptances, 2, "both requests fit within the detour bound on the one vehicle");

    let pickups = events.iter().filter(|e| matches!(e, Event::Pickup { .. })).count();
    let deliveries = events.iter().filter(|e| matches!(e, Event::Delivery { .. })).count();
    assert_eq!(pickups, 2);
    assert_eq!(deliveries, 2);
}

#[test]
fn request_outside_detour_bound_is_rejected() {
    // A single, tight-detour vehicle: the second request's pickup lies far
    // enough off-axis that inserting it would blow the relative-detour
    // bound, so it must be turned away rather than pooled.
    let fleet = simple_ellipse_fleet(2, 0.1);
    let requests = vec![
        open_euclidean_request(1, 0.0, Point2::new(1.0, 0.0), Point2::new(10.0, 0.0)),
        open_euclidean_request(2, 0.1, Point2::new(5.0, 20.0), Point2::new(6.0, 20.0)),
    ];

    let mut loop_ = FleetLoop::new(fleet, requests.into_iter(), Termination::RequestCount(2));
    let events = loop_.run_to_completion();

    let acceptances = events
        .iter()
        .filter(|e| matches!(e, Event::RequestAcceptance { request_id: 1, .. }))
        .count();
    assert_eq!(acceptances, 1, "the first request should still be served");

    let rejected = events
        .iter()
        .any(|e| matches!(e, Event::RequestRejection { request_id: 2, .. }));
    assert!(rejected, "the far off-axis request should be rejected for exceeding the detour bound");
}
