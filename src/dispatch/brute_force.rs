//! Reference dispatcher: brute-force search over every `(i, j)` insertion
//! pair, minimizing total added travel time (§4.C).

use crate::location::Location;
use crate::request::TransportationRequest;
use crate::space::TransportSpace;
use crate::stop::Stop;

use super::{rebuild_stoplist, Dispatcher, SingleVehicleSolution};

/// Enumerates every `0 <= i <= j <= |S| - 1`, rejecting on time-window or
/// capacity violation, and keeps the lowest-cost feasible pair (ties broken
/// by lowest `i` then lowest `j`, i.e. whichever is found first in scan
/// order since cost only replaces the incumbent on strict improvement).
#[derive(Debug, Clone, Copy, Default)]
pub struct BruteForceDispatcher;

impl<L, S> Dispatcher<L, S> for BruteForceDispatcher
where
    L: Location,
    S: TransportSpace<Loc = L>,
{
    fn dispatch(
        &self,
        request: &TransportationRequest<L>,
        stoplist: &crate::stop::Stoplist<L>,
        seat_capacity: u32,
        space: &S,
    ) -> Option<SingleVehicleSolution<L>> {
        let stops = stoplist.stops();
        let n = stops.len();
        let seat_capacity = seat_capacity as i64;
        let mut best: Option<(usize, usize, f64)> = None;

        for i in 0..n {
            if stops[i].occupancy_after_servicing >= seat_capacity {
                continue;
            }
            let cpat_pu = stops[i].estimated_departure_time() + space.t(stops[i].location, request.origin);
            if !request.pickup_window.admits(cpat_pu) {
                continue;
            }
            let departure_pu = cpat_pu.max(request.pickup_window.t_min);

            let mut prev_departure = departure_pu;
            let mut prev_loc = request.origin;

            for j in i..n {
                if j > i {
                    let stop = &stops[j];
                    if stop.occupancy_after_servicing >= seat_capacity {
                        break;
                    }
                    let eta = prev_departure + space.t(prev_loc, stop.location);
                    if !stop.time_window.admits(eta) {
                        // Every larger j still routes through this stop under
                        // at-least this much delay, so no later j can help.
                        break;
                    }
                    prev_departure = eta.max(stop.time_window.t_min);
                    prev_loc = stop.location;
                }

                let cpat_do = prev_departure + space.t(prev_loc, request.destination);
                if !request.delivery_window.admits(cpat_do) {
                    continue;
                }
                let departure_do = cpat_do.max(request.delivery_window.t_min);

                if !remainder_feasible(stops, j + 1, departure_do, request.destination, space) {
                    continue;
                }

                let cost = insertion_cost(stops, i, j, request, space);
                if best.map_or(true, |(_, _, best_cost)| cost < best_cost) {
                    best = Some((i, j, cost));
                }
            }
        }

        let (i, j, cost) = best?;
        let stoplist = rebuild_stoplist(stoplist, request, i, j, space);
        Some(SingleVehicleSolution {
            stoplist,
            cost,
            pickup_window: request.pickup_window,
            dropoff_window: request.delivery_window,
        })
    }
}

/// Walk the stops after the dropoff insertion point, applying the propagated
/// delay, until either a time-window violation is found (infeasible) or a
/// stop's new departure matches its original one (slack has fully absorbed
/// the delay, so everything after is untouched) (§4.C step 5).
fn remainder_feasible<L, S>(
    stops: &[Stop<L>],
    from: usize,
    mut prev_departure: f64,
    mut prev_loc: L,
    space: &S,
) -> bool
where
    L: Location,
    S: TransportSpace<Loc = L>,
{
    for stop in &stops[from..] {
        let eta = prev_departure + space.t(prev_loc, stop.location);
        if (eta - stop.estimated_arrival_time).abs() < 1e-9 {
            return true;
        }
        if !stop.time_window.admits(eta) {
            return false;
        }
        prev_departure = eta.max(stop.time_window.t_min);
        prev_loc = stop.location;
    }
    true
}

/// Added travel time for inserting the pickup after `i` and the dropoff
/// after `j` in the *original* stoplist (§4.C step 7).
fn insertion_cost<L, S>(stops: &[Stop<L>], i: usize, j: usize, request: &TransportationRequest<L>, space: &S) -> f64
where
    L: Location,
    S: TransportSpace<Loc = L>,
{
    if i == j {
        let next = stops.get(i + 1);
        let old_leg = next.map(|n| space.t(stops[i].location, n.location)).unwrap_or(0.0);
        let new_leg = space.t(stops[i].location, request.origin)
            + space.t(request.origin, request.destination)
            + next.map(|n| space.t(request.destination, n.location)).unwrap_or(0.0);
        return new_leg - old_leg;
    }

    let pickup_next = stops.get(i + 1);
    let pickup_added = space.t(stops[i].location, request.origin)
        + pickup_next.map(|n| space.t(request.origin, n.location)).unwrap_or(0.0)
        - pickup_next.map(|n| space.t(stops[i].location, n.location)).unwrap_or(0.0);

    let dropoff_next = stops.get(j + 1);
    let dropoff_added = space.t(stops[j].location, request.destination)
        + dropoff_next.map(|n| space.t(request.destination, n.location)).unwrap_or(0.0)
        - dropoff_next.map(|n| space.t(stops[j].location, n.location)).unwrap_or(0.0);

    pickup_added + dropoff_added
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::TimeWindow;
    use crate::space::euclidean::{EuclideanSpace, Metric, Point2};
    use crate::stop::{Action, Stoplist};
    use std::sync::Arc;

    fn cpe(loc: Point2) -> Stop<Point2> {
        Stop {
            location: loc,
            request: Arc::new(crate::request::Request::Internal(crate::request::InternalRequest::new(0.0, loc))),
            action: Action::Internal,
            estimated_arrival_time: 0.0,
            occupancy_after_servicing: 0,
            time_window: TimeWindow::new(0.0, 0.0),
        }
    }

    fn request(origin: Point2, destination: Point2) -> TransportationRequest<Point2> {
        TransportationRequest {
            request_id: 1,
            creation_timestamp: 0.0,
            origin,
            destination,
            pickup_window: TimeWindow::unbounded(),
            delivery_window: TimeWindow::unbounded(),
        }
    }

    #[test]
    fn empty_stoplist_accepts_tail_insertion() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let stoplist = Stoplist::new(cpe(Point2::new(0.0, 0.0)));
        let r = request(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0));

        let solution = BruteForceDispatcher.dispatch(&r, &stoplist, 1, &space).expect("feasible");
        assert_eq!(solution.stoplist.len(), 3);
        assert!((solution.stoplist.get(1).unwrap().estimated_arrival_time - 1.0).abs() < 1e-9);
        assert!((solution.stoplist.get(2).unwrap().estimated_arrival_time - 2.0).abs() < 1e-9);
    }

    #[test]
    fn capacity_zero_rejects_every_request() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let stoplist = Stoplist::new(cpe(Point2::new(0.0, 0.0)));
        let r = request(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0));

        assert!(BruteForceDispatcher.dispatch(&r, &stoplist, 0, &space).is_none());
    }

    #[test]
    fn tight_pickup_window_rejects() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let stoplist = Stoplist::new(cpe(Point2::new(0.0, 0.0)));
        let mut r = request(Point2::new(100.0, 0.0), Point2::new(101.0, 0.0));
        r.pickup_window = TimeWindow::new(0.0, 5.0);

        assert!(BruteForceDispatcher.dispatch(&r, &stoplist, 1, &space).is_none());
    }
}
