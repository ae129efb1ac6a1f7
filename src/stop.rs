//! Stop and Stoplist: the ordered plan of future stops for one vehicle, and
//! the invariants (I1-I5) every public operation on it must preserve (§3, §4.B).

use std::sync::Arc;

use crate::error::InvariantViolation;
use crate::location::Location;
use crate::request::{Request, TimeWindow};
use crate::space::TransportSpace;

/// What a [`Stop`] does when the vehicle reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Pickup,
    Dropoff,
    /// Marks the current-position element (index 0 of every stoplist).
    Internal,
}

/// One stop in a vehicle's plan.
///
/// `occupancy_after_servicing` is kept as `i64` rather than the spec's literal
/// "unsigned integer" so that the insertion dispatcher's delta-propagation
/// arithmetic (§4.C step 6, rebuild phase) never has to guard against
/// underflow while a stoplist is mid-edit; [`Stoplist::check_invariants`]
/// is what actually enforces `0 <= occupancy_after_servicing <= seat_capacity` (I4).
#[derive(Debug, Clone)]
pub struct Stop<L: Location> {
    pub location: L,
    pub request: Arc<Request<L>>,
    pub action: Action,
    pub estimated_arrival_time: f64,
    pub occupancy_after_servicing: i64,
    pub time_window: TimeWindow,
}

impl<L: Location> Stop<L> {
    /// `max(estimated_arrival_time, time_window.t_min)` — wait on early
    /// arrival, depart at the earliest allowed service time.
    pub fn estimated_departure_time(&self) -> f64 {
        self.estimated_arrival_time.max(self.time_window.t_min)
    }
}

/// An ordered plan of stops, always non-empty, always starting with a
/// current-position element (CPE) at index 0.
#[derive(Debug, Clone)]
pub struct Stoplist<L: Location> {
    stops: Vec<Stop<L>>,
}

impl<L: Location> Stoplist<L> {
    /// Build a fresh stoplist from just its CPE. `cpe.action` must be
    /// [`Action::Internal`].
    pub fn new(cpe: Stop<L>) -> Self {
        debug_assert_eq!(cpe.action, Action::Internal, "index 0 must be the CPE");
        Self { stops: vec![cpe] }
    }

    pub fn len(&self) -> usize {
        self.stops.len()
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn stops(&self) -> &[Stop<L>] {
        &self.stops
    }

    pub fn get(&self, index: usize) -> Option<&Stop<L>> {
        self.stops.get(index)
    }

    pub fn cpe(&self) -> &Stop<L> {
        &self.stops[0]
    }

    pub fn cpe_mut(&mut self) -> &mut Stop<L> {
        &mut self.stops[0]
    }

    pub fn last(&self) -> &Stop<L> {
        self.stops.last().expect("stoplist is never empty")
    }

    /// Remove the `index`-th stop. The CPE (`index == 0`) can never be
    /// removed.
    pub fn remove(&mut self, index: usize) -> Stop<L> {
        assert_ne!(index, 0, "the current-position element cannot be removed");
        self.stops.remove(index)
    }

    /// Insert `stop` immediately after `after` (it lands at `after + 1`),
    /// apply `occupancy_delta` to every stop that already existed past the
    /// insertion point (capacity carries the extra/released passenger along
    /// until the matching pickup/dropoff is inserted), then recompute ETAs
    /// forward from the insertion point (I2).
    ///
    /// Returns the index the new stop ended up at.
    pub fn insert_with_occupancy_delta<S>(
        &mut self,
        after: usize,
        mut stop: Stop<L>,
        occupancy_delta: i64,
        space: &S,
    ) -> usize
    where
        S: TransportSpace<Loc = L>,
    {
        stop.occupancy_after_servicing = self.stops[after].occupancy_after_servicing + occupancy_delta;
        let at = after + 1;
        self.stops.insert(at, stop);
        for later in &mut self.stops[at + 1..] {
            later.occupancy_after_servicing += occupancy_delta;
        }
        self.recompute_etas_from(at, space);
        at
    }

    /// Recompute `estimated_arrival_time` for every stop from `from` onward
    /// using the drive-first formula (I2): `eta[i] = departure(i-1) +
    /// t(loc[i-1], loc[i])`. `from` must be `>= 1`.
    pub fn recompute_etas_from<S>(&mut self, from: usize, space: &S)
    where
        S: TransportSpace<Loc = L>,
    {
        debug_assert!(from >= 1, "CPE's ETA is never derived from a predecessor");
        for i in from..self.stops.len() {
            let prev_departure = self.stops[i - 1].estimated_departure_time();
            let travel = space.t(self.stops[i - 1].location, self.stops[i].location);
            self.stops[i].estimated_arrival_time = prev_departure + travel;
        }
    }

    /// Check I1-I5 against a given seat capacity and space. Returns the first
    /// violation found, if any.
    pub fn check_invariants<S>(
        &self,
        seat_capacity: u32,
        space: &S,
    ) -> Result<(), InvariantViolation>
    where
        S: TransportSpace<Loc = L>,
    {
        if self.stops.is_empty() || self.stops[0].action != Action::Internal {
            return Err(InvariantViolation::MissingCurrentPositionElement);
        }
        for i in 0..self.stops.len() {
            let stop = &self.stops[i];
            if stop.estimated_arrival_time > stop.time_window.t_max {
                return Err(InvariantViolation::TimeWindowExceeded {
                    index: i,
                    eta: stop.estimated_arrival_time,
                    t_max: stop.time_window.t_max,
                });
            }
            if stop.occupancy_after_servicing < 0
                || stop.occupancy_after_servicing > seat_capacity as i64
            {
                return Err(InvariantViolation::CapacityExceeded {
                    index: i,
                    occupancy: stop.occupancy_after_servicing,
                    seat_capacity,
                });
            }
            if i >= 1 {
                let expected = self.stops[i - 1].estimated_departure_time()
                    + space.t(self.stops[i - 1].location, stop.location);
                if (expected - stop.estimated_arrival_time).abs() > 1e-6 {
                    return Err(InvariantViolation::TimeWindowExceeded {
                        index: i,
                        eta: stop.estimated_arrival_time,
                        t_max: expected,
                    });
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::space::euclidean::{EuclideanSpace, Metric, Point2};

    fn cpe_stop(loc: Point2) -> Stop<Point2> {
        Stop {
            location: loc,
            request: Arc::new(Request::Internal(crate::request::InternalRequest::new(
                0.0, loc,
            ))),
            action: Action::Internal,
            estimated_arrival_time: 0.0,
            occupancy_after_servicing: 0,
            time_window: TimeWindow::new(0.0, 0.0),
        }
    }

    #[test]
    fn insert_propagates_eta_and_occupancy() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let mut sl = Stoplist::new(cpe_stop(Point2::new(0.0, 0.0)));

        let tail = Stop {
            location: Point2::new(10.0, 0.0),
            request: Arc::new(Request::Internal(crate::request::InternalRequest::new(
                0.0,
                Point2::new(10.0, 0.0),
            ))),
            action: Action::Dropoff,
            estimated_arrival_time: 10.0,
            occupancy_after_servicing: 0,
            time_window: TimeWindow::unbounded(),
        };
        sl.insert_with_occupancy_delta(0, tail, 0, &space);
        assert_eq!(sl.len(), 2);

        let pickup = Stop {
            location: Point2::new(1.0, 0.0),
            request: Arc::new(Request::Internal(crate::request::InternalRequest::new(
                0.0,
                Point2::new(1.0, 0.0),
            ))),
            action: Action::Pickup,
            estimated_arrival_time: 1.0,
            occupancy_after_servicing: 0,
            time_window: TimeWindow::unbounded(),
        };
        sl.insert_with_occupancy_delta(0, pickup, 1, &space);

        assert_eq!(sl.get(1).unwrap().occupancy_after_servicing, 1);
        // the old tail, now at index 2, carries the +1 passenger
        assert_eq!(sl.get(2).unwrap().occupancy_after_servicing, 1);
        // ETA of the (now-shifted) tail must reflect the detour through the pickup
        assert_eq!(sl.get(2).unwrap().estimated_arrival_time, 1.0 + 9.0);
    }

    #[test]
    fn cpe_cannot_be_removed() {
        let mut sl = Stoplist::new(cpe_stop(Point2::new(0.0, 0.0)));
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| sl.remove(0)));
        assert!(result.is_err());
    }
}
