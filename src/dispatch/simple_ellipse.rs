//! Alternative dispatcher: relative-detour feasibility instead of explicit
//! time windows, first-found insertion wins (§4.C "Simple-ellipse variant").
//!
//! Grounded on the teacher's `matching::SimpleMatching` — "finds the first
//! available driver within the match radius... preserves the original
//! 'first match wins' behavior" — generalized from one first-found driver to
//! one first-found `(i, j)` insertion pair.

use crate::location::Location;
use crate::request::TransportationRequest;
use crate::space::TransportSpace;
use crate::stop::Stop;

use super::{rebuild_stoplist, Dispatcher, SingleVehicleSolution};

/// `max_relative_detour` bounds how much farther `u -> x -> v` may be than
/// `u -> v` directly, as a fraction of the direct distance: `(d(u,x) +
/// d(x,v)) / d(u,v) - 1 <= max_relative_detour`.
#[derive(Debug, Clone, Copy)]
pub struct SimpleEllipseDispatcher {
    pub max_relative_detour: f64,
}

impl SimpleEllipseDispatcher {
    pub fn new(max_relative_detour: f64) -> Self {
        Self { max_relative_detour }
    }
}

impl Default for SimpleEllipseDispatcher {
    fn default() -> Self {
        Self::new(0.5)
    }
}

fn detour_ok(d_ux: f64, d_xv: f64, d_uv: f64, max_relative_detour: f64) -> bool {
    if d_uv <= 0.0 {
        return d_ux + d_xv <= 1e-9;
    }
    (d_ux + d_xv) / d_uv - 1.0 <= max_relative_detour
}

impl<L, S> Dispatcher<L, S> for SimpleEllipseDispatcher
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

        for i in 0..n {
            if stops[i].occupancy_after_servicing >= seat_capacity {
                continue;
            }
            if !self.leg_feasible(stops[i].location, request.origin, stops.get(i + 1), space) {
                continue;
            }

            for j in i..n {
                if j > i && stops[j].occupancy_after_servicing >= seat_capacity {
                    break;
                }
                let (u, next) = if j == i {
                    (request.origin, stops.get(i + 1))
                } else {
                    (stops[j].location, stops.get(j + 1))
                };
                if !self.leg_feasible(u, request.destination, next, space) {
                    continue;
                }

                let cost = insertion_cost(stops, i, j, request, space);
                let new_stoplist = rebuild_stoplist(stoplist, request, i, j, space);
                return Some(SingleVehicleSolution {
                    stoplist: new_stoplist,
                    cost,
                    pickup_window: request.pickup_window,
                    dropoff_window: request.delivery_window,
                });
            }
        }
        None
    }
}

impl SimpleEllipseDispatcher {
    /// A tail append (no `next` stop) has no ellipse to violate.
    fn leg_feasible<L, S>(&self, u: L, x: L, next: Option<&Stop<L>>, space: &S) -> bool
    where
        L: Location,
        S: TransportSpace<Loc = L>,
    {
        match next {
            None => true,
            Some(next) => {
                let d_uv = space.d(u, next.location);
                let d_ux = space.d(u, x);
                let d_xv = space.d(x, next.location);
                detour_ok(d_ux, d_xv, d_uv, self.max_relative_detour)
            }
        }
    }
}

/// Zero for any interior insertion; the added travel time for whichever leg
/// (pickup, dropoff, or both if `i == j` at the tail) is appended past the
/// current last stop (§4.C).
fn insertion_cost<L, S>(stops: &[Stop<L>], i: usize, j: usize, request: &TransportationRequest<L>, space: &S) -> f64
where
    L: Location,
    S: TransportSpace<Loc = L>,
{
    let mut cost = 0.0;
    let pickup_is_tail = stops.get(i + 1).is_none();
    if pickup_is_tail {
        cost += space.t(stops[i].location, request.origin);
    }
    if j == i {
        if pickup_is_tail {
            cost += space.t(request.origin, request.destination);
        }
    } else if stops.get(j + 1).is_none() {
        cost += space.t(stops[j].location, request.destination);
    }
    cost
}
