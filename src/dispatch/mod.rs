//! Insertion dispatchers: pure functions from `(request, stoplist)` to either
//! a feasible `(new_stoplist, cost)` or "infeasible" (§4.C).
//!
//! Mirrors the teacher's `matching::MatchingAlgorithm` shape (one required
//! per-request method, `Send + Sync`, selectable at configuration time as an
//! opaque strategy object) generalized from scoring a driver pool to scoring
//! insertion points in one vehicle's stoplist. Two variants are provided,
//! just as the teacher ships `SimpleMatching` (first-found) and
//! `CostBasedMatching` (scored) side by side.

pub mod brute_force;
pub mod simple_ellipse;

use std::sync::Arc;

use crate::location::Location;
use crate::request::{Request, TimeWindow, TransportationRequest};
use crate::space::TransportSpace;
use crate::stop::{Action, Stop, Stoplist};

pub use brute_force::BruteForceDispatcher;
pub use simple_ellipse::SimpleEllipseDispatcher;

/// The result of a feasible insertion: a stoplist with the pickup and dropoff
/// already spliced in, the added travel-time cost, and the (possibly
/// pass-through) windows assigned to the two new stops.
#[derive(Debug, Clone)]
pub struct SingleVehicleSolution<L: Location> {
    pub stoplist: Stoplist<L>,
    pub cost: f64,
    pub pickup_window: TimeWindow,
    pub dropoff_window: TimeWindow,
}

/// A pluggable insertion strategy (§4.C, §9: "avoid virtual-method-per-call
/// overhead on the hot path by making the dispatcher a generic strategy
/// parameter of the simulator" — so this is a plain trait, monomorphized into
/// [`crate::vehicle::VehicleState`], not a `Box<dyn Dispatcher>`).
///
/// Implementations must be pure: `dispatch` never mutates `stoplist`, and
/// calling it twice with equal inputs must return equal outputs (§8,
/// "Dispatcher purity").
pub trait Dispatcher<L: Location, S: TransportSpace<Loc = L>>: Send + Sync {
    /// Returns `None` for "no feasible insertion" — conventionally cost =
    /// `+infinity` (§4.C, "Failure semantics: never throws").
    fn dispatch(
        &self,
        request: &TransportationRequest<L>,
        stoplist: &Stoplist<L>,
        seat_capacity: u32,
        space: &S,
    ) -> Option<SingleVehicleSolution<L>>;
}

/// Splice a pickup stop after `pickup_after` and a dropoff stop after
/// `dropoff_after_original` (an index into the *original*, pre-pickup-insert
/// stoplist — see the index-shift note below), sharing ownership of a single
/// `Request` between the two new stops (§3, §5).
///
/// Both dispatcher variants reduce to "insert two stops, propagate ETAs" once
/// a winning `(i, j)` pair is chosen, so the actual mutation goes through
/// [`Stoplist::insert_with_occupancy_delta`] rather than being re-derived
/// here — that keeps the one real propagation implementation authoritative
/// and these scanners free to reason about feasibility/cost only.
fn rebuild_stoplist<L, S>(
    stoplist: &Stoplist<L>,
    request: &TransportationRequest<L>,
    pickup_after: usize,
    dropoff_after_original: usize,
    space: &S,
) -> Stoplist<L>
where
    L: Location,
    S: TransportSpace<Loc = L>,
{
    let mut new_stoplist = stoplist.clone();
    let shared_request = Arc::new(Request::Transportation(request.clone()));

    let pickup_stop = Stop {
        location: request.origin,
        request: Arc::clone(&shared_request),
        action: Action::Pickup,
        estimated_arrival_time: 0.0,
        occupancy_after_servicing: 0,
        time_window: request.pickup_window,
    };
    let pickup_index = new_stoplist.insert_with_occupancy_delta(pickup_after, pickup_stop, 1, space);
    debug_assert_eq!(pickup_index, pickup_after + 1);

    let dropoff_stop = Stop {
        location: request.destination,
        request: shared_request,
        action: Action::Dropoff,
        estimated_arrival_time: 0.0,
        occupancy_after_servicing: 0,
        time_window: request.delivery_window,
    };
    // `dropoff_after_original + 1` accounts for the pickup insertion having
    // shifted every original index `> pickup_after` forward by one; when
    // `dropoff_after_original == pickup_after` this lands the dropoff
    // immediately after the pickup itself, matching "j == i" (§4.C).
    new_stoplist.insert_with_occupancy_delta(dropoff_after_original + 1, dropoff_stop, -1, space);

    new_stoplist
}
