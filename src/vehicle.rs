//! VehicleState: owns one vehicle's stoplist, ages it forward in time, and
//! mediates the propose/commit/discard protocol against a Dispatcher (§4.D).

use std::marker::PhantomData;

use crate::dispatch::{Dispatcher, SingleVehicleSolution};
use crate::error::InvariantViolation;
use crate::event::Event;
use crate::location::Location;
use crate::request::TransportationRequest;
use crate::space::TransportSpace;
use crate::stop::{Action, Stop, Stoplist};

/// `Idle -> Proposed(cost) -> (Committed | Discarded) -> Idle` (§4.D). Not
/// exposed directly; callers observe it through `proposed_stoplist`'s
/// presence and `handle_single_request`'s return value.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ProposalState {
    Idle,
    Proposed { cost: f64 },
}

/// One vehicle's committed stoplist, a pending proposal slot, and the
/// strategy objects it was configured with (§3).
///
/// Generic over the transport space `S` and dispatcher `D` rather than
/// holding `Box<dyn TransportSpace>` / `Box<dyn Dispatcher>` — per §9's
/// instruction to avoid virtual-method-per-call overhead on the hot insertion
/// path, the strategies are monomorphized into the type instead.
#[derive(Debug)]
pub struct VehicleState<L, S, D>
where
    L: Location,
    S: TransportSpace<Loc = L>,
    D: Dispatcher<L, S>,
{
    vehicle_id: u64,
    seat_capacity: u32,
    stoplist: Stoplist<L>,
    proposed: Option<SingleVehicleSolution<L>>,
    proposal_state: ProposalState,
    _space: PhantomData<S>,
    _dispatcher: PhantomData<D>,
}

impl<L, S, D> VehicleState<L, S, D>
where
    L: Location,
    S: TransportSpace<Loc = L>,
    D: Dispatcher<L, S>,
{
    pub fn new(vehicle_id: u64, seat_capacity: u32, initial_location: L, initial_time: f64) -> Self {
        let cpe = Stop {
            location: initial_location,
            request: std::sync::Arc::new(crate::request::Request::Internal(
                crate::request::InternalRequest::new(initial_time, initial_location),
            )),
            action: Action::Internal,
            estimated_arrival_time: initial_time,
            occupancy_after_servicing: 0,
            time_window: crate::request::TimeWindow::new(0.0, 0.0),
        };
        Self {
            vehicle_id,
            seat_capacity,
            stoplist: Stoplist::new(cpe),
            proposed: None,
            proposal_state: ProposalState::Idle,
            _space: PhantomData,
            _dispatcher: PhantomData,
        }
    }

    pub fn vehicle_id(&self) -> u64 {
        self.vehicle_id
    }

    pub fn seat_capacity(&self) -> u32 {
        self.seat_capacity
    }

    pub fn stoplist(&self) -> &Stoplist<L> {
        &self.stoplist
    }

    pub fn current_time(&self) -> f64 {
        self.stoplist.cpe().estimated_arrival_time
    }

    /// Advance this vehicle's clock to `t`, servicing (and removing) every
    /// stop whose departure time has passed, emitting one event per serviced
    /// stop in ETA order (§4.D).
    ///
    /// Calling `fast_forward` twice with the same `t` is a no-op the second
    /// time: nothing at or before `t` remains to service, and the CPE rewrite
    /// below is idempotent since it is derived purely from `t` and whatever
    /// stop is now `stoplist[1]` (or its absence).
    pub fn fast_forward(&mut self, t: f64, space: &S) -> Result<Vec<Event<L>>, InvariantViolation> {
        let cpe_eta = self.stoplist.cpe().estimated_arrival_time;
        if t < cpe_eta {
            return Err(InvariantViolation::FastForwardBeforeCpe {
                cpe_eta,
                requested: t,
            });
        }

        // Any outstanding proposal was computed against a stoplist that's
        // about to change underneath it (§4.D: "invalidated by any
        // fast_forward call").
        self.discard_proposed();

        let mut events = Vec::new();
        let mut last_serviced_location = None;
        let mut last_serviced_occupancy = None;

        loop {
            let Some(next) = self.stoplist.get(1) else {
                break;
            };
            if next.estimated_departure_time() > t {
                break;
            }
            let serviced = self.stoplist.remove(1);
            let event = match serviced.action {
                Action::Pickup => Event::Pickup {
                    request_id: serviced.request.request_id(),
                    vehicle_id: self.vehicle_id,
                    timestamp: serviced.estimated_departure_time(),
                },
                Action::Dropoff => Event::Delivery {
                    request_id: serviced.request.request_id(),
                    vehicle_id: self.vehicle_id,
                    timestamp: serviced.estimated_departure_time(),
                },
                Action::Internal => unreachable!("the CPE is never at index >= 1"),
            };
            events.push(event);
            last_serviced_location = Some(serviced.location);
            last_serviced_occupancy = Some(serviced.occupancy_after_servicing);
        }

        if let Some(occupancy) = last_serviced_occupancy {
            self.stoplist.cpe_mut().occupancy_after_servicing = occupancy;
        }

        match (last_serviced_location, self.stoplist.get(1)) {
            (Some(last_loc), Some(next)) => {
                let interp = space.interp_time(last_loc, next.location, next.estimated_arrival_time - t);
                let cpe = self.stoplist.cpe_mut();
                cpe.location = interp.location;
                cpe.estimated_arrival_time = t + interp.residual;
            }
            (Some(last_loc), None) => {
                let cpe = self.stoplist.cpe_mut();
                cpe.location = last_loc;
                cpe.estimated_arrival_time = t;
            }
            (None, _) => {
                // Nothing serviced this call; the CPE's location is already
                // correct and only its clock needs to move forward so a
                // second fast_forward(t) call is a true no-op.
                self.stoplist.cpe_mut().estimated_arrival_time = t;
            }
        }

        if self.stoplist.len() > 1 {
            self.stoplist.recompute_etas_from(1, space);
        }

        Ok(events)
    }

    /// Invoke the dispatcher on `request` against the committed stoplist,
    /// stash the result (if any) in the proposal slot, and report the cost
    /// (`+infinity` for no feasible insertion) for the fleet loop to compare
    /// across vehicles (§4.D, §4.E).
    pub fn handle_single_request(&mut self, request: &TransportationRequest<L>, dispatcher: &D, space: &S) -> f64 {
        match dispatcher.dispatch(request, &self.stoplist, self.seat_capacity, space) {
            Some(solution) => {
                let cost = solution.cost;
                self.proposed = Some(solution);
                self.proposal_state = ProposalState::Proposed { cost };
                cost
            }
            None => {
                self.proposed = None;
                self.proposal_state = ProposalState::Idle;
                f64::INFINITY
            }
        }
    }

    /// Replace the committed stoplist with the pending proposal. Panics if
    /// there is none — the fleet loop only calls this on the winning vehicle,
    /// which always has a proposal by construction (§4.D precondition).
    pub fn commit_proposed(&mut self) {
        let solution = self
            .proposed
            .take()
            .expect("commit_proposed called without a pending proposal");
        self.stoplist = solution.stoplist;
        self.proposal_state = ProposalState::Idle;
    }

    pub fn discard_proposed(&mut self) {
        self.proposed = None;
        self.proposal_state = ProposalState::Idle;
    }

    /// The pending proposal's pickup/delivery windows, if any (for the fleet
    /// loop's acceptance event payload).
    pub fn proposed_windows(&self) -> Option<(crate::request::TimeWindow, crate::request::TimeWindow)> {
        self.proposed
            .as_ref()
            .map(|s| (s.pickup_window, s.dropoff_window))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::BruteForceDispatcher;
    use crate::request::TimeWindow;
    use crate::space::euclidean::{EuclideanSpace, Metric, Point2};

    fn request(origin: Point2, destination: Point2, created_at: f64) -> TransportationRequest<Point2> {
        TransportationRequest {
            request_id: 1,
            creation_timestamp: created_at,
            origin,
            destination,
            pickup_window: TimeWindow::unbounded(),
            delivery_window: TimeWindow::unbounded(),
        }
    }

    #[test]
    fn fast_forward_is_idempotent() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let mut vehicle: VehicleState<Point2, EuclideanSpace, BruteForceDispatcher> =
            VehicleState::new(0, 1, Point2::new(0.0, 0.0), 0.0);
        let dispatcher = BruteForceDispatcher;
        vehicle.handle_single_request(&request(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0), 0.0), &dispatcher, &space);
        vehicle.commit_proposed();

        let first = vehicle.fast_forward(1.0, &space).unwrap();
        assert_eq!(first.len(), 1);
        let second = vehicle.fast_forward(1.0, &space).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn fast_forward_rejects_time_before_cpe() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let mut vehicle: VehicleState<Point2, EuclideanSpace, BruteForceDispatcher> =
            VehicleState::new(0, 1, Point2::new(0.0, 0.0), 5.0);
        assert!(vehicle.fast_forward(1.0, &space).is_err());
    }

    #[test]
    fn commit_then_fast_forward_services_both_stops() {
        let space = EuclideanSpace::new(1.0, Metric::Euclidean).unwrap();
        let mut vehicle: VehicleState<Point2, EuclideanSpace, BruteForceDispatcher> =
            VehicleState::new(0, 1, Point2::new(0.0, 0.0), 0.0);
        let dispatcher = BruteForceDispatcher;
        vehicle.handle_single_request(&request(Point2::new(1.0, 0.0), Point2::new(2.0, 0.0), 0.0), &dispatcher, &space);
        vehicle.commit_proposed();

        let events = vehicle.fast_forward(2.0, &space).unwrap();
        assert_eq!(events.len(), 2);
        assert!(matches!(events[0], Event::Pickup { .. }));
        assert!(matches!(events[1], Event::Delivery { .. }));
    }
}
