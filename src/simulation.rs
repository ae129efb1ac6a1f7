//! The fleet simulation loop (§4.E): pulls requests in timestamp order, ages
//! every vehicle forward, dispatches, and emits the event stream.
//!
//! Shaped after the teacher's `runner::run_next_event` /
//! `run_until_empty` split — one "advance by a single unit of work" step the
//! caller can single-step or drain, plus a hook variant for callers (tests,
//! demos) that want to observe each event as it's produced.

use crate::config::Termination;
use crate::dispatch::Dispatcher;
use crate::error::RequestRejectionReason;
use crate::event::Event;
use crate::fleet::Fleet;
use crate::location::Location;
use crate::request::TransportationRequest;
use crate::space::TransportSpace;

/// Drives a [`Fleet`] through a stream of requests, producing the output
/// event stream.
pub struct FleetLoop<L, S, D, I>
where
    L: Location,
    S: TransportSpace<Loc = L>,
    D: Dispatcher<L, S>,
    I: Iterator<Item = TransportationRequest<L>>,
{
    fleet: Fleet<L, S, D>,
    requests: std::iter::Peekable<I>,
    termination: Termination,
    requests_processed: u64,
    drained: bool,
    began: bool,
}

impl<L, S, D, I> FleetLoop<L, S, D, I>
where
    L: Location,
    S: TransportSpace<Loc = L>,
    D: Dispatcher<L, S>,
    I: Iterator<Item = TransportationRequest<L>>,
{
    pub fn new(fleet: Fleet<L, S, D>, requests: I, termination: Termination) -> Self {
        Self {
            fleet,
            requests: requests.peekable(),
            termination,
            requests_processed: 0,
            drained: false,
            began: false,
        }
    }

    pub fn fleet(&self) -> &Fleet<L, S, D> {
        &self.fleet
    }

    /// Run the whole stream to completion (or exhaustion / `t_cutoff`),
    /// returning every emitted event in order.
    pub fn run_to_completion(&mut self) -> Vec<Event<L>> {
        let mut all = Vec::new();
        while let Some(mut events) = self.step() {
            all.append(&mut events);
        }
        all
    }

    /// Process exactly one request (or, once the stream and fleet are both
    /// drained, `None`). Mirrors the teacher's `run_next_event`: a single
    /// step the caller can observe between calls.
    pub fn step(&mut self) -> Option<Vec<Event<L>>> {
        if self.drained {
            return None;
        }

        // The begin markers bracket a vehicle's whole participation in this
        // run, so they're only ever produced once, ahead of anything else
        // the first `step()` call emits.
        let mut prefix = if self.began {
            Vec::new()
        } else {
            self.began = true;
            self.boundary_begin_events()
        };

        let Some(request) = self.requests.peek() else {
            self.drained = true;
            prefix.append(&mut self.drain_all());
            prefix.append(&mut self.boundary_end_events());
            return Some(prefix);
        };
        if let Termination::RequestCount(n) = self.termination {
            if self.requests_processed >= n {
                self.drained = true;
                prefix.append(&mut self.drain_all());
                prefix.append(&mut self.boundary_end_events());
                return Some(prefix);
            }
        }
        if let Termination::TimeCutoff(t_cutoff) = self.termination {
            if request.creation_timestamp > t_cutoff {
                self.drained = true;
                prefix.append(&mut self.drain_all());
                prefix.append(&mut self.boundary_end_events());
                return Some(prefix);
            }
        }

        let request = self.requests.next().expect("peeked Some above");
        self.requests_processed += 1;

        let mut events = prefix;
        events.append(&mut self.fast_forward_all(request.creation_timestamp));
        events.push(Event::RequestSubmission {
            request_id: request.request_id,
            timestamp: request.creation_timestamp,
            origin: request.origin,
            destination: request.destination,
            pickup_window: request.pickup_window,
            delivery_window: request.delivery_window,
        });

        if request.is_trivial() {
            events.push(Event::RequestRejection {
                request_id: request.request_id,
                timestamp: request.creation_timestamp,
                reason: RequestRejectionReason::TrivialRequest,
            });
            return Some(events);
        }

        // Cloning the `Arc`s lets us hold the space/dispatcher independently
        // of `self.fleet` while iterating `vehicle_mut` mutably below.
        let space = self.fleet.space_arc();
        let dispatcher = self.fleet.dispatcher_arc();

        let mut best: Option<(u64, f64)> = None;
        for vehicle_id in self.fleet.vehicle_ids_sorted() {
            let vehicle = self.fleet.vehicle_mut(vehicle_id).expect("id came from this fleet");
            let cost = vehicle.handle_single_request(&request, &dispatcher, &space);
            if cost.is_finite() && best.map_or(true, |(_, best_cost)| cost < best_cost) {
                best = Some((vehicle_id, cost));
            }
        }

        match best {
            None => {
                for vehicle in self.fleet.vehicles_mut() {
                    vehicle.discard_proposed();
                }
                events.push(Event::RequestRejection {
                    request_id: request.request_id,
                    timestamp: request.creation_timestamp,
                    reason: RequestRejectionReason::NoFeasibleInsertion,
                });
            }
            Some((winner_id, _)) => {
                let winner = self.fleet.vehicle_mut(winner_id).expect("winner came from this fleet");
                let (pickup_window, dropoff_window) = winner.proposed_windows().expect("winner has a proposal");
                winner.commit_proposed();
                for vehicle_id in self.fleet.vehicle_ids_sorted() {
                    if vehicle_id != winner_id {
                        self.fleet.vehicle_mut(vehicle_id).expect("id came from this fleet").discard_proposed();
                    }
                }
                events.push(Event::RequestAcceptance {
                    request_id: request.request_id,
                    timestamp: request.creation_timestamp,
                    assigned_pickup_window: pickup_window,
                    assigned_delivery_window: dropoff_window,
                });
            }
        }

        Some(events)
    }

    /// Fast-forward every vehicle to `t`, returning the stop events in
    /// timestamp order (ties broken by `vehicle_id`) (§4.E emission
    /// ordering rule 1).
    fn fast_forward_all(&mut self, t: f64) -> Vec<Event<L>> {
        let space = self.fleet.space_arc();

        let mut events = Vec::new();
        for vehicle_id in self.fleet.vehicle_ids_sorted() {
            let vehicle = self.fleet.vehicle_mut(vehicle_id).expect("id came from this fleet");
            let mut vehicle_events = vehicle
                .fast_forward(t, &space)
                .expect("well-formed scenarios never fast_forward before the CPE");
            events.append(&mut vehicle_events);
        }
        events.sort_by(|a, b| {
            a.timestamp()
                .partial_cmp(&b.timestamp())
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.vehicle_id().cmp(&b.vehicle_id()))
        });
        events
    }

    fn drain_all(&mut self) -> Vec<Event<L>> {
        self.fast_forward_all(f64::INFINITY)
    }

    /// One [`Event::VehicleStateBegin`] per vehicle, sorted by id, marking
    /// the start of this run (§4.F boundary markers).
    fn boundary_begin_events(&self) -> Vec<Event<L>> {
        self.fleet
            .vehicle_ids_sorted()
            .into_iter()
            .map(|vehicle_id| {
                let vehicle = self.fleet.get(vehicle_id).expect("id came from this fleet");
                Event::VehicleStateBegin {
                    vehicle_id,
                    timestamp: vehicle.current_time(),
                    location: vehicle.stoplist().cpe().location,
                }
            })
            .collect()
    }

    /// One [`Event::VehicleStateEnd`] per vehicle, sorted by id, marking the
    /// end of this run (§4.F boundary markers).
    fn boundary_end_events(&self) -> Vec<Event<L>> {
        self.fleet
            .vehicle_ids_sorted()
            .into_iter()
            .map(|vehicle_id| {
                let vehicle = self.fleet.get(vehicle_id).expect("id came from this fleet");
                Event::VehicleStateEnd {
                    vehicle_id,
                    timestamp: vehicle.current_time(),
                    location: vehicle.stoplist().cpe().location,
                }
            })
            .collect()
    }
}
