//! Requests: the sum type tagged by role (§3 DATA MODEL).

use serde::{Deserialize, Serialize};

use crate::location::Location;

/// Request id used to tag the synthetic current-position-element request.
/// Never collides with a real [`TransportationRequest::request_id`], which
/// generators are expected to assign non-negative ids.
pub const INTERNAL_REQUEST_ID: i64 = -1;

/// A half-open-on-neither-side time interval `[t_min, t_max]`. `t_max` may be
/// `f64::INFINITY`; `t_min` defaults to `0.0`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub t_min: f64,
    pub t_max: f64,
}

impl TimeWindow {
    pub fn new(t_min: f64, t_max: f64) -> Self {
        Self { t_min, t_max }
    }

    /// A window with no lower bound pressure and no upper bound at all.
    pub fn unbounded() -> Self {
        Self {
            t_min: 0.0,
            t_max: f64::INFINITY,
        }
    }

    /// Non-strict feasibility check used throughout the dispatcher: `<=
    /// t_max` is feasible, `> t_max` is not (§4.C edge-case policy).
    pub fn admits(&self, eta: f64) -> bool {
        eta <= self.t_max
    }
}

/// A request to move from `origin` to `destination` within pickup/delivery
/// time windows. `t_max` of either window may be `f64::INFINITY`.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportationRequest<L: Location> {
    pub request_id: i64,
    pub creation_timestamp: f64,
    pub origin: L,
    pub destination: L,
    pub pickup_window: TimeWindow,
    pub delivery_window: TimeWindow,
}

impl<L: Location> TransportationRequest<L> {
    /// A trivial request has the same origin and destination (§4.E, §6, T6).
    pub fn is_trivial(&self) -> bool {
        self.origin == self.destination
    }
}

/// Tags the current-position element (CPE) of a vehicle's stoplist. Never
/// produced by an external generator; `request_id` is always
/// [`INTERNAL_REQUEST_ID`].
#[derive(Debug, Clone, PartialEq)]
pub struct InternalRequest<L: Location> {
    pub request_id: i64,
    pub creation_timestamp: f64,
    pub location: L,
}

impl<L: Location> InternalRequest<L> {
    pub fn new(creation_timestamp: f64, location: L) -> Self {
        Self {
            request_id: INTERNAL_REQUEST_ID,
            creation_timestamp,
            location,
        }
    }
}

/// A request, tagged by role. [`Stop`](crate::stop::Stop)s hold a shared
/// reference to the `Request` that created them so a matched Pickup/Dropoff
/// pair (or repeated CPE rewrites) can share ownership cheaply.
#[derive(Debug, Clone, PartialEq)]
pub enum Request<L: Location> {
    Transportation(TransportationRequest<L>),
    Internal(InternalRequest<L>),
}

impl<L: Location> Request<L> {
    pub fn request_id(&self) -> i64 {
        match self {
            Request::Transportation(r) => r.request_id,
            Request::Internal(r) => r.request_id,
        }
    }

    pub fn as_transportation(&self) -> Option<&TransportationRequest<L>> {
        match self {
            Request::Transportation(r) => Some(r),
            Request::Internal(_) => None,
        }
    }
}
