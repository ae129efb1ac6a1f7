//! The output event stream (§3, §4.F): tagged variants produced by
//! [`crate::vehicle::VehicleState::fast_forward`] and the fleet loop.
//!
//! Shaped after the teacher's `clock::Event`/`EventKind` split, but without
//! `BinaryHeap`-ordering machinery: event *ordering* here is a property of
//! when the fleet loop emits events (§4.E), not of the type itself, so there
//! is no `Ord` impl to maintain. `Serialize`/`Deserialize` derives let the
//! out-of-scope persistence layer serialize the stream without this crate
//! knowing about a wire format (§6).

use serde::{Deserialize, Serialize};

use crate::error::RequestRejectionReason;
use crate::location::Location;
use crate::request::TimeWindow;

/// One entry in the simulation's output stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event<L: Location> {
    RequestSubmission {
        request_id: i64,
        timestamp: f64,
        origin: L,
        destination: L,
        pickup_window: TimeWindow,
        delivery_window: TimeWindow,
    },
    RequestAcceptance {
        request_id: i64,
        timestamp: f64,
        assigned_pickup_window: TimeWindow,
        assigned_delivery_window: TimeWindow,
    },
    RequestRejection {
        request_id: i64,
        timestamp: f64,
        reason: RequestRejectionReason,
    },
    Pickup {
        request_id: i64,
        vehicle_id: u64,
        timestamp: f64,
    },
    Delivery {
        request_id: i64,
        vehicle_id: u64,
        timestamp: f64,
    },
    VehicleStateBegin {
        vehicle_id: u64,
        timestamp: f64,
        location: L,
    },
    VehicleStateEnd {
        vehicle_id: u64,
        timestamp: f64,
        location: L,
    },
}

impl<L: Location> Event<L> {
    /// The timestamp every variant carries, used to stably order stop events
    /// across vehicles within one fast-forward step (§4.E).
    pub fn timestamp(&self) -> f64 {
        match self {
            Event::RequestSubmission { timestamp, .. }
            | Event::RequestAcceptance { timestamp, .. }
            | Event::RequestRejection { timestamp, .. }
            | Event::Pickup { timestamp, .. }
            | Event::Delivery { timestamp, .. }
            | Event::VehicleStateBegin { timestamp, .. }
            | Event::VehicleStateEnd { timestamp, .. } => *timestamp,
        }
    }

    /// `None` for request-level events, which aren't attached to one vehicle.
    pub fn vehicle_id(&self) -> Option<u64> {
        match self {
            Event::Pickup { vehicle_id, .. }
            | Event::Delivery { vehicle_id, .. }
            | Event::VehicleStateBegin { vehicle_id, .. }
            | Event::VehicleStateEnd { vehicle_id, .. } => Some(*vehicle_id),
            _ => None,
        }
    }
}
