//! Error taxonomy: construction-time failures and internal consistency checks.
//!
//! Request-level outcomes (acceptance, rejection) are never errors — they are
//! events (see [`crate::event`]). Only configuration and invariant failures
//! propagate as `Result::Err`.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Raised when a [`crate::config::SimulationConfig`] cannot be built.
///
/// Fatal: callers should treat this as a setup-time failure, not something to
/// retry or recover from mid-run.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Both (or neither) of `n_reqs` / `t_cutoff` were set; exactly one must be.
    AmbiguousTermination,
    /// A vehicle's seat capacity was zero or negative.
    NonPositiveSeatCapacity { vehicle_id: u64, capacity: i64 },
    /// The fleet has no vehicles.
    EmptyFleet,
    /// A transport space was configured with a non-positive velocity.
    NonPositiveVelocity(f64),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::AmbiguousTermination => write!(
                f,
                "exactly one of n_reqs / t_cutoff must be set, not zero or both"
            ),
            ConfigError::NonPositiveSeatCapacity {
                vehicle_id,
                capacity,
            } => write!(
                f,
                "vehicle {vehicle_id} has non-positive seat capacity {capacity}"
            ),
            ConfigError::EmptyFleet => write!(f, "fleet must have at least one vehicle"),
            ConfigError::NonPositiveVelocity(v) => {
                write!(f, "velocity must be positive, got {v}")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// An internal consistency check failed. Per spec this indicates a bug in the
/// caller or in this crate, not an ordinary runtime condition, so it is
/// `Debug`-only: nothing about it is meant to be shown to an end user.
#[derive(Debug, Clone, PartialEq)]
pub enum InvariantViolation {
    /// `fast_forward(t)` was called with `t` earlier than the CPE's
    /// estimated arrival time.
    FastForwardBeforeCpe { cpe_eta: f64, requested: f64 },
    /// A stoplist had no current-position element at index 0.
    MissingCurrentPositionElement,
    /// A stop's estimated arrival time exceeded its time window's upper bound
    /// after an operation that should have preserved I3.
    TimeWindowExceeded { index: usize, eta: f64, t_max: f64 },
    /// A stop's occupancy fell outside `[0, seat_capacity]` after an
    /// operation that should have preserved I4.
    CapacityExceeded {
        index: usize,
        occupancy: i64,
        seat_capacity: u32,
    },
}

impl fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self:?}")
    }
}

impl std::error::Error for InvariantViolation {}

/// Why a request was rejected. Carried on [`crate::event::Event::RequestRejection`];
/// never constructed as an `Err`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestRejectionReason {
    /// `origin == destination`.
    TrivialRequest,
    /// No vehicle in the fleet had a feasible insertion.
    NoFeasibleInsertion,
}
