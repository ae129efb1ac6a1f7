//! Pluggable transport spaces: distance, travel-time, and route interpolation (§4.A).
//!
//! Two implementations are required by the spec and provided here:
//!
//! - [`euclidean::EuclideanSpace`]: R² points, Euclidean or Manhattan metric.
//! - [`graph::GraphSpace`]: a weighted undirected graph over integer vertex ids,
//!   with a bounded LRU cache of per-source Dijkstra results (grounded on the
//!   teacher's `spatial::get_distance_cache` `Mutex<LruCache<_, _>>` pattern).
//!
//! All operations are total on locations actually produced by the space;
//! passing a location the space didn't produce is undefined behavior (§4.A
//! failure model) — this mirrors the teacher's own `RouteProvider` contract,
//! which never validates that a `CellIndex` belongs to any particular grid.

pub mod euclidean;
pub mod graph;

use crate::location::Location;

/// A location produced by `interp_time`/`interp_dist`: either the exact
/// interpolated point (continuous spaces) or the next discrete node reached
/// along the route (graph-like spaces), paired with the residual "jump time"
/// described in §4.A.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpolated<L> {
    pub location: L,
    pub residual: f64,
}

/// Capability set required of a transport space (§4.A). Implementations must
/// be `Send + Sync` so a shared space can back parallel
/// `handle_single_request` calls across vehicles (§5).
pub trait TransportSpace: Send + Sync {
    type Loc: Location;

    /// Distance between two locations. Must be a metric on the domain the
    /// space actually generates locations from: symmetric, zero iff `u ==
    /// v`, and satisfying the triangle inequality. The dispatcher assumes
    /// the result is always finite and non-negative.
    fn d(&self, u: Self::Loc, v: Self::Loc) -> f64;

    /// Travel time between two locations, typically `d(u, v) / velocity`.
    fn t(&self, u: Self::Loc, v: Self::Loc) -> f64;

    /// Given a vehicle traveling from `u` towards `v` with `time_to_dest`
    /// remaining before it would reach `v`, return the next discrete
    /// location it will actually occupy and the residual "jump time" until
    /// that location is attained (zero for continuous spaces).
    fn interp_time(&self, u: Self::Loc, v: Self::Loc, time_to_dest: f64) -> Interpolated<Self::Loc>;

    /// Analogous to [`TransportSpace::interp_time`] but parameterized by
    /// remaining distance instead of remaining time.
    fn interp_dist(&self, u: Self::Loc, v: Self::Loc, dist_to_dest: f64) -> Interpolated<Self::Loc>;

    /// A uniformly-random location in the space's domain. Used by external
    /// request generators, never by the dispatcher or fleet loop itself.
    fn random_point(&self, rng: &mut dyn rand::RngCore) -> Self::Loc;
}
