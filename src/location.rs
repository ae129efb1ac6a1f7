//! The opaque location type a [`crate::space::TransportSpace`] operates over.
//!
//! Two concrete instantiations are required by the spec: an `R2` point
//! ([`crate::space::euclidean::Point2`]) and a graph-vertex id
//! ([`crate::space::graph::VertexId`]). Both are plain value types; neither
//! needs an ordering, only equality and printability.

use std::fmt::Debug;

/// Marker bound satisfied by any concrete location type.
///
/// Kept as a trait (rather than inlining the bound list everywhere a
/// location type parameter appears) so `TransportSpace<Loc = L>` and its
/// users only need to write `L: Location`.
pub trait Location: Copy + Clone + PartialEq + Debug + Send + Sync + 'static {}

impl<T> Location for T where T: Copy + Clone + PartialEq + Debug + Send + Sync + 'static {}
