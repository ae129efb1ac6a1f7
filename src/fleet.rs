//! Fleet: `vehicle_id -> VehicleState` plus the shared strategy objects every
//! vehicle is dispatched against (§3).

use std::collections::HashMap;
use std::sync::Arc;

use crate::dispatch::Dispatcher;
use crate::location::Location;
use crate::space::TransportSpace;
use crate::vehicle::VehicleState;

/// A fleet shares one `TransportSpace` and one `Dispatcher` across all its
/// vehicles (§5: "the TransportSpace and Dispatcher are shared immutable
/// references"). Kept behind `Arc` rather than a borrowed reference with an
/// explicit lifetime so `Fleet` and `VehicleState` stay ordinary owned types
/// (no lifetime parameter threading through the simulation loop) while still
/// satisfying "no global mutable state" and cheap, thread-safe sharing.
pub struct Fleet<L, S, D>
where
    L: Location,
    S: TransportSpace<Loc = L>,
    D: Dispatcher<L, S>,
{
    vehicles: HashMap<u64, VehicleState<L, S, D>>,
    space: Arc<S>,
    dispatcher: Arc<D>,
}

impl<L, S, D> Fleet<L, S, D>
where
    L: Location,
    S: TransportSpace<Loc = L>,
    D: Dispatcher<L, S>,
{
    pub fn new(space: Arc<S>, dispatcher: Arc<D>) -> Self {
        Self {
            vehicles: HashMap::new(),
            space,
            dispatcher,
        }
    }

    pub fn space(&self) -> &S {
        &self.space
    }

    pub fn dispatcher(&self) -> &D {
        &self.dispatcher
    }

    /// Cheap `Arc` clones, useful when a caller needs to hold the space or
    /// dispatcher alongside a mutable borrow of `self` (see
    /// [`crate::simulation::FleetLoop::step`]).
    pub fn space_arc(&self) -> Arc<S> {
        self.space.clone()
    }

    pub fn dispatcher_arc(&self) -> Arc<D> {
        self.dispatcher.clone()
    }

    pub fn add_vehicle(&mut self, vehicle: VehicleState<L, S, D>) {
        self.vehicles.insert(vehicle.vehicle_id(), vehicle);
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, vehicle_id: u64) -> Option<&VehicleState<L, S, D>> {
        self.vehicles.get(&vehicle_id)
    }

    /// Vehicle ids in ascending order, the tie-break order used both for
    /// fast-forward event ordering and winning-vehicle selection (§4.E).
    pub fn vehicle_ids_sorted(&self) -> Vec<u64> {
        let mut ids: Vec<u64> = self.vehicles.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    pub fn vehicle_mut(&mut self, vehicle_id: u64) -> Option<&mut VehicleState<L, S, D>> {
        self.vehicles.get_mut(&vehicle_id)
    }

    pub fn vehicles_mut(&mut self) -> impl Iterator<Item = &mut VehicleState<L, S, D>> {
        self.vehicles.values_mut()
    }
}
