//! Simulation configuration: initial fleet layout, capacities, and
//! termination condition (§6).
//!
//! Shaped after the teacher's `ScenarioParams`: a plain struct with a
//! `Default` impl and `with_*` builder methods, except `SimulationConfig`
//! additionally validates via [`SimulationConfig::build`] — `ScenarioParams`
//! never fails to construct, but this crate's XOR-termination and
//! positive-capacity rules are real invariants the caller can get wrong, so
//! they're checked once at the boundary rather than trusted silently (§7).

use crate::error::ConfigError;
use crate::location::Location;

/// Either a uniform seat capacity for every vehicle, or an explicit
/// per-vehicle mapping.
#[derive(Debug, Clone)]
pub enum SeatCapacities {
    Uniform(u32),
    PerVehicle(std::collections::HashMap<u64, u32>),
}

/// Either `n_vehicles` sharing one starting location, or an explicit
/// per-vehicle mapping (§6).
#[derive(Debug, Clone)]
pub enum InitialLocations<L: Location> {
    Shared { n_vehicles: u64, location: L },
    PerVehicle(std::collections::HashMap<u64, L>),
}

/// Exactly one of these terminates a run (§6, §7 `AmbiguousTermination`).
#[derive(Debug, Clone, Copy)]
pub enum Termination {
    RequestCount(u64),
    TimeCutoff(f64),
}

/// Unvalidated configuration, built with `with_*` calls and turned into a
/// checked [`SimulationConfig`] via [`SimulationConfigBuilder::build`].
#[derive(Debug, Clone)]
pub struct SimulationConfigBuilder<L: Location> {
    pub initial_locations: Option<InitialLocations<L>>,
    pub seat_capacities: Option<SeatCapacities>,
    pub termination: Option<Termination>,
}

impl<L: Location> Default for SimulationConfigBuilder<L> {
    fn default() -> Self {
        Self {
            initial_locations: None,
            seat_capacities: None,
            termination: None,
        }
    }
}

impl<L: Location> SimulationConfigBuilder<L> {
    pub fn with_shared_initial_location(mut self, n_vehicles: u64, location: L) -> Self {
        self.initial_locations = Some(InitialLocations::Shared { n_vehicles, location });
        self
    }

    pub fn with_initial_locations(mut self, locations: std::collections::HashMap<u64, L>) -> Self {
        self.initial_locations = Some(InitialLocations::PerVehicle(locations));
        self
    }

    pub fn with_uniform_seat_capacity(mut self, capacity: u32) -> Self {
        self.seat_capacities = Some(SeatCapacities::Uniform(capacity));
        self
    }

    pub fn with_seat_capacities(mut self, capacities: std::collections::HashMap<u64, u32>) -> Self {
        self.seat_capacities = Some(SeatCapacities::PerVehicle(capacities));
        self
    }

    pub fn with_n_reqs(mut self, n: u64) -> Self {
        self.termination = Some(Termination::RequestCount(n));
        self
    }

    pub fn with_t_cutoff(mut self, t: f64) -> Self {
        self.termination = Some(Termination::TimeCutoff(t));
        self
    }

    /// Validate and freeze this builder into a [`SimulationConfig`] (§7
    /// `InvalidConfiguration`): exactly one termination condition, a
    /// non-empty fleet, and strictly positive seat capacities.
    pub fn build(self) -> Result<SimulationConfig<L>, ConfigError> {
        let termination = self.termination.ok_or(ConfigError::AmbiguousTermination)?;

        let initial_locations = self.initial_locations.ok_or(ConfigError::EmptyFleet)?;
        let vehicle_ids: Vec<u64> = match &initial_locations {
            InitialLocations::Shared { n_vehicles, .. } => (0..*n_vehicles).collect(),
            InitialLocations::PerVehicle(map) => map.keys().copied().collect(),
        };
        if vehicle_ids.is_empty() {
            return Err(ConfigError::EmptyFleet);
        }

        let seat_capacities = self.seat_capacities.unwrap_or(SeatCapacities::Uniform(1));
        if let SeatCapacities::Uniform(c) = seat_capacities {
            if c == 0 {
                return Err(ConfigError::NonPositiveSeatCapacity {
                    vehicle_id: vehicle_ids[0],
                    capacity: c as i64,
                });
            }
        }
        if let SeatCapacities::PerVehicle(map) = &seat_capacities {
            for (&vehicle_id, &capacity) in map {
                if capacity == 0 {
                    return Err(ConfigError::NonPositiveSeatCapacity {
                        vehicle_id,
                        capacity: capacity as i64,
                    });
                }
            }
        }

        Ok(SimulationConfig {
            initial_locations,
            seat_capacities,
            termination,
        })
    }
}

/// A checked, ready-to-run configuration (§6).
#[derive(Debug, Clone)]
pub struct SimulationConfig<L: Location> {
    pub initial_locations: InitialLocations<L>,
    pub seat_capacities: SeatCapacities,
    pub termination: Termination,
}

impl<L: Location> SimulationConfig<L> {
    pub fn builder() -> SimulationConfigBuilder<L> {
        SimulationConfigBuilder::default()
    }

    pub fn seat_capacity_for(&self, vehicle_id: u64) -> u32 {
        match &self.seat_capacities {
            SeatCapacities::Uniform(c) => *c,
            SeatCapacities::PerVehicle(map) => *map.get(&vehicle_id).unwrap_or(&1),
        }
    }

    /// The `(vehicle_id, initial_location)` pairs to seed a [`crate::fleet::Fleet`] with.
    pub fn vehicles(&self) -> Vec<(u64, L)> {
        match &self.initial_locations {
            InitialLocations::Shared { n_vehicles, location } => (0..*n_vehicles).map(|id| (id, *location)).collect(),
            InitialLocations::PerVehicle(map) => {
                let mut vehicles: Vec<(u64, L)> = map.iter().map(|(&id, &loc)| (id, loc)).collect();
                vehicles.sort_unstable_by_key(|(id, _)| *id);
                vehicles
            }
        }
    }
}
