use bevy::prelude::*;

pub mod config;
pub mod demo;
pub mod junction;
pub mod model;
pub mod network;
pub mod road;
pub mod stepper;
pub mod vehicle;

pub use junction::{
    Junction, JunctionId, JunctionKind, LightState, SignalApproach, SignalTiming, TrafficLightTable,
};
pub use model::TrafficModel;
pub use network::{NetworkError, TrafficNetwork};
pub use road::{Lane, LaneType, RoadId, RoadSegment};
pub use vehicle::{Vehicle, VehicleColor};

/// System sets for ordering simulation systems relative to each other and to
/// systems in other crates.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum SimulationSet {
    Signals,
    Vehicles,
}

/// Advances the [`TrafficNetwork`] on the fixed timestep.
///
/// The network itself is only initialised if nobody inserted one first, so
/// the app (or a test) decides what gets simulated.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrafficNetwork>()
            .insert_resource(Time::<Fixed>::from_seconds(config::SIM_TIMESTEP_SECS))
            .configure_sets(
                FixedUpdate,
                (SimulationSet::Signals, SimulationSet::Vehicles).chain(),
            )
            .add_systems(
                FixedUpdate,
                (
                    stepper::cycle_traffic_lights.in_set(SimulationSet::Signals),
                    stepper::advance_vehicles.in_set(SimulationSet::Vehicles),
                ),
            );
    }
}
