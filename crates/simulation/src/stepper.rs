//! Fixed-step advancement of the demo traffic: vehicles roll forward at
//! constant speed and signal tables cycle through their phases.

use bevy::prelude::*;

use crate::network::TrafficNetwork;

/// Move every vehicle `speed * dt` along its road, wrapping at the road's
/// center-to-center length. Vehicles on unconnected or zero-length roads stay
/// where they are.
pub fn step_vehicles(network: &mut TrafficNetwork, dt: f32) {
    let lengths: Vec<Option<f32>> = network
        .roads
        .iter()
        .map(|road| network.road_length(road))
        .collect();

    for (road, length) in network.roads.iter_mut().zip(lengths) {
        let Some(length) = length.filter(|l| *l > f32::EPSILON) else {
            continue;
        };
        for vehicle in &mut road.vehicles {
            vehicle.distance_along_road =
                (vehicle.distance_along_road + vehicle.speed * dt).rem_euclid(length);
        }
    }
}

pub fn step_signals(network: &mut TrafficNetwork, dt: f32) {
    for junction in &mut network.junctions {
        if let Some(table) = junction.traffic_lights_mut() {
            table.advance(dt);
        }
    }
}

pub fn advance_vehicles(time: Res<Time>, mut network: ResMut<TrafficNetwork>) {
    step_vehicles(&mut network, time.delta_secs());
}

pub fn cycle_traffic_lights(time: Res<Time>, mut network: ResMut<TrafficNetwork>) {
    step_signals(&mut network, time.delta_secs());
}
