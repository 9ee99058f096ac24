//! Drives a four-way signalised junction through a full cycle using only the
//! public API.
//!
//! Run: cargo test -p simulation --test signal_cycle

use bevy::prelude::*;

use simulation::stepper::{step_signals, step_vehicles};
use simulation::{LaneType, LightState, SignalTiming, TrafficModel, TrafficNetwork, Vehicle, VehicleColor};

fn crossroads() -> TrafficNetwork {
    let mut network = TrafficNetwork::default();
    let center = network.add_traffic_light_junction(
        Vec3::ZERO,
        10.0,
        SignalTiming {
            green_secs: 3.0,
            yellow_secs: 1.0,
        },
    );
    for offset in [
        Vec3::new(100.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 100.0),
        Vec3::new(-100.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -100.0),
    ] {
        let arm = network.add_junction(offset, 5.0);
        let road = network
            .add_road(center, arm, 8.0, &[LaneType::Car, LaneType::Car])
            .unwrap();
        network
            .add_vehicle(
                road,
                Vehicle::new(1, 0.0, VehicleColor::new(10, 20, 30)).with_speed(10.0),
            )
            .unwrap();
    }
    network
}

fn greens(network: &TrafficNetwork) -> usize {
    network.junctions()[0]
        .traffic_lights()
        .unwrap()
        .approaches
        .iter()
        .filter(|a| a.state == LightState::Green)
        .count()
}

#[test]
fn test_exactly_one_green_through_full_cycle() {
    let mut network = crossroads();
    // 4 approaches × 4 s per approach, sampled every quarter second.
    for _ in 0..64 {
        let lit = network.junctions()[0]
            .traffic_lights()
            .unwrap()
            .approaches
            .iter()
            .filter(|a| a.state != LightState::Red)
            .count();
        assert_eq!(lit, 1, "exactly one approach is green or yellow");
        step_signals(&mut network, 0.25);
    }
    assert_eq!(greens(&network), 1);
    assert_eq!(network.junctions()[0].traffic_lights().unwrap().active_index(), 0);
}

#[test]
fn test_vehicles_follow_their_lane_while_moving() {
    let mut network = crossroads();
    step_vehicles(&mut network, 3.0);
    for road in network.road_segments() {
        let vehicle = &road.vehicles[0];
        assert!((vehicle.distance_along_road - 30.0).abs() < 1e-4);
        let pos = network.lane_position_along_road(road, vehicle.lane, vehicle.distance_along_road);
        let dir = network.road_direction(road);
        // 30 units out from the center junction, 2 units to the lateral side.
        let along = pos.dot(dir);
        let across = pos.dot(Vec3::new(-dir.z, 0.0, dir.x));
        assert!((along - 30.0).abs() < 1e-3);
        assert!((across - 2.0).abs() < 1e-3);
    }
}
