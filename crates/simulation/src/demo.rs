//! Demo road grid used by the app when no other network is supplied.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::config::{DEMO_BLOCK_SIZE, DEMO_JUNCTION_RADIUS};
use crate::junction::{JunctionId, SignalTiming};
use crate::network::TrafficNetwork;
use crate::road::LaneType;
use crate::vehicle::{Vehicle, VehicleColor};

pub const DEMO_COLUMNS: usize = 5;
pub const DEMO_ROWS: usize = 4;

/// East-west streets: two car lanes and a bike lane.
const STREET_LANES: [LaneType; 3] = [LaneType::Car, LaneType::Car, LaneType::Bike];
const STREET_WIDTH: f32 = 12.0;

/// North-south avenues: car lanes between shoulders.
const AVENUE_LANES: [LaneType; 4] = [
    LaneType::Shoulder,
    LaneType::Car,
    LaneType::Car,
    LaneType::Shoulder,
];
const AVENUE_WIDTH: f32 = 16.0;

const MAX_VEHICLES_PER_ROAD: usize = 4;

/// Bicycles are drawn shorter and narrower than cars.
pub const BIKE_LENGTH: f32 = 2.0;
pub const BIKE_WIDTH: f32 = 0.8;

/// Build a `DEMO_COLUMNS` × `DEMO_ROWS` grid centered on the origin.
///
/// Interior junctions carry traffic lights; edge junctions are plain. Vehicle
/// placement and paint come from a seeded RNG so a given seed always yields
/// the same network.
pub fn build_demo_network(seed: u64) -> TrafficNetwork {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut network = TrafficNetwork::default();

    let origin = Vec3::new(
        -(DEMO_COLUMNS as f32 - 1.0) * DEMO_BLOCK_SIZE / 2.0,
        0.0,
        -(DEMO_ROWS as f32 - 1.0) * DEMO_BLOCK_SIZE / 2.0,
    );

    let mut grid: Vec<JunctionId> = Vec::with_capacity(DEMO_COLUMNS * DEMO_ROWS);
    for row in 0..DEMO_ROWS {
        for col in 0..DEMO_COLUMNS {
            let pos = origin + Vec3::new(col as f32, 0.0, row as f32) * DEMO_BLOCK_SIZE;
            let interior = row > 0 && row + 1 < DEMO_ROWS && col > 0 && col + 1 < DEMO_COLUMNS;
            let id = if interior {
                network.add_traffic_light_junction(
                    pos,
                    DEMO_JUNCTION_RADIUS,
                    SignalTiming::default(),
                )
            } else {
                network.add_junction(pos, DEMO_JUNCTION_RADIUS)
            };
            grid.push(id);
        }
    }

    let at = |col: usize, row: usize| grid[row * DEMO_COLUMNS + col];
    let mut links: Vec<(JunctionId, JunctionId, f32, &'static [LaneType])> = Vec::new();
    for row in 0..DEMO_ROWS {
        for col in 0..DEMO_COLUMNS {
            if col + 1 < DEMO_COLUMNS {
                links.push((at(col, row), at(col + 1, row), STREET_WIDTH, &STREET_LANES[..]));
            }
            if row + 1 < DEMO_ROWS {
                links.push((at(col, row), at(col, row + 1), AVENUE_WIDTH, &AVENUE_LANES[..]));
            }
        }
    }

    for (start, end, width, lanes) in links {
        let Ok(road) = network.add_road(start, end, width, lanes) else {
            continue;
        };
        let vehicle_count = rng.gen_range(0..=MAX_VEHICLES_PER_ROAD);
        for _ in 0..vehicle_count {
            let lane = rng.gen_range(0..lanes.len());
            let mut vehicle = Vehicle::new(
                lane,
                rng.gen_range(0.0..DEMO_BLOCK_SIZE),
                VehicleColor::new(rng.gen(), rng.gen(), rng.gen()),
            )
            .with_speed(rng.gen_range(6.0..18.0));
            if lanes[lane] == LaneType::Bike {
                vehicle = vehicle.with_dimensions(BIKE_LENGTH, BIKE_WIDTH);
            }
            if let Err(err) = network.add_vehicle(road, vehicle) {
                warn!("Dropping demo vehicle: {err}");
            }
        }
    }

    info!(
        "Demo network: {} junctions, {} roads",
        network.junctions.len(),
        network.roads.len()
    );
    network
}
