//! In-memory road network: junctions, roads and the vehicles on them.
//!
//! [`TrafficNetwork`] is the Bevy resource the stepper mutates and the
//! renderer reads through [`TrafficModel`]. Construction goes through the
//! `add_*` methods, which validate ids and keep signal approaches in sync
//! with the roads that touch each signalised junction.


use std::fmt;

use bevy::prelude::*;

use crate::junction::{Junction, JunctionId, SignalTiming};
use crate::model::TrafficModel;
use crate::road::{LaneType, RoadId, RoadSegment};
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkError {
    UnknownJunction(JunctionId),
    UnknownRoad(RoadId),
    NotSignalised(JunctionId),
}

impl fmt::Display for NetworkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkError::UnknownJunction(id) => write!(f, "no junction with id {}", id.0),
            NetworkError::UnknownRoad(id) => write!(f, "no road with id {}", id.0),
            NetworkError::NotSignalised(id) => {
                write!(f, "junction {} has no traffic lights", id.0)
            }
        }
    }
}

impl std::error::Error for NetworkError {}

#[derive(Resource, Debug, Clone, Default)]
pub struct TrafficNetwork {
    pub junctions: Vec<Junction>,
    pub roads: Vec<RoadSegment>,
    next_junction_id: u32,
    next_road_id: u32,
}

impl TrafficNetwork {
    /// Build a network from pre-made parts, e.g. a test fixture.
    ///
    /// Signal approaches are rebuilt from the roads, so tables in the input
    /// only contribute their timing.
    pub fn from_parts(junctions: Vec<Junction>, roads: Vec<RoadSegment>) -> Self {
        let mut network = Self {
            junctions,
            roads,
            ..default()
        };
        network.rebuild_counters();
        network.rebuild_signal_approaches();
        network
    }

    fn rebuild_counters(&mut self) {
        self.next_junction_id = self
            .junctions
            .iter()
            .map(|j| j.id.0 + 1)
            .max()
            .unwrap_or(0);
        self.next_road_id = self.roads.iter().map(|r| r.id.0 + 1).max().unwrap_or(0);
    }

    pub fn add_junction(&mut self, position: Vec3, radius: f32) -> JunctionId {
        let id = JunctionId(self.next_junction_id);
        self.next_junction_id += 1;
        self.junctions
            .push(Junction::plain(id, Self::ground(position), radius));
        id
    }

    pub fn add_traffic_light_junction(
        &mut self,
        position: Vec3,
        radius: f32,
        timing: SignalTiming,
    ) -> JunctionId {
        let id = JunctionId(self.next_junction_id);
        self.next_junction_id += 1;
        self.junctions.push(Junction::signalised(
            id,
            Self::ground(position),
            radius,
            timing,
        ));
        id
    }

    /// Connect two existing junctions with a road.
    pub fn add_road(
        &mut self,
        start: JunctionId,
        end: JunctionId,
        width: f32,
        lane_types: &[LaneType],
    ) -> Result<RoadId, NetworkError> {
        for id in [start, end] {
            if self.junction(id).is_none() {
                return Err(NetworkError::UnknownJunction(id));
            }
        }
        let id = RoadId(self.next_road_id);
        self.next_road_id += 1;
        self.roads.push(RoadSegment::with_lane_types(
            id, start, end, width, lane_types,
        ));
        self.register_approach(start, end, id);
        self.register_approach(end, start, id);
        Ok(id)
    }

    pub fn add_vehicle(&mut self, road: RoadId, vehicle: Vehicle) -> Result<(), NetworkError> {
        let segment = self.road_mut(road).ok_or(NetworkError::UnknownRoad(road))?;
        segment.vehicles.push(vehicle);
        Ok(())
    }

    pub fn set_signal_timing(
        &mut self,
        junction: JunctionId,
        timing: SignalTiming,
    ) -> Result<(), NetworkError> {
        let j = self
            .junction_mut(junction)
            .ok_or(NetworkError::UnknownJunction(junction))?;
        let table = j
            .traffic_lights_mut()
            .ok_or(NetworkError::NotSignalised(junction))?;
        table.timing = timing;
        Ok(())
    }

    pub fn road(&self, id: RoadId) -> Option<&RoadSegment> {
        self.roads.iter().find(|r| r.id == id)
    }

    pub fn road_mut(&mut self, id: RoadId) -> Option<&mut RoadSegment> {
        self.roads.iter_mut().find(|r| r.id == id)
    }

    pub fn junction_mut(&mut self, id: JunctionId) -> Option<&mut Junction> {
        self.junctions.iter_mut().find(|j| j.id == id)
    }

    /// Center-to-center length of a road, or `None` if it's unconnected.
    pub fn road_length(&self, road: &RoadSegment) -> Option<f32> {
        self.road_endpoints(road)
            .map(|(start, end)| start.position.distance(end.position))
    }

    /// Recompute every signal approach from the current roads.
    pub fn rebuild_signal_approaches(&mut self) {
        for junction in &mut self.junctions {
            if let Some(table) = junction.traffic_lights_mut() {
                table.approaches.clear();
            }
        }
        let links: Vec<(JunctionId, JunctionId, RoadId)> = self
            .roads
            .iter()
            .filter_map(|r| Some((r.start?, r.end?, r.id)))
            .collect();
        for (start, end, road) in links {
            self.register_approach(start, end, road);
            self.register_approach(end, start, road);
        }
    }

    /// If `at` is signalised, give it an approach for `road` arriving from `from`.
    fn register_approach(&mut self, at: JunctionId, from: JunctionId, road: RoadId) {
        let Some(entry) = self.entry_point(at, from) else {
            return;
        };
        if let Some(table) = self
            .junction_mut(at)
            .and_then(|j| j.traffic_lights_mut())
        {
            table.add_approach(road, entry);
        }
    }

    /// Point on the rim of junction `at` facing junction `toward`.
    fn entry_point(&self, at: JunctionId, toward: JunctionId) -> Option<Vec3> {
        let junction = self.junction(at)?;
        let other = self.junction(toward)?;
        let dir = (other.position - junction.position).normalize_or_zero();
        Some(junction.position + dir * junction.radius)
    }

    fn ground(position: Vec3) -> Vec3 {
        Vec3::new(position.x, 0.0, position.z)
    }
}

impl TrafficModel for TrafficNetwork {
    fn road_segments(&self) -> &[RoadSegment] {
        &self.roads
    }

    fn junctions(&self) -> &[Junction] {
        &self.junctions
    }
}
