//! Road-network nodes and the traffic-light state some of them carry.
//!
//! A junction is either plain or signalised. Signalised junctions hold a
//! [`TrafficLightTable`] with one approach per connected road; the stepper
//! rotates a single green approach through the table on a fixed cycle.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::road::RoadId;

/// Shortest phase the signal cycle accepts, so a zero timing can't spin.
const MIN_PHASE_SECS: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct JunctionId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightState {
    Green,
    Yellow,
    Red,
}

/// Durations of the two lit phases of a signal cycle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalTiming {
    pub green_secs: f32,
    pub yellow_secs: f32,
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            green_secs: 8.0,
            yellow_secs: 2.0,
        }
    }
}

/// One road entering a signalised junction.
#[derive(Debug, Clone, PartialEq)]
pub struct SignalApproach {
    pub road: RoadId,
    /// Where the road meets the junction rim; the light marker sits here.
    pub entry_point: Vec3,
    pub state: LightState,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrafficLightTable {
    pub approaches: Vec<SignalApproach>,
    pub timing: SignalTiming,
    /// Index of the approach currently holding green (or yellow).
    active: usize,
    phase_elapsed: f32,
}

impl TrafficLightTable {
    pub fn new(timing: SignalTiming) -> Self {
        Self {
            timing,
            ..default()
        }
    }

    /// Register a road entering this junction. The first approach starts green.
    pub fn add_approach(&mut self, road: RoadId, entry_point: Vec3) {
        if let Some(existing) = self.approaches.iter_mut().find(|a| a.road == road) {
            existing.entry_point = entry_point;
            return;
        }
        self.approaches.push(SignalApproach {
            road,
            entry_point,
            state: LightState::Red,
        });
        self.refresh_states();
    }

    pub fn connected_roads(&self) -> impl Iterator<Item = RoadId> + '_ {
        self.approaches.iter().map(|a| a.road)
    }

    pub fn light_state(&self, road: RoadId) -> Option<LightState> {
        self.approaches
            .iter()
            .find(|a| a.road == road)
            .map(|a| a.state)
    }

    pub fn entry_point(&self, road: RoadId) -> Option<Vec3> {
        self.approaches
            .iter()
            .find(|a| a.road == road)
            .map(|a| a.entry_point)
    }

    pub fn active_index(&self) -> usize {
        self.active
    }

    /// Advance the signal cycle by `dt` seconds.
    ///
    /// The active approach goes green → yellow, then the next approach in
    /// table order turns green. Every other approach stays red. Large steps
    /// run through as many phases as they cover.
    pub fn advance(&mut self, dt: f32) {
        if self.approaches.is_empty() || !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let green = self.timing.green_secs.max(MIN_PHASE_SECS);
        let yellow = self.timing.yellow_secs.max(MIN_PHASE_SECS);

        self.phase_elapsed += dt;
        loop {
            match self.approaches[self.active].state {
                LightState::Green if self.phase_elapsed >= green => {
                    self.phase_elapsed -= green;
                    self.approaches[self.active].state = LightState::Yellow;
                }
                LightState::Yellow if self.phase_elapsed >= yellow => {
                    self.phase_elapsed -= yellow;
                    self.active = (self.active + 1) % self.approaches.len();
                    self.refresh_states();
                }
                // Forced red from outside: give the active approach back its green.
                LightState::Red => self.refresh_states(),
                _ => break,
            }
        }
    }

    fn refresh_states(&mut self) {
        if self.active >= self.approaches.len() {
            self.active = 0;
        }
        for (i, approach) in self.approaches.iter_mut().enumerate() {
            approach.state = if i == self.active {
                LightState::Green
            } else {
                LightState::Red
            };
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum JunctionKind {
    Plain,
    TrafficLight(TrafficLightTable),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Junction {
    pub id: JunctionId,
    /// Ground-plane position; y is always 0.
    pub position: Vec3,
    pub radius: f32,
    pub kind: JunctionKind,
}

impl Junction {
    pub fn plain(id: JunctionId, position: Vec3, radius: f32) -> Self {
        Self {
            id,
            position,
            radius: radius.max(0.0),
            kind: JunctionKind::Plain,
        }
    }

    pub fn signalised(id: JunctionId, position: Vec3, radius: f32, timing: SignalTiming) -> Self {
        Self {
            kind: JunctionKind::TrafficLight(TrafficLightTable::new(timing)),
            ..Self::plain(id, position, radius)
        }
    }

    pub fn traffic_lights(&self) -> Option<&TrafficLightTable> {
        match &self.kind {
            JunctionKind::TrafficLight(table) => Some(table),
            JunctionKind::Plain => None,
        }
    }

    pub fn traffic_lights_mut(&mut self) -> Option<&mut TrafficLightTable> {
        match &mut self.kind {
            JunctionKind::TrafficLight(table) => Some(table),
            JunctionKind::Plain => None,
        }
    }

    pub fn is_signalised(&self) -> bool {
        matches!(self.kind, JunctionKind::TrafficLight(_))
    }
}
