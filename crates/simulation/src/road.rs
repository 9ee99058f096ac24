use serde::{Deserialize, Serialize};

use crate::junction::JunctionId;
use crate::vehicle::Vehicle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoadId(pub u32);

/// What a lane is for. A change of type between neighbouring lanes is painted
/// as a solid line; lanes of the same type are separated by a dashed line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum LaneType {
    #[default]
    Car,
    Bike,
    Bus,
    Shoulder,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lane {
    pub lane_type: LaneType,
}

impl Lane {
    pub fn new(lane_type: LaneType) -> Self {
        Self { lane_type }
    }
}

/// A directed link between two junctions.
///
/// Either junction reference may be missing while the network is being
/// edited; such a road is kept but never drawn.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadSegment {
    pub id: RoadId,
    pub start: Option<JunctionId>,
    pub end: Option<JunctionId>,
    pub width: f32,
    /// Ordered by increasing lateral offset; lane 0 sits at `-width / 2`.
    pub lanes: Vec<Lane>,
    pub vehicles: Vec<Vehicle>,
}

impl RoadSegment {
    pub fn new(id: RoadId, start: JunctionId, end: JunctionId, width: f32, lanes: Vec<Lane>) -> Self {
        Self {
            id,
            start: Some(start),
            end: Some(end),
            width,
            lanes,
            vehicles: Vec::new(),
        }
    }

    /// Build a road from a list of lane types.
    pub fn with_lane_types(
        id: RoadId,
        start: JunctionId,
        end: JunctionId,
        width: f32,
        lane_types: &[LaneType],
    ) -> Self {
        let lanes = lane_types.iter().copied().map(Lane::new).collect();
        Self::new(id, start, end, width, lanes)
    }

    pub fn lane_count(&self) -> usize {
        self.lanes.len()
    }

    pub fn lane_width(&self) -> f32 {
        if self.lanes.is_empty() {
            return self.width;
        }
        self.width / self.lanes.len() as f32
    }

    /// Lateral offset of a lane's center from the road centerline.
    /// Out-of-range lanes clamp to the last.
    pub fn lane_center_offset(&self, lane: usize) -> f32 {
        if self.lanes.is_empty() {
            return 0.0;
        }
        let lane = lane.min(self.lanes.len() - 1);
        -self.width / 2.0 + (lane as f32 + 0.5) * self.lane_width()
    }

    pub fn is_connected(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}
