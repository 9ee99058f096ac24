//! Read-only query surface the renderer consumes.
//!
//! The scene projector never touches [`crate::network::TrafficNetwork`]
//! directly; it sees the simulation only through [`TrafficModel`]. Test code
//! implements the trait on small fixtures and overrides individual queries.

use bevy::prelude::*;

use crate::junction::{Junction, JunctionId};
use crate::road::RoadSegment;

pub trait TrafficModel {
    fn road_segments(&self) -> &[RoadSegment];

    fn junctions(&self) -> &[Junction];

    fn junction(&self, id: JunctionId) -> Option<&Junction> {
        self.junctions().iter().find(|j| j.id == id)
    }

    /// Both end junctions of `road`, or `None` if either is missing.
    fn road_endpoints(&self, road: &RoadSegment) -> Option<(&Junction, &Junction)> {
        let start = self.junction(road.start?)?;
        let end = self.junction(road.end?)?;
        Some((start, end))
    }

    /// Unit direction from the start junction to the end junction.
    ///
    /// Zero when the junctions coincide or either one is missing.
    fn road_direction(&self, road: &RoadSegment) -> Vec3 {
        self.road_endpoints(road)
            .map(|(start, end)| (end.position - start.position).normalize_or_zero())
            .unwrap_or(Vec3::ZERO)
    }

    /// World position of a point `distance` along the center of `lane`,
    /// measured from the start junction's center.
    ///
    /// Lanes are offset along the road's lateral axis `(-dir.z, 0, dir.x)`.
    fn lane_position_along_road(&self, road: &RoadSegment, lane: usize, distance: f32) -> Vec3 {
        let Some((start, _)) = self.road_endpoints(road) else {
            return Vec3::ZERO;
        };
        let dir = self.road_direction(road);
        let lateral = Vec3::new(-dir.z, 0.0, dir.x);
        let mut pos = start.position + dir * distance + lateral * road.lane_center_offset(lane);
        pos.y = 0.0;
        pos
    }
}
