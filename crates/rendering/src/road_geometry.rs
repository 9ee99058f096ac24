//! Trimming a road between its junctions into a drawable frame.

use bevy::prelude::*;

use simulation::Junction;

use crate::draw_command::{heading_of, heading_rotation, DrawCommand, QuadTransform, Rgb};

/// Trimmed roads at or below this length are not drawn.
pub const DEGENERATE_LENGTH: f32 = 0.001;

/// Why a road produced no geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoadSkip {
    MissingJunction,
    Degenerate,
}

/// The visible part of a road after trimming it back from its junctions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RoadFrame {
    /// Midpoint of the trimmed segment, lifted to the road surface.
    pub center: Vec3,
    /// Unit direction from the start junction to the end junction.
    pub direction: Vec3,
    pub heading_degrees: f32,
    pub adjusted_length: f32,
    pub width: f32,
}

impl RoadFrame {
    /// Map a road-local offset (x along, y up, z lateral) into world space.
    pub fn place(&self, local: Vec3) -> Vec3 {
        self.center + heading_rotation(self.heading_degrees) * local
    }

    /// The road surface quad.
    pub fn body_command(&self, color: Rgb) -> DrawCommand {
        DrawCommand::new(
            QuadTransform::new(
                self.center,
                self.heading_degrees,
                Vec3::new(self.adjusted_length, 1.0, self.width),
            ),
            color,
        )
    }
}

/// Resolve the drawable frame of a road between `start` and `end`.
///
/// Both ends are pulled inward by the *start* junction's radius, whatever the
/// end junction's radius is. Coincident junctions give a zero direction and
/// therefore a degenerate frame.
pub fn resolve_road_frame(
    start: Option<&Junction>,
    end: Option<&Junction>,
    width: f32,
    surface_elevation: f32,
) -> Result<RoadFrame, RoadSkip> {
    let (Some(start), Some(end)) = (start, end) else {
        return Err(RoadSkip::MissingJunction);
    };

    let direction = (end.position - start.position).normalize_or_zero();
    let trim = start.radius;
    let adjusted_start = start.position + direction * trim;
    let adjusted_end = end.position - direction * trim;

    let adjusted_length = (adjusted_end - adjusted_start).length();
    if adjusted_length <= DEGENERATE_LENGTH {
        return Err(RoadSkip::Degenerate);
    }

    let mid = (adjusted_start + adjusted_end) / 2.0;
    Ok(RoadFrame {
        center: Vec3::new(mid.x, surface_elevation, mid.z),
        direction,
        heading_degrees: heading_of(direction),
        adjusted_length,
        width,
    })
}
