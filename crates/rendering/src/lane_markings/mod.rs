//! Lane boundary markings laid out along a resolved road frame.
//!
//! Every internal boundary between two lanes gets one marking run:
//!
//! | neighbouring lanes | marking                        |
//! |--------------------|--------------------------------|
//! | same type          | dashed white, 3 m dash / 7 m gap |
//! | different type     | solid white, full length       |
//!
//! Stroke sizes have zoom-dependent floors so markings stay visible when the
//! camera is pulled far back.

mod layout;


use bevy::prelude::*;

use crate::draw_command::{DrawCommand, QuadTransform, Rgb};
use crate::road_geometry::RoadFrame;

pub use self::layout::{boundary_kinds, dash_offsets, layout_lane_markings};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkingKind {
    Solid,
    Dashed,
}

/// One painted stroke, positioned in road-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkingSpec {
    pub kind: MarkingKind,
    /// Offset along the road from the frame center.
    pub longitudinal: f32,
    /// Offset across the road from the centerline.
    pub lateral: f32,
    /// Height above the road surface.
    pub vertical: f32,
    pub length: f32,
    pub thickness: f32,
    pub width: f32,
    pub color: Rgb,
}

impl MarkingSpec {
    /// Compose with the road frame: translate to the road, rotate by its
    /// heading, offset in road space, then scale.
    pub fn to_command(&self, frame: &RoadFrame) -> DrawCommand {
        let translation = frame.place(Vec3::new(self.longitudinal, self.vertical, self.lateral));
        DrawCommand::new(
            QuadTransform::new(
                translation,
                frame.heading_degrees,
                Vec3::new(self.length, self.thickness, self.width),
            ),
            self.color,
        )
    }
}
