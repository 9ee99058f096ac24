//! Boundary classification and dash placement.

use simulation::Lane;

use crate::road_geometry::RoadFrame;
use crate::style::MarkingStyle;

use super::{MarkingKind, MarkingSpec};

/// Kind of each internal boundary, boundary `i` sitting between lanes
/// `i - 1` and `i`.
pub fn boundary_kinds(lanes: &[Lane]) -> Vec<MarkingKind> {
    lanes
        .windows(2)
        .map(|pair| {
            if pair[0].lane_type != pair[1].lane_type {
                MarkingKind::Solid
            } else {
                MarkingKind::Dashed
            }
        })
        .collect()
}

/// Longitudinal centers of the dashes covering a road of `adjusted_length`.
///
/// Dashes start flush with the near end and repeat every period; the last one
/// may run past the far end.
pub fn dash_offsets(adjusted_length: f32, style: &MarkingStyle) -> Vec<f32> {
    let period = style.dash_period();
    let dash_count = (adjusted_length / period).floor() as usize + 1;
    (0..dash_count)
        .map(|k| -adjusted_length / 2.0 + k as f32 * period + style.dash_length / 2.0)
        .collect()
}

/// Lay out every lane boundary of a road, in boundary order and, within a
/// dashed boundary, near end first.
pub fn layout_lane_markings(
    frame: &RoadFrame,
    lanes: &[Lane],
    stroke_scale: f32,
    style: &MarkingStyle,
) -> Vec<MarkingSpec> {
    let lane_count = lanes.len();
    if lane_count < 2 {
        return Vec::new();
    }
    let lane_width = frame.width / lane_count as f32;
    let min_thickness = style.thickness_per_scale * stroke_scale;
    let min_width = style.width_per_scale * stroke_scale;

    let mut specs = Vec::new();
    for (idx, kind) in boundary_kinds(lanes).into_iter().enumerate() {
        let boundary = idx + 1;
        let lateral = -frame.width / 2.0 + boundary as f32 * lane_width;

        match kind {
            MarkingKind::Solid => specs.push(MarkingSpec {
                kind,
                longitudinal: 0.0,
                lateral,
                vertical: style.elevation,
                length: frame.adjusted_length,
                thickness: style.solid_min_thickness.max(min_thickness),
                width: style.solid_min_width.max(min_width),
                color: style.color,
            }),
            MarkingKind::Dashed => {
                let thickness = style.dashed_min_thickness.max(min_thickness);
                let width = style.dashed_min_width.max(min_width);
                specs.extend(
                    dash_offsets(frame.adjusted_length, style)
                        .into_iter()
                        .map(|longitudinal| MarkingSpec {
                            kind,
                            longitudinal,
                            lateral,
                            vertical: style.elevation,
                            length: style.dash_length,
                            thickness,
                            width,
                            color: style.color,
                        }),
                );
            }
        }
    }
    specs
}
