//! Per-frame projection of the traffic model into draw commands.
//!
//! Emission order is the only layering the backend gets, so it is fixed:
//!
//! 1. per road: body, lane markings, vehicles
//! 2. every junction body
//! 3. every traffic-light marker
//!
//! Roads that can't be resolved are skipped whole, markings and vehicles
//! included. A frame with no model attached emits nothing.


use bevy::prelude::*;

use simulation::{Junction, RoadSegment, TrafficModel};

use crate::camera::ViewportCamera;
use crate::draw_command::{heading_of, CountingSink, DrawCommand, DrawCommandSink, QuadTransform};
use crate::lane_markings::layout_lane_markings;
use crate::road_geometry::{resolve_road_frame, RoadSkip};
use crate::style::SceneStyle;

/// What one projection pass produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectionSummary {
    pub commands: usize,
    pub roads_drawn: usize,
    pub roads_skipped: usize,
}

/// Project one frame of `model` into `sink`.
pub fn project_scene<M, S>(
    model: Option<&M>,
    camera: &ViewportCamera,
    style: &SceneStyle,
    sink: &mut S,
) -> ProjectionSummary
where
    M: TrafficModel + ?Sized,
    S: DrawCommandSink + ?Sized,
{
    let Some(model) = model else {
        debug!("No traffic model attached; skipping frame");
        return ProjectionSummary::default();
    };

    let mut sink = CountingSink::new(sink);
    let mut summary = ProjectionSummary::default();
    let stroke_scale = camera.stroke_scale();

    for road in model.road_segments() {
        match project_road(model, road, stroke_scale, style, &mut sink) {
            Ok(()) => summary.roads_drawn += 1,
            Err(reason) => {
                trace!("Skipping road {}: {:?}", road.id.0, reason);
                summary.roads_skipped += 1;
            }
        }
    }

    for junction in model.junctions() {
        project_junction_body(junction, style, &mut sink);
    }

    for junction in model.junctions() {
        project_traffic_lights(junction, style, &mut sink);
    }

    summary.commands = sink.count;
    summary
}

fn project_road<M, S>(
    model: &M,
    road: &RoadSegment,
    stroke_scale: f32,
    style: &SceneStyle,
    sink: &mut S,
) -> Result<(), RoadSkip>
where
    M: TrafficModel + ?Sized,
    S: DrawCommandSink + ?Sized,
{
    if !road.is_connected() {
        return Err(RoadSkip::MissingJunction);
    }
    let start = road.start.and_then(|id| model.junction(id));
    let end = road.end.and_then(|id| model.junction(id));
    let frame = resolve_road_frame(start, end, road.width, style.road_elevation)?;

    sink.submit(frame.body_command(style.road_color));

    for spec in layout_lane_markings(&frame, &road.lanes, stroke_scale, &style.markings) {
        sink.submit(spec.to_command(&frame));
    }

    let heading = heading_of(model.road_direction(road));
    for vehicle in &road.vehicles {
        let mut position =
            model.lane_position_along_road(road, vehicle.lane, vehicle.distance_along_road);
        position.y = style.vehicle_elevation;
        sink.submit(DrawCommand::new(
            QuadTransform::new(
                position,
                heading,
                Vec3::new(vehicle.dimensions.x, 1.0, vehicle.dimensions.z),
            ),
            vehicle.color.to_unit_rgb(),
        ));
    }
    Ok(())
}

fn project_junction_body<S: DrawCommandSink + ?Sized>(
    junction: &Junction,
    style: &SceneStyle,
    sink: &mut S,
) {
    let color = if junction.is_signalised() {
        style.signalised_junction_color
    } else {
        style.junction_color
    };
    let diameter = junction.radius * 2.0;
    sink.submit(DrawCommand::new(
        QuadTransform::unrotated(
            Vec3::new(
                junction.position.x,
                style.junction_elevation,
                junction.position.z,
            ),
            Vec3::new(diameter, style.junction_thickness, diameter),
        ),
        color,
    ));
}

fn project_traffic_lights<S: DrawCommandSink + ?Sized>(
    junction: &Junction,
    style: &SceneStyle,
    sink: &mut S,
) {
    let Some(table) = junction.traffic_lights() else {
        return;
    };
    for approach in &table.approaches {
        sink.submit(DrawCommand::new(
            QuadTransform::unrotated(
                Vec3::new(
                    approach.entry_point.x,
                    style.light_elevation,
                    approach.entry_point.z,
                ),
                Vec3::splat(style.light_size),
            ),
            style.light_color(approach.state),
        ));
    }
}
