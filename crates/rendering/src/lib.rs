use bevy::prelude::*;

pub mod camera;
pub mod draw_command;
pub mod input;
pub mod lane_markings;
pub mod quad_pool;
pub mod road_geometry;
pub mod scene;
pub mod style;

pub use camera::{OrthoBounds, TopDownCamera, ViewportCamera};
pub use draw_command::{DrawCommand, DrawCommandSink, QuadTransform, Rgb};
pub use quad_pool::FrameCommands;
pub use scene::{project_scene, ProjectionSummary};
pub use style::{MarkingStyle, SceneStyle};

/// Stages of the per-frame render pipeline, in execution order.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RenderingSet {
    Input,
    Camera,
    Projection,
    Backend,
}

/// Projects the [`simulation::TrafficNetwork`] into quads every frame and
/// routes input onto the [`ViewportCamera`].
///
/// Insert a [`SceneStyle`] before adding the plugin to override the look.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportCamera>()
            .init_resource::<SceneStyle>()
            .init_resource::<ClearColor>()
            .init_resource::<FrameCommands>()
            .init_resource::<quad_pool::QuadPool>()
            .configure_sets(
                Update,
                (
                    RenderingSet::Input,
                    RenderingSet::Camera,
                    RenderingSet::Projection,
                    RenderingSet::Backend,
                )
                    .chain(),
            )
            .add_systems(
                Startup,
                (camera::setup_camera, quad_pool::setup_quad_assets),
            )
            .add_systems(
                Update,
                (
                    input::camera_zoom,
                    input::camera_pan_keyboard,
                    input::exit_on_escape,
                )
                    .in_set(RenderingSet::Input),
            )
            .add_systems(
                Update,
                (camera::sync_camera, sync_clear_color).in_set(RenderingSet::Camera),
            )
            .add_systems(
                Update,
                (quad_pool::project_frame, log_frame_summary)
                    .chain()
                    .in_set(RenderingSet::Projection),
            )
            .add_systems(
                Update,
                quad_pool::sync_quad_instances.in_set(RenderingSet::Backend),
            );
    }
}

fn sync_clear_color(style: Res<SceneStyle>, mut clear: ResMut<ClearColor>) {
    if style.is_changed() {
        clear.0 = style.background_color();
    }
}

/// Debug-log the projection summary whenever its shape changes.
fn log_frame_summary(frame: Res<FrameCommands>, mut last: Local<Option<ProjectionSummary>>) {
    if *last == Some(frame.summary) {
        return;
    }
    debug!(
        "Frame projection: {} commands, {} roads drawn, {} skipped",
        frame.summary.commands, frame.summary.roads_drawn, frame.summary.roads_skipped
    );
    *last = Some(frame.summary);
}
