use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use simulation::config::{WORLD_HALF_HEIGHT, WORLD_HALF_WIDTH};

/// Percent of the view added or removed per scroll unit, over 100.
const ZOOM_SENSITIVITY: f32 = 10.0;
/// Horizontal extent divided by this gives the zoom level.
const ZOOM_LEVEL_DIVISOR: f32 = 200.0;
/// Horizontal extent divided by this gives the stroke scale.
const STROKE_SCALE_DIVISOR: f32 = 240.0;
/// Zoom-in steps that would make either extent smaller than this are ignored.
const MIN_VIEW_EXTENT: f32 = 1.0;

pub const NEAR_PLANE: f32 = 0.1;
pub const FAR_PLANE: f32 = 200.0;

const CAMERA_HEIGHT: f32 = 100.0;
const DEFAULT_HALF_WIDTH: f32 = 320.0;
const DEFAULT_HALF_HEIGHT: f32 = 180.0;

/// Orthographic view volume, in world units around the camera axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrthoBounds {
    pub left: f32,
    pub right: f32,
    pub bottom: f32,
    pub top: f32,
}

impl OrthoBounds {
    /// Bounds symmetric about the camera axis, clamped to the world extent.
    pub fn symmetric(half_width: f32, half_height: f32) -> Self {
        let hw = half_width.abs().clamp(MIN_VIEW_EXTENT / 2.0, WORLD_HALF_WIDTH);
        let hh = half_height.abs().clamp(MIN_VIEW_EXTENT / 2.0, WORLD_HALF_HEIGHT);
        Self {
            left: -hw,
            right: hw,
            bottom: -hh,
            top: hh,
        }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    pub fn height(&self) -> f32 {
        self.top - self.bottom
    }

    fn scaled(&self, factor: f32) -> Self {
        Self {
            left: self.left * factor,
            right: self.right * factor,
            bottom: self.bottom * factor,
            top: self.top * factor,
        }
    }

    /// Clamp each side independently to the world extent.
    fn clamped_to_world(&self) -> Self {
        Self {
            left: self.left.max(-WORLD_HALF_WIDTH),
            right: self.right.min(WORLD_HALF_WIDTH),
            bottom: self.bottom.max(-WORLD_HALF_HEIGHT),
            top: self.top.min(WORLD_HALF_HEIGHT),
        }
    }
}

/// Top-down orthographic camera.
///
/// Only [`apply_zoom`](Self::apply_zoom) and [`pan`](Self::pan) change it, so
/// the bounds invariants (left < right, bottom < top, inside the world
/// extent) hold after every call.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct ViewportCamera {
    position: Vec3,
    target: Vec3,
    up: Vec3,
    bounds: OrthoBounds,
}

impl Default for ViewportCamera {
    fn default() -> Self {
        Self::new(Vec2::ZERO, DEFAULT_HALF_WIDTH, DEFAULT_HALF_HEIGHT)
    }
}

impl ViewportCamera {
    /// Camera above `focus` (x, z) looking straight down, screen-up toward -Z.
    pub fn new(focus: Vec2, half_width: f32, half_height: f32) -> Self {
        Self {
            position: Vec3::new(focus.x, CAMERA_HEIGHT, focus.y),
            target: Vec3::new(focus.x, 0.0, focus.y),
            up: Vec3::NEG_Z,
            bounds: OrthoBounds::symmetric(half_width, half_height),
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn bounds(&self) -> OrthoBounds {
        self.bounds
    }

    /// Scale the view by one scroll step. Positive deltas zoom in.
    pub fn apply_zoom(&mut self, scroll_delta: f32) {
        if !scroll_delta.is_finite() {
            return;
        }
        let factor = 1.0 + (-scroll_delta * ZOOM_SENSITIVITY / 100.0);
        // A non-positive factor would collapse or invert the bounds.
        if factor <= 0.0 {
            return;
        }
        let zoomed = self.bounds.scaled(factor);
        if factor < 1.0
            && (zoomed.width() < MIN_VIEW_EXTENT || zoomed.height() < MIN_VIEW_EXTENT)
        {
            return;
        }
        self.bounds = zoomed.clamped_to_world();
    }

    /// Move the camera over the ground by `delta * zoom_level`.
    pub fn pan(&mut self, delta_x: f32, delta_z: f32) {
        if !delta_x.is_finite() || !delta_z.is_finite() {
            return;
        }
        let speed = self.current_zoom_level();
        let offset = Vec3::new(delta_x * speed, 0.0, delta_z * speed);
        self.position += offset;
        self.target += offset;
        self.target.y = 0.0;
    }

    pub fn current_zoom_level(&self) -> f32 {
        self.bounds.width() / ZOOM_LEVEL_DIVISOR
    }

    /// Multiplier for the zoom-dependent lane-marking stroke floors.
    pub fn stroke_scale(&self) -> f32 {
        self.bounds.width() / STROKE_SCALE_DIVISOR
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        let b = self.bounds;
        Mat4::orthographic_rh_gl(b.left, b.right, b.bottom, b.top, NEAR_PLANE, FAR_PLANE)
    }

    /// The same view volume expressed as a Bevy projection.
    pub fn orthographic_projection(&self) -> OrthographicProjection {
        let b = self.bounds;
        OrthographicProjection {
            near: NEAR_PLANE,
            far: FAR_PLANE,
            viewport_origin: Vec2::new(-b.left / b.width(), -b.bottom / b.height()),
            scaling_mode: ScalingMode::Fixed {
                width: b.width(),
                height: b.height(),
            },
            ..OrthographicProjection::default_3d()
        }
    }

    pub fn transform(&self) -> Transform {
        Transform::from_translation(self.position).looking_at(self.target, self.up)
    }
}

/// Marker for the camera entity driven by [`ViewportCamera`].
#[derive(Component)]
pub struct TopDownCamera;

pub fn setup_camera(mut commands: Commands, camera: Res<ViewportCamera>) {
    commands.spawn((
        Camera3d::default(),
        Projection::from(camera.orthographic_projection()),
        camera.transform(),
        TopDownCamera,
    ));
}

/// System: copy [`ViewportCamera`] onto the camera entity when it changes.
pub fn sync_camera(
    camera: Res<ViewportCamera>,
    mut query: Query<(&mut Transform, &mut Projection), With<TopDownCamera>>,
) {
    if !camera.is_changed() {
        return;
    }
    let Ok((mut transform, mut projection)) = query.get_single_mut() else {
        return;
    };
    *transform = camera.transform();
    *projection = Projection::from(camera.orthographic_projection());
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_bounds_valid(camera: &ViewportCamera) {
        let b = camera.bounds();
        assert!(b.left < b.right, "left {} >= right {}", b.left, b.right);
        assert!(b.bottom < b.top, "bottom {} >= top {}", b.bottom, b.top);
        assert!(b.left >= -WORLD_HALF_WIDTH && b.right <= WORLD_HALF_WIDTH);
        assert!(b.bottom >= -WORLD_HALF_HEIGHT && b.top <= WORLD_HALF_HEIGHT);
    }

    #[test]
    fn test_default_zoom_level() {
        let camera = ViewportCamera::default();
        assert!((camera.current_zoom_level() - 3.2).abs() < 1e-5);
        assert!((camera.stroke_scale() - 640.0 / 240.0).abs() < 1e-5);
    }

    #[test]
    fn test_zoom_in_scales_all_bounds() {
        let mut camera = ViewportCamera::default();
        camera.apply_zoom(1.0);
        let b = camera.bounds();
        assert!((b.left + 288.0).abs() < 1e-3);
        assert!((b.right - 288.0).abs() < 1e-3);
        assert!((b.bottom + 162.0).abs() < 1e-3);
        assert!((b.top - 162.0).abs() < 1e-3);
    }

    #[test]
    fn test_zoom_out_clamps_each_side() {
        let mut camera = ViewportCamera::default();
        for _ in 0..100 {
            camera.apply_zoom(-3.0);
            assert_bounds_valid(&camera);
        }
        let pinned = camera.bounds();
        assert_eq!(pinned.left, -WORLD_HALF_WIDTH);
        assert_eq!(pinned.right, WORLD_HALF_WIDTH);
        assert_eq!(pinned.bottom, -WORLD_HALF_HEIGHT);
        assert_eq!(pinned.top, WORLD_HALF_HEIGHT);

        camera.apply_zoom(-1.0);
        assert_eq!(camera.bounds(), pinned, "clamped zoom is idempotent");
    }

    #[test]
    fn test_huge_scroll_never_inverts_bounds() {
        for delta in [10.0, 20.0, 1e6, -1e6, 0.0, 9.99] {
            let mut camera = ViewportCamera::default();
            camera.apply_zoom(delta);
            assert_bounds_valid(&camera);
        }
    }

    #[test]
    fn test_repeated_zoom_in_stops_at_min_extent() {
        let mut camera = ViewportCamera::default();
        for _ in 0..10_000 {
            camera.apply_zoom(5.0);
            assert_bounds_valid(&camera);
        }
        assert!(camera.bounds().height() >= MIN_VIEW_EXTENT);
        assert!(camera.current_zoom_level() > 0.0);
    }

    #[test]
    fn test_steep_zoom_in_keeps_exact_factor() {
        let mut camera = ViewportCamera::default();
        camera.apply_zoom(9.5);
        let b = camera.bounds();
        // 1 - 9.5 * 10 / 100 = 0.05 of ±320 × ±180.
        assert!((b.right - 16.0).abs() < 1e-3, "right = {}", b.right);
        assert!((b.left + 16.0).abs() < 1e-3);
        assert!((b.top - 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_non_positive_factor_is_ignored() {
        let mut camera = ViewportCamera::default();
        let before = camera.bounds();
        camera.apply_zoom(10.0);
        camera.apply_zoom(42.0);
        assert_eq!(camera.bounds(), before);
    }

    #[test]
    fn test_non_finite_scroll_is_ignored() {
        let mut camera = ViewportCamera::default();
        let before = camera.bounds();
        camera.apply_zoom(f32::NAN);
        camera.apply_zoom(f32::INFINITY);
        assert_eq!(camera.bounds(), before);
    }

    #[test]
    fn test_pan_scales_with_zoom_and_pins_target() {
        let mut camera = ViewportCamera::default();
        let zoom = camera.current_zoom_level();
        camera.pan(1.0, -2.0);
        assert!((camera.position() - Vec3::new(zoom, CAMERA_HEIGHT, -2.0 * zoom)).length() < 1e-5);
        assert!((camera.target() - Vec3::new(zoom, 0.0, -2.0 * zoom)).length() < 1e-5);
        assert_eq!(camera.current_zoom_level(), zoom, "pan leaves zoom alone");
    }

    #[test]
    fn test_zoom_level_grows_as_view_widens() {
        let mut camera = ViewportCamera::default();
        let mut last = camera.current_zoom_level();
        for _ in 0..50 {
            camera.apply_zoom(-1.0);
            let now = camera.current_zoom_level();
            assert!(now >= last);
            last = now;
        }
    }

    #[test]
    fn test_projection_maps_bounds_to_clip_edges() {
        let camera = ViewportCamera::default();
        let clip = camera.projection_matrix() * camera.view_matrix();
        // Camera looks down -Y with screen-up toward -Z: world +X is screen right.
        let right_edge = clip.project_point3(Vec3::new(320.0, 0.0, 0.0));
        let top_edge = clip.project_point3(Vec3::new(0.0, 0.0, -180.0));
        assert!((right_edge.x - 1.0).abs() < 1e-4, "got {right_edge:?}");
        assert!((top_edge.y - 1.0).abs() < 1e-4, "got {top_edge:?}");
    }

    #[test]
    fn test_bevy_projection_matches_bounds() {
        let camera = ViewportCamera::default();
        let projection = camera.orthographic_projection();
        assert_eq!(projection.near, NEAR_PLANE);
        assert_eq!(projection.far, FAR_PLANE);
        assert!((projection.viewport_origin - Vec2::splat(0.5)).length() < 1e-6);
    }
}
