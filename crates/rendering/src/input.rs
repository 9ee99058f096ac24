//! Keyboard and mouse routing onto [`ViewportCamera`].

use bevy::input::mouse::{MouseScrollUnit, MouseWheel};
use bevy::prelude::*;

use crate::camera::ViewportCamera;

/// Pixel-unit scroll deltas over this count as one line.
const PIXELS_PER_LINE: f32 = 100.0;

/// Scroll wheel: one `apply_zoom` per event.
pub fn camera_zoom(
    mut scroll_evts: EventReader<MouseWheel>,
    mut camera: ResMut<ViewportCamera>,
) {
    for evt in scroll_evts.read() {
        let dy = match evt.unit {
            MouseScrollUnit::Line => evt.y,
            MouseScrollUnit::Pixel => evt.y / PIXELS_PER_LINE,
        };
        if dy != 0.0 {
            camera.apply_zoom(dy);
        }
    }
}

/// WASD/Arrow keys: one unit pan per held key per frame.
pub fn camera_pan_keyboard(keys: Res<ButtonInput<KeyCode>>, mut camera: ResMut<ViewportCamera>) {
    let mut dir = Vec2::ZERO;
    if keys.pressed(KeyCode::KeyW) || keys.pressed(KeyCode::ArrowUp) {
        dir.y -= 1.0;
    }
    if keys.pressed(KeyCode::KeyS) || keys.pressed(KeyCode::ArrowDown) {
        dir.y += 1.0;
    }
    if keys.pressed(KeyCode::KeyA) || keys.pressed(KeyCode::ArrowLeft) {
        dir.x -= 1.0;
    }
    if keys.pressed(KeyCode::KeyD) || keys.pressed(KeyCode::ArrowRight) {
        dir.x += 1.0;
    }

    if dir != Vec2::ZERO {
        camera.pan(dir.x, dir.y);
    }
}

pub fn exit_on_escape(keys: Res<ButtonInput<KeyCode>>, mut app_exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("Escape pressed, exiting");
        app_exit.send(AppExit::Success);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_event::<MouseWheel>()
            .init_resource::<ButtonInput<KeyCode>>()
            .init_resource::<ViewportCamera>()
            .add_systems(
                Update,
                (camera_zoom, camera_pan_keyboard, exit_on_escape),
            );
        app
    }

    fn press(app: &mut App, key: KeyCode) {
        app.world_mut()
            .resource_mut::<ButtonInput<KeyCode>>()
            .press(key);
    }

    fn scroll(app: &mut App, unit: MouseScrollUnit, y: f32) {
        let _ = app.world_mut().send_event(MouseWheel {
            unit,
            x: 0.0,
            y,
            window: Entity::PLACEHOLDER,
        });
    }

    #[test]
    fn test_line_scroll_zooms_in() {
        let mut app = input_app();
        scroll(&mut app, MouseScrollUnit::Line, 1.0);
        app.update();
        let b = app.world().resource::<ViewportCamera>().bounds();
        assert!((b.right - 288.0).abs() < 1e-3);
    }

    #[test]
    fn test_pixel_scroll_is_scaled_down() {
        let mut app = input_app();
        scroll(&mut app, MouseScrollUnit::Pixel, -100.0);
        app.update();
        let b = app.world().resource::<ViewportCamera>().bounds();
        assert!((b.right - 352.0).abs() < 1e-3);
    }

    #[test]
    fn test_w_and_d_pan_up_and_right() {
        let mut app = input_app();
        press(&mut app, KeyCode::KeyW);
        press(&mut app, KeyCode::KeyD);
        app.update();
        let camera = app.world().resource::<ViewportCamera>();
        // One unit per key, scaled by the default zoom level of 3.2.
        assert!((camera.position().x - 3.2).abs() < 1e-4);
        assert!((camera.position().z + 3.2).abs() < 1e-4);
        assert_eq!(camera.position().y, 100.0);
    }

    #[test]
    fn test_opposing_keys_cancel() {
        let mut app = input_app();
        press(&mut app, KeyCode::ArrowLeft);
        press(&mut app, KeyCode::ArrowRight);
        app.update();
        assert_eq!(
            *app.world().resource::<ViewportCamera>(),
            ViewportCamera::default()
        );
    }

    #[test]
    fn test_escape_requests_exit() {
        let mut app = input_app();
        press(&mut app, KeyCode::Escape);
        app.update();
        let events = app.world().resource::<Events<AppExit>>();
        assert!(!events.is_empty());
    }
}
