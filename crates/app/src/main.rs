use bevy::prelude::*;
use bevy::window::PresentMode;

use simulation::demo::build_demo_network;

mod style_file;

/// Seed for the demo network when `TRAFFIC_VIEW_SEED` is unset.
const DEFAULT_DEMO_SEED: u64 = 7;

fn demo_seed() -> u64 {
    match std::env::var("TRAFFIC_VIEW_SEED") {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!("TRAFFIC_VIEW_SEED={raw:?} is not a number; using {DEFAULT_DEMO_SEED}");
            DEFAULT_DEMO_SEED
        }),
        Err(_) => DEFAULT_DEMO_SEED,
    }
}

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(Window {
            title: "Traffic Simulator".to_string(),
            resolution: (1280.0, 720.0).into(),
            present_mode: PresentMode::AutoVsync,
            ..default()
        }),
        ..default()
    }));

    // Logging is only up once DefaultPlugins is in.
    app.insert_resource(style_file::style_from_env())
        .insert_resource(build_demo_network(demo_seed()))
        .add_plugins((simulation::SimulationPlugin, rendering::RenderingPlugin));

    app.run();
}
