/// Half of the horizontal world extent. The camera never shows past ±this.
pub const WORLD_HALF_WIDTH: f32 = 3200.0;
/// Half of the vertical (screen-space) world extent.
pub const WORLD_HALF_HEIGHT: f32 = 1800.0;

/// Fixed simulation step in seconds.
pub const SIM_TIMESTEP_SECS: f64 = 1.0 / 30.0;

/// Spacing between junctions in the demo grid.
pub const DEMO_BLOCK_SIZE: f32 = 120.0;
/// Radius of every junction in the demo grid.
pub const DEMO_JUNCTION_RADIUS: f32 = 8.0;
