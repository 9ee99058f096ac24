use bevy::prelude::*;

/// 8-bit-per-channel vehicle paint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct VehicleColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl VehicleColor {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels scaled to [0, 1].
    pub fn to_unit_rgb(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    /// Index into the owning road's lane list.
    pub lane: usize,
    /// Distance travelled from the road's start junction.
    pub distance_along_road: f32,
    /// x = length along the road, z = width across it. y is unused.
    pub dimensions: Vec3,
    pub color: VehicleColor,
    /// World units per second. Only the stepper reads this.
    pub speed: f32,
}

impl Vehicle {
    pub fn new(lane: usize, distance_along_road: f32, color: VehicleColor) -> Self {
        Self {
            lane,
            distance_along_road,
            dimensions: Vec3::new(4.5, 1.5, 2.0),
            color,
            speed: 0.0,
        }
    }

    pub fn with_speed(mut self, speed: f32) -> Self {
        self.speed = speed;
        self
    }

    pub fn with_dimensions(mut self, length: f32, width: f32) -> Self {
        self.dimensions = Vec3::new(length, self.dimensions.y, width);
        self
    }
}
