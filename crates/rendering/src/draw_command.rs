//! The renderer's only output unit: one oriented instance of the unit quad.

use bevy::prelude::*;

/// sRGB color, each channel in [0, 1].
pub type Rgb = [f32; 3];

/// Rotation about +Y for a heading measured from +X toward +Z.
///
/// With this convention local +X lands on `(cos h, 0, sin h)` and local +Z
/// on `(-sin h, 0, cos h)`, so a quad rotated by a road's heading lies along
/// the road and its lateral axis.
pub fn heading_rotation(heading_degrees: f32) -> Quat {
    Quat::from_rotation_y(-heading_degrees.to_radians())
}

/// Heading in degrees of a ground-plane direction.
pub fn heading_of(direction: Vec3) -> f32 {
    direction.z.atan2(direction.x).to_degrees()
}

/// Translation, rotation about the vertical axis and non-uniform scale,
/// applied to the unit quad in that order (translate · rotate · scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuadTransform {
    pub translation: Vec3,
    pub heading_degrees: f32,
    pub scale: Vec3,
}

impl QuadTransform {
    pub fn new(translation: Vec3, heading_degrees: f32, scale: Vec3) -> Self {
        Self {
            translation,
            heading_degrees,
            scale,
        }
    }

    /// Axis-aligned quad.
    pub fn unrotated(translation: Vec3, scale: Vec3) -> Self {
        Self::new(translation, 0.0, scale)
    }

    pub fn rotation(&self) -> Quat {
        heading_rotation(self.heading_degrees)
    }

    /// The rotation is about +Y by `-heading_degrees`, the opposite sign of a
    /// right-handed rotation by the heading, so local +X follows the heading.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation(), self.translation)
    }

    pub fn to_transform(&self) -> Transform {
        Transform {
            translation: self.translation,
            rotation: self.rotation(),
            scale: self.scale,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCommand {
    pub transform: QuadTransform,
    pub color: Rgb,
}

impl DrawCommand {
    pub fn new(transform: QuadTransform, color: Rgb) -> Self {
        Self { transform, color }
    }
}

/// Anything that accepts a frame's draw commands in emission order.
pub trait DrawCommandSink {
    fn submit(&mut self, command: DrawCommand);
}

impl DrawCommandSink for Vec<DrawCommand> {
    fn submit(&mut self, command: DrawCommand) {
        self.push(command);
    }
}

/// Counts what passes through to an inner sink.
pub(crate) struct CountingSink<'a, S: DrawCommandSink + ?Sized> {
    inner: &'a mut S,
    pub(crate) count: usize,
}

impl<'a, S: DrawCommandSink + ?Sized> CountingSink<'a, S> {
    pub(crate) fn new(inner: &'a mut S) -> Self {
        Self { inner, count: 0 }
    }
}

impl<S: DrawCommandSink + ?Sized> DrawCommandSink for CountingSink<'_, S> {
    fn submit(&mut self, command: DrawCommand) {
        self.count += 1;
        self.inner.submit(command);
    }
}
