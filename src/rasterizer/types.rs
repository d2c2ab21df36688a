//! Core types for the rasterizer

use super::math::{Rotation, Vec3};

/// Packed 24-bit RGB color (0xRRGGBB)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color(pub u32);

impl Color {
    pub const BLACK: Color = Color(0x000000);

    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self(((r as u32) << 16) | ((g as u32) << 8) | (b as u32))
    }

    /// Neutral gray: the same level in all three channels
    pub fn gray(level: u8) -> Self {
        Self::new(level, level, level)
    }

    pub fn r(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(self) -> u8 {
        self.0 as u8
    }

    /// Convert to [u8; 4] RGBA for texture upload (opaque)
    pub fn to_rgba(self) -> [u8; 4] {
        [self.r(), self.g(), self.b(), 255]
    }
}

/// A sample on the torus surface.
///
/// `ring_center` is the center of the tube circle the sample lies on, so
/// `position - ring_center` is the outward surface normal. Both fields are
/// rotated together, which keeps that true after any rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point3D {
    pub position: Vec3,
    pub ring_center: Vec3,
}

impl Point3D {
    pub fn new(position: Vec3, ring_center: Vec3) -> Self {
        Self { position, ring_center }
    }

    /// Outward normal, not unit length (magnitude is the tube radius)
    pub fn normal(&self) -> Vec3 {
        self.position - self.ring_center
    }

    pub fn rotate(&mut self, rotation: &Rotation) {
        self.position = rotation.apply(self.position);
        self.ring_center = rotation.apply(self.ring_center);
    }
}

/// Per-frame projection of a Point3D
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point2D {
    /// Screen-plane X in logical units, before pixel quantization
    pub x: f64,
    /// Screen-plane Y in logical units, up is positive
    pub y: f64,
    /// Inverse depth, 1 / (z + camera distance). Larger is nearer.
    pub z_depth: f64,
    pub luminance: Color,
}
