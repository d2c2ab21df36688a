//! Vector math and rigid rotation for the point cloud

use std::ops::{Add, Mul, Neg, Sub};
use serde::{Deserialize, Serialize};

/// 3D Vector
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn dot(self, other: Vec3) -> f64 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn len(self) -> f64 {
        self.dot(self).sqrt()
    }

    pub fn normalize(self) -> Vec3 {
        let l = self.len();
        if l == 0.0 {
            return Vec3::ZERO;
        }
        Vec3 {
            x: self.x / l,
            y: self.y / l,
            z: self.z / l,
        }
    }

    pub fn scale(self, s: f64) -> Vec3 {
        Vec3 {
            x: self.x * s,
            y: self.y * s,
            z: self.z * s,
        }
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }

    /// Rotate about the X axis, acting on the (z, y) plane
    pub fn rotate_x(self, sin: f64, cos: f64) -> Vec3 {
        Vec3 {
            x: self.x,
            y: self.z * sin + self.y * cos,
            z: self.z * cos - self.y * sin,
        }
    }

    /// Rotate about the Y axis, acting on the (x, z) plane
    pub fn rotate_y(self, sin: f64, cos: f64) -> Vec3 {
        Vec3 {
            x: self.x * cos - self.z * sin,
            y: self.y,
            z: self.x * sin + self.z * cos,
        }
    }

    /// Rotate about the Z axis, acting on the (x, y) plane
    pub fn rotate_z(self, sin: f64, cos: f64) -> Vec3 {
        Vec3 {
            x: self.x * cos - self.y * sin,
            y: self.x * sin + self.y * cos,
            z: self.z,
        }
    }
}

impl Add for Vec3 {
    type Output = Vec3;
    fn add(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x + other.x,
            y: self.y + other.y,
            z: self.z + other.z,
        }
    }
}

impl Sub for Vec3 {
    type Output = Vec3;
    fn sub(self, other: Vec3) -> Vec3 {
        Vec3 {
            x: self.x - other.x,
            y: self.y - other.y,
            z: self.z - other.z,
        }
    }
}

impl Mul<f64> for Vec3 {
    type Output = Vec3;
    fn mul(self, s: f64) -> Vec3 {
        self.scale(s)
    }
}

impl Neg for Vec3 {
    type Output = Vec3;
    fn neg(self) -> Vec3 {
        self.scale(-1.0)
    }
}

/// Unit-length direction, e.g. the directional light.
/// Can only be built from a finite, non-zero vector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Direction(Vec3);

impl Direction {
    pub fn new(v: Vec3) -> Option<Self> {
        if !v.is_finite() {
            return None;
        }
        let l = v.len();
        if l == 0.0 || !l.is_finite() {
            return None;
        }
        Some(Direction(v.scale(1.0 / l)))
    }

    pub fn vec(self) -> Vec3 {
        self.0
    }
}

/// Rigid rotation applied as X, then Y, then Z about the origin.
/// Sines and cosines are computed once so a whole point cloud can be
/// rotated without repeating the trig per point.
#[derive(Debug, Clone, Copy)]
pub struct Rotation {
    pub angles: Vec3,
    sin: Vec3,
    cos: Vec3,
}

impl Rotation {
    pub fn new(ax: f64, ay: f64, az: f64) -> Self {
        Self {
            angles: Vec3::new(ax, ay, az),
            sin: Vec3::new(ax.sin(), ay.sin(), az.sin()),
            cos: Vec3::new(ax.cos(), ay.cos(), az.cos()),
        }
    }

    pub fn from_angles(angles: Vec3) -> Self {
        Self::new(angles.x, angles.y, angles.z)
    }

    pub fn is_identity(&self) -> bool {
        self.angles == Vec3::ZERO
    }

    pub fn apply(&self, v: Vec3) -> Vec3 {
        v.rotate_x(self.sin.x, self.cos.x)
            .rotate_y(self.sin.y, self.cos.y)
            .rotate_z(self.sin.z, self.cos.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).len() < EPS
    }

    #[test]
    fn test_vec3_dot() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert!((a.dot(b) - 32.0).abs() < EPS);
    }

    #[test]
    fn test_direction_normalizes() {
        let d = Direction::new(Vec3::new(0.0, -1.0, 1.0)).unwrap();
        assert!((d.vec().len() - 1.0).abs() < EPS);
        assert!((d.vec().y + std::f64::consts::FRAC_1_SQRT_2).abs() < EPS);
    }

    #[test]
    fn test_direction_rejects_degenerate() {
        assert!(Direction::new(Vec3::ZERO).is_none());
        assert!(Direction::new(Vec3::new(f64::NAN, 0.0, 1.0)).is_none());
        assert!(Direction::new(Vec3::new(f64::INFINITY, 0.0, 0.0)).is_none());
    }

    #[test]
    fn test_quarter_turns() {
        let q = std::f64::consts::FRAC_PI_2;
        // X: (z, y) plane, z goes to y
        let v = Rotation::new(q, 0.0, 0.0).apply(Vec3::new(0.0, 0.0, 1.0));
        assert!(close(v, Vec3::new(0.0, 1.0, 0.0)));
        // Y: (x, z) plane, x goes to z
        let v = Rotation::new(0.0, q, 0.0).apply(Vec3::new(1.0, 0.0, 0.0));
        assert!(close(v, Vec3::new(0.0, 0.0, 1.0)));
        // Z: (x, y) plane, x goes to y
        let v = Rotation::new(0.0, 0.0, q).apply(Vec3::new(1.0, 0.0, 0.0));
        assert!(close(v, Vec3::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let (a, b, c): (f64, f64, f64) = (0.4, -1.1, 2.3);
        let v = Vec3::new(1.5, -2.0, 0.75);
        let manual = v
            .rotate_x(a.sin(), a.cos())
            .rotate_y(b.sin(), b.cos())
            .rotate_z(c.sin(), c.cos());
        assert!(close(Rotation::new(a, b, c).apply(v), manual));
    }

    #[test]
    fn test_rotation_preserves_norm() {
        let rotations = [
            Rotation::new(0.0, 0.03, 0.0),
            Rotation::new(1.0, 2.0, 3.0),
            Rotation::new(-0.7, 0.0, 5.5),
        ];
        let points = [
            Vec3::new(7.5, 0.0, 0.0),
            Vec3::new(-3.2, 2.5, 4.1),
            Vec3::new(0.001, -6.0, 0.3),
        ];
        for r in &rotations {
            for p in &points {
                assert!((r.apply(*p).len() - p.len()).abs() < EPS);
            }
        }
    }

    #[test]
    fn test_identity_rotation() {
        let r = Rotation::new(0.0, 0.0, 0.0);
        assert!(r.is_identity());
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(r.apply(v), v);
    }
}
