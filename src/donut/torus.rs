//! Torus point generation

use std::f64::consts::TAU;
use crate::rasterizer::{Point3D, Vec3};

/// Torus shape and sampling density
#[derive(Debug, Clone, Copy)]
pub struct TorusShape {
    /// Tube radius
    pub r1: f64,
    /// Distance from the torus center to the tube center
    pub r2: f64,
    /// Steps around the tube
    pub n1: usize,
    /// Steps around the torus axis (Y)
    pub n2: usize,
}

impl TorusShape {
    pub fn point_count(&self) -> usize {
        self.n1.saturating_mul(self.n2)
    }
}

/// Sample `n1 * n2` points on a torus centered at the origin, lying in
/// the XZ plane. Each point carries the center of its tube circle.
pub fn generate_torus(shape: &TorusShape) -> Vec<Point3D> {
    let mut points = Vec::with_capacity(shape.point_count());

    for i in 0..shape.n1 {
        let theta = i as f64 * TAU / shape.n1 as f64;
        let m = shape.r2 + shape.r1 * theta.cos();
        let y = shape.r1 * theta.sin();

        for j in 0..shape.n2 {
            let phi = j as f64 * TAU / shape.n2 as f64;
            let (sin_phi, cos_phi) = phi.sin_cos();
            points.push(Point3D::new(
                Vec3::new(m * cos_phi, y, m * sin_phi),
                Vec3::new(shape.r2 * cos_phi, 0.0, shape.r2 * sin_phi),
            ));
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_count() {
        for (n1, n2) in [(1, 1), (1, 7), (4, 4), (13, 3), (250, 500)] {
            let shape = TorusShape { r1: 2.5, r2: 5.0, n1, n2 };
            assert_eq!(generate_torus(&shape).len(), n1 * n2);
        }
    }

    #[test]
    fn test_distance_to_ring_center_is_tube_radius() {
        let shape = TorusShape { r1: 2.5, r2: 5.0, n1: 37, n2: 23 };
        for p in generate_torus(&shape) {
            assert!((p.normal().len() - shape.r1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_ring_centers_on_axis_circle() {
        let shape = TorusShape { r1: 1.0, r2: 2.0, n1: 5, n2: 9 };
        for p in generate_torus(&shape) {
            assert_eq!(p.ring_center.y, 0.0);
            assert!((p.ring_center.len() - shape.r2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_first_point() {
        let shape = TorusShape { r1: 1.0, r2: 2.0, n1: 4, n2: 4 };
        let points = generate_torus(&shape);
        assert_eq!(points[0].position, Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(points[0].ring_center, Vec3::new(2.0, 0.0, 0.0));
        // i = 1: top of the tube, normal straight up
        let n = points[4].normal();
        assert!((n - Vec3::new(0.0, 1.0, 0.0)).len() < 1e-9);
    }
}
