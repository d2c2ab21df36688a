//! Donut scene: owns the point cloud and runs update/render
//!
//! Points live in one contiguous buffer for the whole process. `update`
//! rotates them in place; `render` derives the transient projected list
//! and fills the framebuffer. Only the render thread touches any of it.

use crate::config::{ConfigError, DonutConfig};
use crate::rasterizer::{
    render_points, Camera, FrameStats, Framebuffer, Point2D, Point3D, RasterSettings, Rotation,
    Viewport,
};
use super::{generate_torus, TorusShape};

pub struct DonutScene {
    pub points: Vec<Point3D>,
    pub framebuffer: Framebuffer,
    pub camera: Camera,
    pub viewport: Viewport,
    pub settings: RasterSettings,
    /// Rotation applied by each `update`
    pub spin: Rotation,
    /// Stats from the last `render`
    pub last_stats: FrameStats,
    projected: Vec<Point2D>,
}

impl DonutScene {
    pub fn new(config: &DonutConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let shape = TorusShape {
            r1: config.r1,
            r2: config.r2,
            n1: config.n1,
            n2: config.n2,
        };
        let points = generate_torus(&shape);

        Ok(Self {
            projected: Vec::with_capacity(points.len()),
            points,
            framebuffer: Framebuffer::new(config.res_x, config.res_y),
            camera: Camera::new(config.focal_length, config.camera_distance),
            viewport: Viewport {
                view_width: config.view_width,
                view_height: config.view_height,
                res_x: config.res_x,
                res_y: config.res_y,
            },
            settings: RasterSettings {
                light_dir: config.light()?,
                normal_mode: config.normal_mode,
            },
            spin: Rotation::from_angles(config.rotation_per_update),
            last_stats: FrameStats::default(),
        })
    }

    /// One logic tick
    pub fn update(&mut self) {
        let spin = self.spin;
        self.rotate(&spin);
    }

    /// Rotate every point and its ring center by the same rotation
    pub fn rotate(&mut self, rotation: &Rotation) {
        if rotation.is_identity() {
            return;
        }
        for p in &mut self.points {
            p.rotate(rotation);
        }
    }

    /// Project, shade and rasterize the current point cloud
    pub fn render(&mut self) -> FrameStats {
        let stats = render_points(
            &mut self.framebuffer,
            &self.points,
            &mut self.projected,
            &self.camera,
            &self.viewport,
            &self.settings,
        );
        if stats.dropped() > 0 {
            log::debug!(
                "dropped {} points ({} offscreen, {} behind camera)",
                stats.dropped(),
                stats.dropped_offscreen,
                stats.dropped_behind_camera
            );
        }
        self.last_stats = stats;
        stats
    }

    /// Projected points from the last `render`
    #[cfg(test)]
    pub fn projected(&self) -> &[Point2D] {
        &self.projected
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rasterizer::{Color, Vec3};

    fn small_config() -> DonutConfig {
        DonutConfig {
            r1: 1.0,
            r2: 2.0,
            n1: 4,
            n2: 4,
            res_x: 100,
            res_y: 100,
            rotation_per_update: Vec3::ZERO,
            ..Default::default()
        }
    }

    #[test]
    fn test_small_torus_end_to_end() {
        let mut scene = DonutScene::new(&small_config()).unwrap();
        assert_eq!(scene.points.len(), 16);

        scene.update();
        let stats = scene.render();

        assert_eq!(stats.dropped(), 0);
        assert_eq!(scene.projected().len(), 16);
        for p in scene.projected() {
            let (x, y) = scene.viewport.to_pixel(p);
            assert!((0..100).contains(&x), "x = {}", x);
            assert!((0..100).contains(&y), "y = {}", y);
        }
        assert_eq!(stats.plotted + stats.occluded, 16);
        assert!(scene.framebuffer.pixels.iter().any(|&p| p != 0));
    }

    #[test]
    fn test_update_uses_configured_spin() {
        let config = DonutConfig { rotation_per_update: Vec3::new(0.0, 0.03, 0.0), ..small_config() };
        let mut stepped = DonutScene::new(&config).unwrap();
        for _ in 0..10 {
            stepped.update();
        }

        let mut once = DonutScene::new(&config).unwrap();
        once.rotate(&Rotation::new(0.0, 0.3, 0.0));

        for (a, b) in stepped.points.iter().zip(&once.points) {
            assert!((a.position - b.position).len() < 1e-9);
            assert!((a.ring_center - b.ring_center).len() < 1e-9);
        }
    }

    #[test]
    fn test_rotation_preserves_radius_and_normals() {
        let config = DonutConfig { n1: 12, n2: 18, ..Default::default() };
        let mut scene = DonutScene::new(&config).unwrap();
        let before: Vec<f64> = scene.points.iter().map(|p| p.position.len()).collect();

        scene.rotate(&Rotation::new(0.7, -1.3, 2.1));

        for (p, r) in scene.points.iter().zip(before) {
            assert!((p.position.len() - r).abs() < 1e-9);
            assert!((p.normal().len() - config.r1).abs() < 1e-9);
        }
    }

    #[test]
    fn test_default_scene_renders_without_drops() {
        let config = DonutConfig { n1: 50, n2: 100, ..Default::default() };
        let mut scene = DonutScene::new(&config).unwrap();
        for _ in 0..5 {
            scene.update();
            let stats = scene.render();
            assert_eq!(stats.dropped(), 0);
            assert!(stats.plotted > 0);
        }
    }

    #[test]
    fn test_camera_inside_torus_drops_points() {
        // Camera at z = -4 sits inside the near side of the tube
        let config = DonutConfig { camera_distance: 4.0, n1: 20, n2: 40, ..Default::default() };
        let mut scene = DonutScene::new(&config).unwrap();
        let stats = scene.render();
        assert!(stats.dropped_behind_camera > 0);
        assert_eq!(
            stats.plotted + stats.occluded + stats.dropped(),
            scene.points.len()
        );
    }

    #[test]
    fn test_render_clears_previous_frame() {
        let mut scene = DonutScene::new(&small_config()).unwrap();
        scene.framebuffer.pixels.fill(Color::gray(0xff).0);
        scene.render();
        assert!(scene.framebuffer.pixels.iter().any(|&p| p == 0));
    }

    #[test]
    fn test_invalid_config_refused() {
        let config = DonutConfig { light_direction: Vec3::ZERO, ..small_config() };
        assert!(matches!(DonutScene::new(&config), Err(ConfigError::DegenerateLight(_))));
    }
}
