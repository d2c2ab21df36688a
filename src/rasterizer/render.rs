//! Core rendering functions
//! Point projection, per-point shading and depth-buffered plotting

use serde::{Deserialize, Serialize};
use super::math::{Direction, Vec3};
use super::types::{Color, Point2D, Point3D};

/// Framebuffer for software rendering
pub struct Framebuffer {
    pub pixels: Vec<u32>,   // 0xRRGGBB, one per pixel
    pub zbuffer: Vec<f64>,  // Inverse depth, 0.0 = empty
    pub width: usize,
    pub height: usize,
}

/// Outcome of a single depth-tested write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Plot {
    Written,
    Occluded,
    OutOfBounds,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height],
            zbuffer: vec![0.0; width * height],
            width,
            height,
        }
    }

    pub fn clear(&mut self) {
        self.pixels.fill(Color::BLACK.0);
        self.zbuffer.fill(0.0);
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x < self.width && y < self.height {
            Some(Color(self.pixels[y * self.width + x]))
        } else {
            None
        }
    }

    /// Depth-tested write. Larger `z_depth` is nearer and wins; an empty
    /// cell (0.0) accepts any write. Coordinates outside the buffer are
    /// rejected instead of wrapping into a neighbouring row.
    pub fn plot(&mut self, x: i64, y: i64, z_depth: f64, color: Color) -> Plot {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return Plot::OutOfBounds;
        }
        let idx = y as usize * self.width + x as usize;
        let current = self.zbuffer[idx];
        if current == 0.0 || z_depth > current {
            self.zbuffer[idx] = z_depth;
            self.pixels[idx] = color.0;
            Plot::Written
        } else {
            Plot::Occluded
        }
    }

    /// Expand the packed RGB buffer into RGBA bytes for texture upload
    pub fn write_rgba8(&self, out: &mut Vec<u8>) {
        out.clear();
        out.reserve(self.pixels.len() * 4);
        for &p in &self.pixels {
            out.extend_from_slice(&Color(p).to_rgba());
        }
    }
}

/// Pinhole camera looking down +Z from `distance` units in front of the origin
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub focal_length: f64,
    pub distance: f64,
}

impl Camera {
    pub fn new(focal_length: f64, distance: f64) -> Self {
        Self { focal_length, distance }
    }

    /// Perspective divide onto the screen plane.
    /// Returns None for points at or behind the camera.
    pub fn project(&self, p: Vec3) -> Option<Point2D> {
        let denom = self.distance + p.z;
        if denom <= 0.0 || !denom.is_finite() {
            return None;
        }
        Some(Point2D {
            x: self.focal_length * p.x / denom,
            y: self.focal_length * p.y / denom,
            z_depth: 1.0 / denom,
            luminance: Color::BLACK,
        })
    }
}

/// Maps the logical screen plane (view_width x view_height, origin at the
/// center, Y up) onto the pixel grid (row 0 at the top)
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub view_width: f64,
    pub view_height: f64,
    pub res_x: usize,
    pub res_y: usize,
}

impl Viewport {
    /// Points very close to the camera plane land far off screen; the
    /// float to int cast saturates and so does the offset.
    pub fn to_pixel(&self, p: &Point2D) -> (i64, i64) {
        let sx = (p.x * self.res_x as f64 / self.view_width).round() as i64;
        let sy = (p.y * self.res_y as f64 / self.view_height).round() as i64;
        let px = sx.saturating_add((self.res_x / 2) as i64);
        let py = ((self.res_y / 2) as i64).saturating_sub(sy);
        (px, py)
    }
}

/// How the surface normal enters the lighting dot product
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NormalMode {
    /// Unit normal: brightness depends only on the angle to the light
    #[default]
    Normalized,
    /// Normal as stored (length = tube radius), so brightness scales with r1
    Raw,
}

/// Rasterizer settings
#[derive(Debug, Clone, Copy)]
pub struct RasterSettings {
    pub light_dir: Direction,
    pub normal_mode: NormalMode,
}

/// Grayscale diffuse term for one point.
/// A negative dot product with the light direction means lit; zero or
/// positive is black. Levels saturate at 255.
pub fn shade(normal: Vec3, settings: &RasterSettings) -> Color {
    let n = match settings.normal_mode {
        NormalMode::Normalized => normal.normalize(),
        NormalMode::Raw => normal,
    };
    let product = n.dot(settings.light_dir.vec());
    // NaN falls through to black as well
    if !(product < 0.0) {
        return Color::BLACK;
    }
    let level = (-product * 256.0).floor().clamp(0.0, 255.0) as u8;
    Color::gray(level)
}

/// Per-frame counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub plotted: usize,
    pub occluded: usize,
    pub dropped_offscreen: usize,
    pub dropped_behind_camera: usize,
}

impl FrameStats {
    pub fn dropped(&self) -> usize {
        self.dropped_offscreen + self.dropped_behind_camera
    }
}

/// Project and shade every point into `out` (cleared first).
/// Returns how many points were behind the camera and skipped.
pub fn project_points(
    points: &[Point3D],
    camera: &Camera,
    settings: &RasterSettings,
    out: &mut Vec<Point2D>,
) -> usize {
    out.clear();
    let mut behind = 0;
    for p in points {
        match camera.project(p.position) {
            Some(mut projected) => {
                projected.luminance = shade(p.normal(), settings);
                out.push(projected);
            }
            None => behind += 1,
        }
    }
    behind
}

/// Plot projected points in order, nearest wins per pixel
pub fn rasterize_points(fb: &mut Framebuffer, points: &[Point2D], viewport: &Viewport) -> FrameStats {
    let mut stats = FrameStats::default();
    for p in points {
        let (x, y) = viewport.to_pixel(p);
        match fb.plot(x, y, p.z_depth, p.luminance) {
            Plot::Written => stats.plotted += 1,
            Plot::Occluded => stats.occluded += 1,
            Plot::OutOfBounds => stats.dropped_offscreen += 1,
        }
    }
    stats
}

/// Full frame: clear, project, shade, rasterize
pub fn render_points(
    fb: &mut Framebuffer,
    points: &[Point3D],
    scratch: &mut Vec<Point2D>,
    camera: &Camera,
    viewport: &Viewport,
    settings: &RasterSettings,
) -> FrameStats {
    fb.clear();
    let behind = project_points(points, camera, settings, scratch);
    let mut stats = rasterize_points(fb, scratch, viewport);
    stats.dropped_behind_camera = behind;
    stats
}
