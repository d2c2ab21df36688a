//! Software point-cloud rasterizer
//!
//! Features:
//! - Rigid 3-axis rotation about the origin
//! - Pinhole perspective projection with inverse-depth
//! - Per-point diffuse lighting from one directional light
//! - Nearest-point-wins depth buffer

mod math;
mod types;
mod render;

pub use math::*;
pub use types::*;
pub use render::*;

/// Default virtual screen resolution (16:9)
pub const WIDTH: usize = 320;
pub const HEIGHT: usize = 180;
