//! Donut module - torus point cloud and its per-frame pipeline

mod torus;
mod scene;

pub use torus::*;
pub use scene::*;
