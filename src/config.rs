//! Startup configuration
//!
//! Every knob the renderer reads is fixed for the lifetime of the process.
//! Defaults can be overridden with inline RON in the `DONUT_CONFIG`
//! environment variable, e.g. `DONUT_CONFIG='(n1: 100, normal_mode: Raw)'`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::rasterizer::{Direction, NormalMode, Vec3, HEIGHT, WIDTH};

/// Environment variable holding RON overrides
pub const CONFIG_ENV: &str = "DONUT_CONFIG";

/// Upper bound on `n1 * n2`; the point cloud is allocated up front
pub const MAX_POINTS: usize = 1 << 26;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("light direction {0:?} is degenerate (zero length or not finite)")]
    DegenerateLight(Vec3),
    #[error("{field} must be positive and finite, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
    #[error("{field} must be at most {max}, got {value}")]
    TooLarge { field: &'static str, value: usize, max: usize },
    #[error("rotation per update {0:?} is not finite")]
    NonFiniteRotation(Vec3),
    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DonutConfig {
    /// Scales the projected plane
    pub focal_length: f64,
    /// Camera distance from the origin along the view axis
    pub camera_distance: f64,
    /// Logical screen size the projected plane is mapped from
    pub view_width: f64,
    pub view_height: f64,
    /// Pixel resolution of the framebuffer
    pub res_x: usize,
    pub res_y: usize,
    /// Directional light, normalized at startup
    pub light_direction: Vec3,
    /// Tube radius
    pub r1: f64,
    /// Distance from the torus center to the tube center
    pub r2: f64,
    /// Steps around the tube
    pub n1: usize,
    /// Steps around the torus axis
    pub n2: usize,
    /// Rotation applied on every update tick (radians, X then Y then Z)
    pub rotation_per_update: Vec3,
    pub updates_per_second: u32,
    pub normal_mode: NormalMode,
    /// Window pixels per framebuffer pixel
    pub window_scale: u32,
    pub title: String,
}

impl Default for DonutConfig {
    fn default() -> Self {
        Self {
            focal_length: 10.0,
            camera_distance: 30.0,
            view_width: 16.0,
            view_height: 9.0,
            res_x: WIDTH,
            res_y: HEIGHT,
            light_direction: Vec3::new(0.0, -1.0, 1.0),
            r1: 2.5,
            r2: 5.0,
            n1: 250,
            n2: 500,
            rotation_per_update: Vec3::new(0.0, 0.03, 0.0),
            updates_per_second: 60,
            normal_mode: NormalMode::Normalized,
            window_scale: 3,
            title: "Donut".to_string(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn at_most(field: &'static str, value: usize, max: usize) -> Result<(), ConfigError> {
    if value > max {
        Err(ConfigError::TooLarge { field, value, max })
    } else {
        Ok(())
    }
}

fn nonzero(field: &'static str, value: usize) -> Result<(), ConfigError> {
    if value == 0 {
        Err(ConfigError::Zero { field })
    } else {
        Ok(())
    }
}

impl DonutConfig {
    /// Parse RON overrides on top of the defaults, then validate
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: DonutConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults, overridden by `DONUT_CONFIG` when it is set
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var(CONFIG_ENV) {
            Ok(s) if !s.trim().is_empty() => Self::from_ron_str(&s),
            _ => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.light()?;
        positive("focal_length", self.focal_length)?;
        positive("camera_distance", self.camera_distance)?;
        positive("view_width", self.view_width)?;
        positive("view_height", self.view_height)?;
        positive("r1", self.r1)?;
        positive("r2", self.r2)?;
        nonzero("res_x", self.res_x)?;
        nonzero("res_y", self.res_y)?;
        // texture upload takes u16 dimensions
        at_most("res_x", self.res_x, u16::MAX as usize)?;
        at_most("res_y", self.res_y, u16::MAX as usize)?;
        nonzero("n1", self.n1)?;
        nonzero("n2", self.n2)?;
        nonzero("updates_per_second", self.updates_per_second as usize)?;
        nonzero("window_scale", self.window_scale as usize)?;
        if self.window_size().is_none() {
            return Err(ConfigError::TooLarge {
                field: "window_scale",
                value: self.window_scale as usize,
                max: i32::MAX as usize / self.res_x.max(self.res_y),
            });
        }
        match self.n1.checked_mul(self.n2) {
            Some(n) if n <= MAX_POINTS => {}
            _ => {
                return Err(ConfigError::TooLarge {
                    field: "n1 * n2",
                    value: self.n1.saturating_mul(self.n2),
                    max: MAX_POINTS,
                })
            }
        }
        if !self.rotation_per_update.is_finite() {
            return Err(ConfigError::NonFiniteRotation(self.rotation_per_update));
        }
        Ok(())
    }

    /// Normalized light direction
    pub fn light(&self) -> Result<Direction, ConfigError> {
        Direction::new(self.light_direction).ok_or(ConfigError::DegenerateLight(self.light_direction))
    }

    /// Physical window size in pixels, None if it does not fit an i32
    pub fn window_size(&self) -> Option<(i32, i32)> {
        let scale = self.window_scale as usize;
        let w = i32::try_from(self.res_x.checked_mul(scale)?).ok()?;
        let h = i32::try_from(self.res_y.checked_mul(scale)?).ok()?;
        Some((w, h))
    }

    /// Seconds per update tick
    pub fn update_step(&self) -> f64 {
        1.0 / self.updates_per_second as f64
    }

    pub fn to_ron_pretty(&self) -> String {
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(2)
            .indentor("  ".to_string());
        ron::ser::to_string_pretty(self, pretty).unwrap_or_else(|e| format!("<unprintable config: {}>", e))
    }
}
