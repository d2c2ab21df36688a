//! Application state and frame timing
//!
//! Logic runs at a fixed rate; rendering happens once per loop iteration
//! after any due updates have caught up.

use crate::config::{ConfigError, DonutConfig};
use crate::donut::DonutScene;
use crate::rasterizer::FrameStats;

/// Accumulates elapsed time and hands out fixed-size update ticks
#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Seconds per tick
    pub step: f64,
    /// Time carried over to the next frame
    pub accumulator: f64,
}

impl FixedTimestep {
    pub fn new(step: f64) -> Self {
        Self { step, accumulator: 0.0 }
    }

    /// Add `delta` seconds and return how many ticks are now due
    pub fn advance(&mut self, delta: f64) -> u32 {
        if delta > 0.0 && delta.is_finite() {
            self.accumulator += delta;
        }
        let mut ticks = 0;
        while self.accumulator >= self.step {
            self.accumulator -= self.step;
            ticks += 1;
        }
        ticks
    }
}

/// Counts rendered frames and reports once per second
#[derive(Debug, Clone)]
pub struct FpsCounter {
    frames: u32,
    elapsed: f64,
    last_fps: u32,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self { frames: 0, elapsed: 0.0, last_fps: 0 }
    }

    /// Record one frame. Returns the frame count of the second that just
    /// finished, if one did.
    pub fn frame(&mut self, delta: f64) -> Option<u32> {
        self.frames += 1;
        if delta > 0.0 && delta.is_finite() {
            self.elapsed += delta;
        }
        if self.elapsed >= 1.0 {
            self.elapsed -= 1.0;
            self.last_fps = self.frames;
            self.frames = 0;
            return Some(self.last_fps);
        }
        None
    }

    pub fn fps(&self) -> u32 {
        self.last_fps
    }
}

impl Default for FpsCounter {
    fn default() -> Self {
        Self::new()
    }
}

/// Main application state
pub struct AppState {
    pub scene: DonutScene,
    pub clock: FixedTimestep,
    pub fps: FpsCounter,
    pub title: String,
    /// Cleared to stop the loop at the next iteration
    pub running: bool,
    /// RGBA scratch for texture upload
    pub rgba: Vec<u8>,
}

impl AppState {
    pub fn new(config: &DonutConfig) -> Result<Self, ConfigError> {
        let scene = DonutScene::new(config)?;
        Ok(Self {
            rgba: Vec::with_capacity(scene.framebuffer.pixels.len() * 4),
            scene,
            clock: FixedTimestep::new(config.update_step()),
            fps: FpsCounter::new(),
            title: config.title.clone(),
            running: true,
        })
    }

    /// Run any due updates, then render one frame.
    /// Returns the number of updates performed and the frame stats.
    pub fn step(&mut self, delta: f64) -> (u32, FrameStats) {
        let ticks = self.clock.advance(delta);
        for _ in 0..ticks {
            self.scene.update();
        }
        let stats = self.scene.render();

        if let Some(fps) = self.fps.frame(delta) {
            log::info!("{}", self.title_label_for(fps));
        }
        (ticks, stats)
    }

    /// Title with the last measured frame rate
    pub fn title_label(&self) -> String {
        self.title_label_for(self.fps.fps())
    }

    fn title_label_for(&self, fps: u32) -> String {
        format!("{} | {} fps", self.title, fps)
    }

    /// Refresh and return the RGBA bytes of the current frame
    pub fn frame_rgba(&mut self) -> &[u8] {
        self.scene.framebuffer.write_rgba8(&mut self.rgba);
        &self.rgba
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Stop on Escape or a window close request. Returns whether the
    /// loop should keep going.
    pub fn poll_quit(&mut self, escape_pressed: bool, close_requested: bool) -> bool {
        if escape_pressed || close_requested {
            log::info!("Quit requested");
            self.stop();
        }
        self.running
    }
}
