//! Donut: real-time software rasterizer for a rotating torus
//!
//! Everything is drawn on the CPU:
//! - Torus sampled as a point cloud, each point knowing its tube center
//! - Rigid rotation at a fixed 60 Hz logic rate
//! - Pinhole perspective projection with an inverse-depth buffer
//! - Per-point grayscale diffuse lighting from one directional light
//!
//! The finished frame is uploaded as a texture and scaled to the window.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod rasterizer;
mod donut;
mod config;
mod app;

use macroquad::prelude::*;
use app::AppState;
use config::DonutConfig;
use rasterizer::{HEIGHT, WIDTH};

fn window_conf() -> Conf {
    // Errors are reported from main once logging is up
    let config = DonutConfig::from_env().unwrap_or_default();
    let (window_width, window_height) = config
        .window_size()
        .unwrap_or((WIDTH as i32 * 3, HEIGHT as i32 * 3));
    Conf {
        window_title: config.title.clone(),
        window_width,
        window_height,
        window_resizable: false,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    env_logger::init();

    let config = match DonutConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    log::info!("=== Donut v{} ===", VERSION);
    log::info!("Configuration:\n{}", config.to_ron_pretty());

    let mut app = match AppState::new(&config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to build scene: {}", e);
            std::process::exit(1);
        }
    };
    log::info!(
        "Generated {} points, rendering at {}x{}",
        app.scene.points.len(),
        config.res_x,
        config.res_y
    );

    let (fb_w, fb_h) = (app.scene.framebuffer.width, app.scene.framebuffer.height);

    // Closing the window clears the running flag instead of killing the process
    prevent_quit();

    while app.running {
        if !app.poll_quit(is_key_pressed(KeyCode::Escape), is_quit_requested()) {
            continue;
        }

        let delta = get_frame_time() as f64;
        app.step(delta);

        // Convert framebuffer to texture and draw to the whole window
        let texture = Texture2D::from_rgba8(fb_w as u16, fb_h as u16, app.frame_rgba());
        texture.set_filter(FilterMode::Nearest);

        clear_background(BLACK);
        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(vec2(screen_width(), screen_height())),
                ..Default::default()
            },
        );

        draw_text(&app.title_label(), 8.0, 20.0, 20.0, Color::from_rgba(0, 190, 230, 255));
        let dropped = app.scene.last_stats.dropped();
        if dropped > 0 {
            draw_text(&format!("dropped {}", dropped), 8.0, 40.0, 20.0, Color::from_rgba(230, 120, 0, 255));
        }

        next_frame().await;
    }

    log::info!("Stopped");
}
