//! Flatcube viewer: opens a window and runs the frame loop

use flatcube::app::AppState;
use flatcube::config::ViewerConfig;
use flatcube::input::poll_events;
use flatcube::rasterizer::{argb_to_rgba8, PixelSink};
use flatcube::VERSION;
use macroquad::prelude::*;
use std::path::PathBuf;
use std::sync::OnceLock;

/// Frame deltas above this are clamped (window drag, breakpoints)
const MAX_FRAME_DT: f32 = 0.25;

/// Loaded once in `window_conf`, which macroquad runs before `main`
static CONFIG: OnceLock<ViewerConfig> = OnceLock::new();

/// Presents the framebuffer as a nearest-filtered texture stretched over the window
struct ScreenSink {
    rgba: Vec<u8>,
}

impl PixelSink for ScreenSink {
    fn present(&mut self, pixels: &[u32], stride: usize) {
        let width = stride / 4;
        if width == 0 {
            return;
        }
        let height = pixels.len() / width;

        argb_to_rgba8(pixels, &mut self.rgba);

        let (Ok(w), Ok(h)) = (u16::try_from(width), u16::try_from(height)) else {
            log::error!("framebuffer {}x{} too large to present", width, height);
            return;
        };
        let texture = Texture2D::from_rgba8(w, h, &self.rgba);
        texture.set_filter(FilterMode::Nearest);

        draw_texture_ex(
            &texture,
            0.0,
            0.0,
            WHITE,
            DrawTextureParams {
                dest_size: Some(Vec2::new(screen_width(), screen_height())),
                ..Default::default()
            },
        );
    }
}

fn config_path() -> Option<PathBuf> {
    std::env::args().nth(1).map(PathBuf::from)
}

fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
}

fn window_conf() -> Conf {
    init_logging();
    log::info!("=== Flatcube v{} ===", VERSION);

    let config = CONFIG.get_or_init(|| ViewerConfig::discover(config_path().as_deref()));
    Conf {
        window_title: format!("Flatcube v{}", VERSION),
        window_width: (config.width as f32 * config.window_scale) as i32,
        window_height: (config.height as f32 * config.window_scale) as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = CONFIG
        .get_or_init(|| ViewerConfig::discover(config_path().as_deref()))
        .clone();
    let mut app = match AppState::new(config) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            std::process::exit(1);
        }
    };

    let mut sink = ScreenSink { rgba: Vec::with_capacity(app.fb.pixels.len() * 4) };

    loop {
        let events = poll_events();
        let dt = get_frame_time().min(MAX_FRAME_DT);

        clear_background(BLACK);
        if !app.step(&events, dt, &mut sink) {
            break;
        }

        next_frame().await;
    }
}
