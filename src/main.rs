//! TILEPUSH: a tile-grid push-block arcade mechanic
//!
//! Walk into a block and keep pushing: the block launches and slides
//! until it hits a wall, another block, or the edge of the playfield.
//! All the interesting decisions live in `sim/` - this file is window
//! bootstrap and the frame loop.
//!
//! Keys: arrows move, R restarts the level, F1 toggles the physics trace.

/// Version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

mod config;
mod input;
mod level;
mod render;
mod sim;

use std::path::Path;

use macroquad::prelude::*;

use config::Tuning;
use level::LevelLayout;
use sim::{GridBounds, Simulation};

/// Long frames (window drags, breakpoints) are clamped so no body can
/// move further than a fraction of a tile in one tick.
const MAX_TICK_DT: f32 = 0.05;

fn window_conf() -> Conf {
    Conf {
        window_title: format!("TILEPUSH v{}", VERSION),
        window_width: 640,
        window_height: 480,
        window_resizable: false,
        ..Default::default()
    }
}

/// The layout to play: a RON file given on the command line, or the
/// built-in level. A broken file falls back with a message rather than
/// refusing to start.
fn pick_layout() -> LevelLayout {
    match std::env::args().nth(1) {
        Some(path) => match LevelLayout::load(Path::new(&path)) {
            Ok(layout) => layout,
            Err(e) => {
                eprintln!("Failed to load level {}: {}", path, e);
                LevelLayout::builtin()
            }
        },
        None => LevelLayout::builtin(),
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    // Initialize crash logging FIRST (before any other code)
    #[cfg(not(target_arch = "wasm32"))]
    crashlog::setup!(crashlog::cargo_metadata!().capitalized(), false);

    let tuning = Tuning::load_or_default(Path::new("tuning.ron"));
    let layout = pick_layout();

    let mut sim = Simulation::new(tuning, GridBounds::new(1, 1, tuning.tile_size));
    if let Err(e) = level::load_into(&mut sim, &layout) {
        // Only reachable with a hand-built layout; the built-in one is valid
        eprintln!("Failed to build level: {}", e);
        return;
    }

    loop {
        if input::restart_requested() {
            if let Err(e) = level::load_into(&mut sim, &layout) {
                eprintln!("Failed to rebuild level: {}", e);
                return;
            }
        }
        if input::debug_toggle_requested() {
            sim.debug_log = !sim.debug_log;
            println!("Physics trace: {}", if sim.debug_log { "on" } else { "off" });
        }

        let intent = input::poll_intent();
        let dt = get_frame_time().min(MAX_TICK_DT);
        sim.tick(intent, dt);

        render::draw_world(&sim.world, &sim.tuning);

        next_frame().await
    }
}
