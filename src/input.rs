//! Input collaborator
//!
//! Polls macroquad's keyboard state into the per-tick movement request
//! the simulation consumes. The simulation itself never touches the
//! keyboard - tests drive it with hand-built intents.

use macroquad::prelude::*;

use crate::sim::MoveIntent;

/// Read this frame's movement request from the cursor keys.
pub fn poll_intent() -> MoveIntent {
    MoveIntent {
        up: is_key_down(KeyCode::Up),
        down: is_key_down(KeyCode::Down),
        left: is_key_down(KeyCode::Left),
        right: is_key_down(KeyCode::Right),
    }
}

/// R restarts the level.
pub fn restart_requested() -> bool {
    is_key_pressed(KeyCode::R)
}

/// F1 toggles the physics trace.
pub fn debug_toggle_requested() -> bool {
    is_key_pressed(KeyCode::F1)
}
