//! Simulation Tuning
//!
//! The handful of constants that define the game feel, grouped in one
//! serde struct so a tuning pass doesn't mean hunting magic numbers
//! through the resolvers. Defaults reproduce the classic feel: blocks
//! slide faster than the player walks.
//!
//! Loadable from a RON file; missing fields fall back to defaults.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Tuning parameters for the simulation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Side length of one grid tile, in world units
    pub tile_size: f32,
    /// Player walk speed, world units per second
    pub player_speed: f32,
    /// Speed a pushed block slides at, world units per second
    pub block_push_speed: f32,
    /// Minimum player speed along an axis for a contact to count as an
    /// intentional push. Filters out residual integrator motion; the
    /// comparison is exclusive (speed must exceed this).
    pub push_threshold: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tile_size: 40.0,
            player_speed: 160.0,
            block_push_speed: 250.0,
            push_threshold: 2.0,
        }
    }
}

impl Tuning {
    /// Load tuning from a RON file, falling back to defaults if the file
    /// is missing or unparseable. Tuning is never worth crashing over.
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => match ron::from_str(&text) {
                Ok(tuning) => tuning,
                Err(e) => {
                    eprintln!("Ignoring malformed tuning file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
