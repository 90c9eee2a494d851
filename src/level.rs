//! Level loading
//!
//! Levels are authored as rows of characters, one character per tile:
//! `W` wall, `B` pushable block, `P` player start, space for floor.
//! The built-in layout is compiled in; alternative layouts load from RON
//! files. Everything is validated before a single body is spawned, so a
//! bad file never leaves a half-built world behind.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

use crate::config::Tuning;
use crate::sim::{GridBounds, Simulation, TilePos};

/// Validation limits to prevent resource exhaustion from malicious files
pub mod limits {
    /// Maximum number of tile columns in a layout
    pub const MAX_COLS: usize = 64;
    /// Maximum number of tile rows in a layout
    pub const MAX_ROWS: usize = 64;
}

/// Error type for level loading
#[derive(Debug)]
pub enum LevelError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for LevelError {
    fn from(e: std::io::Error) -> Self {
        LevelError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for LevelError {
    fn from(e: ron::error::SpannedError) -> Self {
        LevelError::ParseError(e)
    }
}

impl fmt::Display for LevelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LevelError::IoError(e) => write!(f, "IO error: {}", e),
            LevelError::ParseError(e) => write!(f, "Parse error: {}", e),
            LevelError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// A level as authored: one string per tile row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelLayout {
    pub rows: Vec<String>,
}

impl LevelLayout {
    /// The built-in playfield: a wall ring around loose rows of blocks.
    pub fn builtin() -> Self {
        Self {
            rows: [
                "WWWWWWWWWWWWWWWW",
                "W              W",
                "W  B B B B B   W",
                "W              W",
                "W  B P B B B   W",
                "W              W",
                "W  B B B B B   W",
                "W              W",
                "W  B B B B B   W",
                "W              W",
                "WBBBBBBBBBBBBBBW",
                "WWWWWWWWWWWWWWWW",
            ]
            .iter()
            .map(|row| row.to_string())
            .collect(),
        }
    }

    /// Load a layout from a RON file.
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let text = fs::read_to_string(path)?;
        let layout: LevelLayout = ron::from_str(&text)?;
        layout.validate()?;
        Ok(layout)
    }

    /// Number of tile columns (width of the first row).
    pub fn cols(&self) -> usize {
        self.rows.first().map(|row| row.chars().count()).unwrap_or(0)
    }

    /// Check the layout is well-formed: rectangular, within limits, only
    /// known tile characters, at most one player start.
    pub fn validate(&self) -> Result<(), LevelError> {
        if self.rows.is_empty() {
            return Err(LevelError::ValidationError("layout has no rows".to_string()));
        }
        if self.rows.len() > limits::MAX_ROWS {
            return Err(LevelError::ValidationError(format!(
                "too many rows ({} > {})",
                self.rows.len(),
                limits::MAX_ROWS
            )));
        }

        let cols = self.cols();
        if cols == 0 {
            return Err(LevelError::ValidationError("layout rows are empty".to_string()));
        }
        if cols > limits::MAX_COLS {
            return Err(LevelError::ValidationError(format!(
                "too many columns ({} > {})",
                cols,
                limits::MAX_COLS
            )));
        }

        let mut player_starts = 0;
        for (y, row) in self.rows.iter().enumerate() {
            if row.chars().count() != cols {
                return Err(LevelError::ValidationError(format!(
                    "row {} has {} columns, expected {}",
                    y,
                    row.chars().count(),
                    cols
                )));
            }
            for (x, ch) in row.chars().enumerate() {
                match ch {
                    'W' | 'B' | ' ' => {}
                    'P' => player_starts += 1,
                    other => {
                        return Err(LevelError::ValidationError(format!(
                            "unknown tile '{}' at ({}, {})",
                            other, x, y
                        )));
                    }
                }
            }
        }
        if player_starts > 1 {
            return Err(LevelError::ValidationError(format!(
                "{} player starts, expected at most one",
                player_starts
            )));
        }

        Ok(())
    }
}

/// Tear down whatever level the simulation holds and build this layout
/// in its place. The player spawns at the 'P' tile, or at the playfield
/// center if the layout has none.
pub fn load_into(sim: &mut Simulation, layout: &LevelLayout) -> Result<(), LevelError> {
    layout.validate()?;

    sim.reset();

    let tuning: Tuning = sim.tuning;
    let tile = tuning.tile_size;
    let bounds = GridBounds::new(layout.cols(), layout.rows.len(), tile);

    let mut player_start = None;
    for (y, row) in layout.rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            let center = TilePos::new(x as i32, y as i32).center(tile);
            match ch {
                'W' => {
                    sim.world.spawn_wall(center, tile);
                }
                'B' => {
                    sim.world.spawn_block(center, tile);
                }
                'P' => player_start = Some(center),
                _ => {}
            }
        }
    }

    // Player last, after every level body, like the layout scan order
    // the bodies were spawned in
    let start = player_start
        .unwrap_or_else(|| macroquad::math::Vec2::new(bounds.width() / 2.0, bounds.height() / 2.0));
    let player = sim.world.spawn_player(start, tile);

    sim.player = Some(player);
    sim.bounds = bounds;
    Ok(())
}
