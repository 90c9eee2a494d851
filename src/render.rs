//! Rendering plumbing
//!
//! Flat-colored quads, one per body, on a dark background for contrast.
//! The player quad is drawn slightly smaller than a tile so its true
//! collision extent (smaller still) reads correctly against the grid.

use macroquad::prelude::*;

use crate::config::Tuning;
use crate::sim::{Entity, World};

const BACKGROUND: Color = Color::new(0.125, 0.125, 0.125, 1.0); // ~32, 32, 32
const PLAYER_COLOR: Color = Color::new(0.0, 0.467, 1.0, 1.0); // ~0, 119, 255
const BLOCK_COLOR: Color = Color::new(0.8, 0.8, 0.8, 1.0); // ~204, 204, 204
const WALL_COLOR: Color = Color::new(0.4, 0.4, 0.4, 1.0); // ~102, 102, 102

/// Centered square of the given side length.
fn draw_square(center: Vec2, size: f32, color: Color) {
    draw_rectangle(center.x - size / 2.0, center.y - size / 2.0, size, size, color);
}

/// Draw every body in the world.
pub fn draw_world(world: &World, tuning: &Tuning) {
    clear_background(BACKGROUND);

    let tile = tuning.tile_size;

    for (idx, _) in world.walls.iter() {
        if let Some(pos) = world.positions.get(Entity::new(idx, 0)) {
            draw_square(*pos, tile, WALL_COLOR);
        }
    }

    for (idx, _) in world.block_bodies.iter() {
        if let Some(pos) = world.positions.get(Entity::new(idx, 0)) {
            draw_square(*pos, tile, BLOCK_COLOR);
        }
    }

    for (idx, _) in world.players.iter() {
        if let Some(pos) = world.positions.get(Entity::new(idx, 0)) {
            draw_square(*pos, tile * 0.9, PLAYER_COLOR);
        }
    }
}
