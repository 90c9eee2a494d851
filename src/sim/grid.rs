//! Grid World Model
//!
//! The playfield is a bounded grid of square tiles. Bodies live at
//! continuous positions (the physics integrates sub-tile movement), but
//! every wall and block footprint is exactly one tile, and levels are
//! authored in tile coordinates.
//!
//! Screen convention matches the renderer: x grows right, y grows down.

use macroquad::math::Vec2;

/// A tile coordinate on the level grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TilePos {
    pub x: i32,
    pub y: i32,
}

impl TilePos {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// World-space position of this tile's center.
    pub fn center(&self, tile_size: f32) -> Vec2 {
        Vec2::new(
            self.x as f32 * tile_size + tile_size / 2.0,
            self.y as f32 * tile_size + tile_size / 2.0,
        )
    }
}

/// Tile containing a world-space point.
pub fn world_to_tile(pos: Vec2, tile_size: f32) -> TilePos {
    TilePos::new(
        (pos.x / tile_size).floor() as i32,
        (pos.y / tile_size).floor() as i32,
    )
}

/// Extent of the level grid, in whole tiles.
///
/// Bodies are kept inside this rectangle by the physics step; a contact
/// with the boundary reports `Entity::NULL` as the other participant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridBounds {
    pub cols: usize,
    pub rows: usize,
    pub tile_size: f32,
}

impl GridBounds {
    pub fn new(cols: usize, rows: usize, tile_size: f32) -> Self {
        Self { cols, rows, tile_size }
    }

    /// Width of the playfield in world units.
    pub fn width(&self) -> f32 {
        self.cols as f32 * self.tile_size
    }

    /// Height of the playfield in world units.
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.tile_size
    }

    /// Does the grid contain this tile coordinate?
    pub fn contains(&self, tile: TilePos) -> bool {
        tile.x >= 0
            && (tile.x as usize) < self.cols
            && tile.y >= 0
            && (tile.y as usize) < self.rows
    }
}
