//! Simulation Components
//!
//! Plain data attached to bodies. Behavior lives in the resolvers and the
//! physics step - the one exception is `BlockBody`, which carries the
//! block state machine's transition helpers because its two fields must
//! never be mutated out of step with each other.

use macroquad::math::Vec2;

// =============================================================================
// Directions / Input
// =============================================================================

/// One side of a body, axis-aligned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    Up,
    Down,
    Left,
    Right,
}

impl Side {
    /// Unit vector pointing out of this side (y grows down).
    pub fn unit(&self) -> Vec2 {
        match self {
            Side::Up => Vec2::new(0.0, -1.0),
            Side::Down => Vec2::new(0.0, 1.0),
            Side::Left => Vec2::new(-1.0, 0.0),
            Side::Right => Vec2::new(1.0, 0.0),
        }
    }

    /// True for Left/Right.
    pub fn is_horizontal(&self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }
}

/// Movement requested from the input collaborator for one tick.
///
/// Horizontal and vertical axes are independent - holding right and down
/// at once is a valid (diagonal) request. Opposing keys on one axis are
/// resolved by the tick driver, not here.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveIntent {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl MoveIntent {
    /// No movement requested.
    pub const NONE: MoveIntent = MoveIntent {
        up: false,
        down: false,
        left: false,
        right: false,
    };

    /// Is movement toward the given side requested?
    pub fn wants(&self, side: Side) -> bool {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

// =============================================================================
// Physics / Movement
// =============================================================================

/// Velocity component for the player body.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Velocity(pub Vec2);

impl Velocity {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }
}

/// Axis-aligned collision extent, as half-widths from the body center.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub half: Vec2,
}

impl Collider {
    /// Square collider with the given full side length.
    pub fn square(size: f32) -> Self {
        Self {
            half: Vec2::new(size / 2.0, size / 2.0),
        }
    }
}

/// Which sides of the player currently touch a solid body.
///
/// Recomputed from scratch by the physics step every tick, before the
/// resolvers run. Flags never survive from the previous tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockedSides {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl BlockedSides {
    /// Is the given side in contact with a solid body?
    pub fn on(&self, side: Side) -> bool {
        match side {
            Side::Up => self.up,
            Side::Down => self.down,
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Reset all flags. Called at the top of each physics step.
    pub fn clear(&mut self) {
        *self = BlockedSides::default();
    }
}

// =============================================================================
// Movable Block State Machine
// =============================================================================

/// Physics state of a pushable block.
///
/// A block is in exactly one of two states:
/// - **Idle-Solid**: at rest, acts as an immovable wall (`solid == true`)
/// - **Sliding**: launched by a push, travels at fixed speed until
///   obstructed (`solid == false` so the collision response treats it as
///   a moving body, not a permanent wall)
///
/// Sliding-ness is derived from velocity rather than stored, so the state
/// and the velocity cannot disagree. `solid` is the one stored flag, and
/// the invariant `solid == !is_sliding()` holds at every tick boundary.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BlockBody {
    pub velocity: Vec2,
    pub solid: bool,
}

impl BlockBody {
    /// A block at rest. Every block starts here at level load.
    pub fn idle() -> Self {
        Self {
            velocity: Vec2::ZERO,
            solid: true,
        }
    }

    /// The canonical sliding test: non-zero velocity on either axis.
    pub fn is_sliding(&self) -> bool {
        self.velocity.x != 0.0 || self.velocity.y != 0.0
    }

    pub fn set_solid(&mut self, solid: bool) {
        self.solid = solid;
    }

    pub fn set_velocity(&mut self, velocity: Vec2) {
        self.velocity = velocity;
    }

    /// Sliding -> Idle-Solid, atomically. Idempotent on an idle block.
    pub fn halt(&mut self) {
        self.velocity = Vec2::ZERO;
        self.solid = true;
    }
}

impl Default for BlockBody {
    fn default() -> Self {
        Self::idle()
    }
}

// =============================================================================
// Body Type Markers
// =============================================================================

/// Marks the player body.
#[derive(Debug, Clone, Copy, Default)]
pub struct Player;

/// Marks a static wall tile. Never moves, never changes state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Wall;
