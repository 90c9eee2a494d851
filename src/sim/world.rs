//! Simulation World
//!
//! The World is the central container for all simulation state:
//! - Entity allocation and lifetime tracking
//! - Component storage for every body in the level
//!
//! It is an explicit context object: the tick driver owns it and passes
//! it by reference into the physics step and the resolvers. There are no
//! process-wide singletons anywhere in the simulation.
//!
//! Component types are defined at compile time rather than via runtime
//! registration - we know exactly what a level contains.

use macroquad::math::Vec2;

use super::component::ComponentStorage;
use super::components::*;
use super::entity::{Entity, EntityAllocator};

/// The simulation world containing all bodies and their components.
pub struct World {
    /// Entity allocator for creating/destroying bodies
    entities: EntityAllocator,

    // =========================================================================
    // Core Components
    // =========================================================================

    /// World-space center position of each body
    pub positions: ComponentStorage<Vec2>,

    /// Collision extent of each body
    pub colliders: ComponentStorage<Collider>,

    // =========================================================================
    // Player Components
    // =========================================================================

    /// Velocity (player only - block velocity lives in BlockBody)
    pub velocities: ComponentStorage<Velocity>,

    /// Per-side solid-contact flags, refreshed each physics step
    pub blocked: ComponentStorage<BlockedSides>,

    /// Marks the player body
    pub players: ComponentStorage<Player>,

    // =========================================================================
    // Level Body Components
    // =========================================================================

    /// Pushable block state (velocity + solidity)
    pub block_bodies: ComponentStorage<BlockBody>,

    /// Marks immovable wall tiles
    pub walls: ComponentStorage<Wall>,
}

impl World {
    /// Create a new empty world.
    pub fn new() -> Self {
        Self {
            entities: EntityAllocator::new(),
            positions: ComponentStorage::new(),
            colliders: ComponentStorage::new(),
            velocities: ComponentStorage::new(),
            blocked: ComponentStorage::new(),
            players: ComponentStorage::new(),
            block_bodies: ComponentStorage::new(),
            walls: ComponentStorage::new(),
        }
    }

    // =========================================================================
    // Entity Management
    // =========================================================================

    /// Spawn a new body at a position.
    /// Returns the entity ID for adding more components.
    pub fn spawn_at(&mut self, position: Vec2) -> Entity {
        let entity = self.entities.allocate();
        self.positions.insert(entity, position);
        entity
    }

    /// Check if an entity is currently alive.
    pub fn is_alive(&self, entity: Entity) -> bool {
        self.entities.is_alive(entity)
    }

    /// Get the number of alive bodies.
    pub fn entity_count(&self) -> u32 {
        self.entities.alive_count()
    }

    /// Tear down the current level: every body is despawned and all
    /// outstanding entity references become invalid.
    pub fn clear(&mut self) {
        self.entities.clear();
        self.positions.clear();
        self.colliders.clear();
        self.velocities.clear();
        self.blocked.clear();
        self.players.clear();
        self.block_bodies.clear();
        self.walls.clear();
    }

    // =========================================================================
    // Convenience Spawners
    // =========================================================================

    /// Spawn the player body. The collision extent is deliberately
    /// smaller than a tile so the player can thread between blocks.
    pub fn spawn_player(&mut self, position: Vec2, tile_size: f32) -> Entity {
        let entity = self.spawn_at(position);
        self.players.insert(entity, Player);
        self.colliders.insert(entity, Collider::square(tile_size * 0.8));
        self.velocities.insert(entity, Velocity::default());
        self.blocked.insert(entity, BlockedSides::default());
        entity
    }

    /// Spawn a pushable block filling one tile. Starts Idle-Solid.
    pub fn spawn_block(&mut self, position: Vec2, tile_size: f32) -> Entity {
        let entity = self.spawn_at(position);
        self.colliders.insert(entity, Collider::square(tile_size));
        self.block_bodies.insert(entity, BlockBody::idle());
        entity
    }

    /// Spawn a static wall tile.
    pub fn spawn_wall(&mut self, position: Vec2, tile_size: f32) -> Entity {
        let entity = self.spawn_at(position);
        self.colliders.insert(entity, Collider::square(tile_size));
        self.walls.insert(entity, Wall);
        entity
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// The player entity, if one has been spawned.
    pub fn player(&self) -> Option<Entity> {
        self.players.iter().next().map(|(idx, _)| Entity::new(idx, 0))
    }

    /// Is this entity a pushable block?
    pub fn is_block(&self, entity: Entity) -> bool {
        self.block_bodies.contains(entity)
    }

    /// Is this entity a block at rest (both velocity components zero)?
    pub fn is_stationary_block(&self, entity: Entity) -> bool {
        self.block_bodies
            .get(entity)
            .map(|b| !b.is_sliding())
            .unwrap_or(false)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}
