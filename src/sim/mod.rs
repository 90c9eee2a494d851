//! Push/Slide Simulation Core
//!
//! A lightweight ECS-inspired simulation for a tile-grid push-block
//! mechanic. The player walks between tiles; pushable blocks launch on
//! an intentional push and slide until obstructed.
//!
//! Key concepts:
//! - Entity: generational index for safe body references
//! - Component: plain data structs attached to bodies
//! - World: explicit context object holding all bodies, no singletons
//! - Events: ordered contact queues from physics to the resolvers
//! - Resolvers: push.rs grants pushes, slide.rs ends slides
//!
//! Design philosophy:
//! - State is derived, not duplicated (sliding-ness is the velocity test)
//! - Deterministic: fixed dispatch order, fixed tie-break priority
//! - The physics step moves bodies; only the resolvers change block state

// Allow unused code - parts of the storage/event API are exercised only
// by the test suite
#![allow(dead_code)]

pub mod component;
pub mod components;
pub mod entity;
pub mod event;
pub mod grid;
pub mod physics;
pub mod push;
pub mod slide;
pub mod runtime;
pub mod world;

// Re-export main types
pub use components::MoveIntent;
pub use entity::Entity;
pub use event::Events;
pub use grid::{GridBounds, TilePos};
pub use runtime::Simulation;
pub use world::World;
