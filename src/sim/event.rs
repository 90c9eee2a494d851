//! Event System
//!
//! Contact events are how the physics step talks to the resolvers: it
//! collects every contact of the tick into ordered queues, and the tick
//! driver dispatches each queue to the resolver that owns it. Queue order
//! is insertion order, which keeps simultaneous contacts deterministic.
//!
//! The resolvers publish their outcomes (`PushStarted`, `SlideHalted`)
//! the same way, for frame plumbing like the renderer or a future audio
//! hook to observe. Nothing in the core reads them back.

use macroquad::math::Vec2;

use super::components::Side;
use super::entity::Entity;

/// A queue for events of a single type.
/// Events are collected during the tick and drained at specific points.
#[derive(Debug)]
pub struct EventQueue<T> {
    events: Vec<T>,
}

impl<T> EventQueue<T> {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    /// Send an event (add to queue)
    pub fn send(&mut self, event: T) {
        self.events.push(event);
    }

    /// Iterate over events without clearing
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.events.iter()
    }

    /// Drain all events (returns iterator and clears queue)
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.events.drain(..)
    }

    /// Check if there are any events
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Clear all events without processing
    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Number of events in queue
    pub fn len(&self) -> usize {
        self.events.len()
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Container for all simulation events.
pub struct Events {
    /// Player touched a pushable block this tick (one event per pair)
    pub player_block: EventQueue<ContactEvent>,

    /// A sliding block ran into an obstruction
    pub block_obstruction: EventQueue<ContactEvent>,

    /// The Push Intent Resolver granted a push
    pub push_started: EventQueue<PushStarted>,

    /// The Slide Arbiter halted a slide
    pub slide_halted: EventQueue<SlideHalted>,
}

impl Events {
    pub fn new() -> Self {
        Self {
            player_block: EventQueue::new(),
            block_obstruction: EventQueue::new(),
            push_started: EventQueue::new(),
            slide_halted: EventQueue::new(),
        }
    }

    /// Clear all event queues. Called at the start of each tick, so the
    /// previous tick's outcome events stay visible to the frame that ran it.
    pub fn clear_all(&mut self) {
        self.player_block.clear();
        self.block_obstruction.clear();
        self.push_started.clear();
        self.slide_halted.clear();
    }
}

impl Default for Events {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Event Types
// =============================================================================

/// Two bodies' collision extents intersected this tick.
///
/// Ephemeral: produced by the physics step, consumed by a resolver in the
/// same tick, never stored. `b` is `Entity::NULL` for contacts against
/// the level bounds.
#[derive(Debug, Clone, Copy)]
pub struct ContactEvent {
    /// The instigating body (the player, or the sliding block)
    pub a: Entity,
    /// The body that was hit
    pub b: Entity,
}

/// A stationary block was granted a push and started sliding.
#[derive(Debug, Clone, Copy)]
pub struct PushStarted {
    /// The block that started sliding
    pub block: Entity,
    /// The direction it was launched in
    pub direction: Side,
}

/// A sliding block was obstructed and came to rest.
#[derive(Debug, Clone, Copy)]
pub struct SlideHalted {
    /// The block that stopped
    pub block: Entity,
    /// Where it came to rest
    pub position: Vec2,
}
