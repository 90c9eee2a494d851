//! Slide Arbiter
//!
//! Runs once per tick for every contact between a sliding block and any
//! other body. A slide always ends atomically on first obstruction -
//! there is no deceleration - and a freshly-obstructed stationary
//! neighbor is re-solidified so a chain of pushes cannot drive a third
//! body through it.
//!
//! Invoking the arbiter on an already-halted block is a no-op; malformed
//! contacts (the instigator is not a block) are ignored.

use super::event::{ContactEvent, Events, SlideHalted};
use super::world::World;

/// Resolve one obstruction contact for this tick.
///
/// `contact.a` is the sliding block, `contact.b` whatever it hit: a wall,
/// another block, or `Entity::NULL` for the level bounds.
pub fn resolve_block_obstruction(world: &mut World, events: &mut Events, contact: ContactEvent) {
    let Some(body) = world.block_bodies.get_mut(contact.a) else {
        return;
    };

    // Sliding -> Idle-Solid, atomically. Safe to repeat.
    let was_sliding = body.is_sliding();
    body.halt();

    if was_sliding {
        if let Some(position) = world.positions.get(contact.a).copied() {
            events.slide_halted.send(SlideHalted {
                block: contact.a,
                position,
            });
        }
    }

    // If the obstruction is a stationary block, force it solid too. A
    // block freshly halted by a push may still be marked non-solid, and
    // a third body could be driven through it this same tick otherwise.
    // A *sliding* obstruction is left alone: its own contact event,
    // reported independently, is responsible for halting it.
    if let Some(other) = world.block_bodies.get_mut(contact.b) {
        if !other.is_sliding() {
            other.set_solid(true);
        }
    }
}
