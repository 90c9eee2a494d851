//! Push Intent Resolver
//!
//! Runs once per tick for every (player, block) contact the physics step
//! reported. Decides whether the contact is an intentional push, and if
//! so launches the block; otherwise the block stays a wall.
//!
//! The resolver mutates exactly one block per call and never mutates the
//! player. It raises no errors: malformed or ambiguous contacts resolve
//! to "no push".

use crate::config::Tuning;

use super::components::{MoveIntent, Side};
use super::event::{ContactEvent, Events, PushStarted};
use super::world::World;

/// Fixed evaluation order for simultaneous multi-side contact.
///
/// Without a deterministic tie-break, pushing into a corner would pick a
/// slide direction frame-to-frame at random and visibly jitter. Input
/// recency never participates.
const PUSH_PRIORITY: [Side; 4] = [Side::Right, Side::Left, Side::Down, Side::Up];

/// Resolve one (player, block) contact for this tick.
///
/// `contact.a` is the player, `contact.b` the touched block. The
/// requested direction comes from the input collaborator via the tick
/// driver; blocked flags and player velocity are read from the world.
pub fn resolve_player_block_contact(
    world: &mut World,
    events: &mut Events,
    contact: ContactEvent,
    intent: MoveIntent,
    tuning: &Tuning,
) {
    if !world.players.contains(contact.a) {
        return;
    }
    let Some(blocked) = world.blocked.get(contact.a).copied() else {
        return;
    };
    let Some(velocity) = world.velocities.get(contact.a).copied() else {
        return;
    };
    let Some(body) = world.block_bodies.get_mut(contact.b) else {
        return;
    };

    // Already sliding: pass-through collision. Force it non-solid - a
    // sliding block marked solid mid-slide would turn into a wall under
    // the player and lodge them against it. No new push this tick.
    if body.is_sliding() {
        body.set_solid(false);
        return;
    }

    // Stationary block acts as a wall unless a push condition is met.
    body.set_solid(true);

    // First matching side in priority order wins; remaining sides are
    // not evaluated.
    for side in PUSH_PRIORITY {
        let axis_speed = if side.is_horizontal() {
            velocity.0.x.abs()
        } else {
            velocity.0.y.abs()
        };

        if blocked.on(side) && intent.wants(side) && axis_speed > tuning.push_threshold {
            // Grant the push: launch the block away from the player
            // along the contact axis. Idle-Solid -> Sliding.
            body.set_solid(false);
            body.set_velocity(side.unit() * tuning.block_push_speed);
            events.push_started.send(PushStarted {
                block: contact.b,
                direction: side,
            });
            return;
        }
    }

    // No side matched: the block stays Idle-Solid.
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::components::{BlockedSides, Velocity};
    use crate::sim::entity::Entity;
    use macroquad::math::Vec2;

    const TILE: f32 = 40.0;

    struct Rig {
        world: World,
        events: Events,
        tuning: Tuning,
        player: Entity,
        block: Entity,
    }

    /// Player standing immediately left of a block, not yet in contact.
    fn rig() -> Rig {
        let mut world = World::new();
        let player = world.spawn_player(Vec2::new(60.0, 100.0), TILE);
        let block = world.spawn_block(Vec2::new(100.0, 100.0), TILE);
        Rig {
            world,
            events: Events::new(),
            tuning: Tuning::default(),
            player,
            block,
        }
    }

    fn contact(rig: &Rig) -> ContactEvent {
        ContactEvent {
            a: rig.player,
            b: rig.block,
        }
    }

    fn set_player_motion(rig: &mut Rig, velocity: Vec2, blocked: BlockedSides) {
        rig.world.velocities.insert(rig.player, Velocity(velocity));
        rig.world.blocked.insert(rig.player, blocked);
    }

    #[test]
    fn test_push_right_at_walk_speed() {
        // Player approaches from the left moving right at 160
        let mut rig = rig();
        set_player_motion(
            &mut rig,
            Vec2::new(160.0, 0.0),
            BlockedSides { right: true, ..Default::default() },
        );

        let c = contact(&rig);
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            c,
            MoveIntent { right: true, ..MoveIntent::NONE },
            &rig.tuning,
        );

        let body = rig.world.block_bodies.get(rig.block).unwrap();
        assert_eq!(body.velocity, Vec2::new(250.0, 0.0));
        assert!(!body.solid);
        assert!(body.is_sliding());

        let started: Vec<_> = rig.events.push_started.iter().collect();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].direction, Side::Right);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Exactly at the threshold: not a push
        let mut rig = rig();
        set_player_motion(
            &mut rig,
            Vec2::new(2.0, 0.0),
            BlockedSides { right: true, ..Default::default() },
        );
        let c = contact(&rig);
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            c,
            MoveIntent { right: true, ..MoveIntent::NONE },
            &rig.tuning,
        );
        assert!(rig.world.block_bodies.get(rig.block).unwrap().solid);
        assert!(rig.events.push_started.is_empty());

        // Just above it: a push
        set_player_motion(
            &mut rig,
            Vec2::new(2.1, 0.0),
            BlockedSides { right: true, ..Default::default() },
        );
        let c = contact(&rig);
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            c,
            MoveIntent { right: true, ..MoveIntent::NONE },
            &rig.tuning,
        );
        assert!(rig.world.block_bodies.get(rig.block).unwrap().is_sliding());
    }

    #[test]
    fn test_corner_contact_prefers_right_over_down() {
        // Contact on two sides at once, both directions requested
        let mut rig = rig();
        set_player_motion(
            &mut rig,
            Vec2::new(160.0, 160.0),
            BlockedSides { right: true, down: true, ..Default::default() },
        );

        let c = contact(&rig);
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            c,
            MoveIntent { right: true, down: true, ..MoveIntent::NONE },
            &rig.tuning,
        );

        let body = rig.world.block_bodies.get(rig.block).unwrap();
        assert_eq!(body.velocity, Vec2::new(250.0, 0.0)); // right, never down
        let started: Vec<_> = rig.events.push_started.iter().collect();
        assert_eq!(started.len(), 1);
        assert_eq!(started[0].direction, Side::Right);
    }

    #[test]
    fn test_sliding_block_is_pass_through() {
        let mut rig = rig();
        set_player_motion(
            &mut rig,
            Vec2::new(160.0, 0.0),
            BlockedSides { right: true, ..Default::default() },
        );
        // Block already sliding; solid got flipped on somewhere upstream
        {
            let body = rig.world.block_bodies.get_mut(rig.block).unwrap();
            body.set_velocity(Vec2::new(250.0, 0.0));
            body.set_solid(true);
        }

        let c = contact(&rig);
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            c,
            MoveIntent { right: true, ..MoveIntent::NONE },
            &rig.tuning,
        );

        let body = rig.world.block_bodies.get(rig.block).unwrap();
        assert!(!body.solid); // forced back off
        assert_eq!(body.velocity, Vec2::new(250.0, 0.0)); // unchanged
        assert!(rig.events.push_started.is_empty()); // no new push
    }

    #[test]
    fn test_contact_without_matching_input_is_not_a_push() {
        // Touching the block but steering away from it
        let mut rig = rig();
        set_player_motion(
            &mut rig,
            Vec2::new(160.0, 0.0),
            BlockedSides { right: true, ..Default::default() },
        );

        let c = contact(&rig);
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            c,
            MoveIntent { left: true, ..MoveIntent::NONE },
            &rig.tuning,
        );

        let body = rig.world.block_bodies.get(rig.block).unwrap();
        assert!(body.solid);
        assert!(!body.is_sliding());
    }

    #[test]
    fn test_input_without_contact_is_not_a_push() {
        // Requesting right but not actually blocked on the right
        let mut rig = rig();
        set_player_motion(&mut rig, Vec2::new(160.0, 0.0), BlockedSides::default());

        let c = contact(&rig);
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            c,
            MoveIntent { right: true, ..MoveIntent::NONE },
            &rig.tuning,
        );

        assert!(rig.world.block_bodies.get(rig.block).unwrap().solid);
        assert!(rig.events.push_started.is_empty());
    }

    #[test]
    fn test_malformed_contact_is_ignored() {
        let mut rig = rig();
        let wall = rig.world.spawn_wall(Vec2::new(20.0, 20.0), TILE);
        set_player_motion(
            &mut rig,
            Vec2::new(160.0, 0.0),
            BlockedSides { right: true, ..Default::default() },
        );

        // b is not a block
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            ContactEvent { a: rig.player, b: wall },
            MoveIntent { right: true, ..MoveIntent::NONE },
            &rig.tuning,
        );
        // a is not the player
        let block = rig.block;
        resolve_player_block_contact(
            &mut rig.world,
            &mut rig.events,
            ContactEvent { a: wall, b: block },
            MoveIntent { right: true, ..MoveIntent::NONE },
            &rig.tuning,
        );

        assert!(rig.world.block_bodies.get(rig.block).unwrap().solid);
        assert!(rig.events.push_started.is_empty());
    }
}
