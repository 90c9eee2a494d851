//! Tick Driver
//!
//! A `Simulation` owns the world, the event queues and the tuning, and
//! advances them in a fixed order each tick:
//!
//! 1. input - rebuild the player's velocity from this tick's request
//! 2. physics - integrate, refresh blocked flags, collect contacts
//! 3. Push Intent Resolver - one call per player/block contact
//! 4. Slide Arbiter - one call per obstruction contact
//!
//! Contacts are dispatched in insertion order, so simultaneous contacts
//! resolve identically across runs. Everything is synchronous and
//! single-threaded; a contact never outlives the tick that produced it.

use macroquad::math::Vec2;

use crate::config::Tuning;

use super::components::MoveIntent;
use super::entity::Entity;
use super::event::{ContactEvent, Events};
use super::grid::GridBounds;
use super::world::World;
use super::{physics, push, slide};

/// The whole simulation state for one level, owned by the frame loop.
pub struct Simulation {
    pub world: World,
    pub events: Events,
    pub tuning: Tuning,
    pub bounds: GridBounds,
    /// The player body, set by the level loader
    pub player: Option<Entity>,
    /// Print a per-tick physics trace
    pub debug_log: bool,
}

impl Simulation {
    pub fn new(tuning: Tuning, bounds: GridBounds) -> Self {
        Self {
            world: World::new(),
            events: Events::new(),
            tuning,
            bounds,
            player: None,
            debug_log: false,
        }
    }

    /// Tear down the current level's bodies and events, keeping tuning
    /// and bounds. The level loader repopulates afterwards.
    pub fn reset(&mut self) {
        self.world.clear();
        self.events.clear_all();
        self.player = None;
    }

    /// Advance one tick. `intent` is the input collaborator's movement
    /// request for this tick; `dt` the elapsed frame time in seconds.
    pub fn tick(&mut self, intent: MoveIntent, dt: f32) {
        // Outcome events from the previous tick were left in place for
        // the frame that ran it; they die here.
        self.events.clear_all();

        self.apply_intent(intent);

        physics::step(
            &mut self.world,
            &mut self.events,
            self.bounds,
            dt,
            self.debug_log,
        );

        let contacts: Vec<ContactEvent> = self.events.player_block.drain().collect();
        for contact in contacts {
            push::resolve_player_block_contact(
                &mut self.world,
                &mut self.events,
                contact,
                intent,
                &self.tuning,
            );
        }

        let contacts: Vec<ContactEvent> = self.events.block_obstruction.drain().collect();
        for contact in contacts {
            slide::resolve_block_obstruction(&mut self.world, &mut self.events, contact);
        }
    }

    /// The player's velocity is not persistent state: it is rebuilt from
    /// the request every tick, exactly like the input collaborator's
    /// keys-to-velocity mapping. Opposing keys resolve left-over-right
    /// and up-over-down.
    fn apply_intent(&mut self, intent: MoveIntent) {
        let Some(player) = self.player else {
            return;
        };
        let Some(velocity) = self.world.velocities.get_mut(player) else {
            return;
        };

        let speed = self.tuning.player_speed;
        let vx = if intent.left {
            -speed
        } else if intent.right {
            speed
        } else {
            0.0
        };
        let vy = if intent.up {
            -speed
        } else if intent.down {
            speed
        } else {
            0.0
        };
        velocity.0 = Vec2::new(vx, vy);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TILE: f32 = 40.0;
    const DT: f32 = 1.0 / 60.0;

    fn sim() -> Simulation {
        let mut sim = Simulation::new(Tuning::default(), GridBounds::new(16, 12, TILE));
        let player = sim.world.spawn_player(Vec2::new(100.0, 100.0), TILE);
        sim.player = Some(player);
        sim
    }

    fn assert_block_invariants(sim: &Simulation) {
        for (_, body) in sim.world.block_bodies.iter() {
            assert_eq!(body.solid, !body.is_sliding());
        }
    }

    const RIGHT: MoveIntent = MoveIntent {
        right: true,
        up: false,
        down: false,
        left: false,
    };

    #[test]
    fn test_walk_into_block_starts_slide() {
        let mut sim = sim();
        let block = sim.world.spawn_block(Vec2::new(140.0, 100.0), TILE);

        // A few ticks of walking right: close the gap, contact, push
        let mut pushed = false;
        for _ in 0..5 {
            sim.tick(RIGHT, DT);
            assert_block_invariants(&sim);
            if !sim.events.push_started.is_empty() {
                pushed = true;
                break;
            }
        }

        assert!(pushed, "push was never granted");
        let body = sim.world.block_bodies.get(block).unwrap();
        assert_eq!(body.velocity, Vec2::new(250.0, 0.0));
        assert!(!body.solid);
        // The outcome event is still readable after the tick that ran it
        assert_eq!(sim.events.push_started.len(), 1);
    }

    #[test]
    fn test_pushed_block_slides_until_wall() {
        let mut sim = sim();
        let block = sim.world.spawn_block(Vec2::new(140.0, 100.0), TILE);
        sim.world.spawn_wall(Vec2::new(260.0, 100.0), TILE);

        for _ in 0..5 {
            sim.tick(RIGHT, DT);
        }
        assert!(sim.world.block_bodies.get(block).unwrap().is_sliding());

        let mut halted_at = None;
        for i in 0..100 {
            sim.tick(MoveIntent::NONE, DT);
            assert_block_invariants(&sim);
            if !sim.world.block_bodies.get(block).unwrap().is_sliding() {
                halted_at = Some(i);
                break;
            }
        }

        assert!(halted_at.is_some(), "block never halted");
        // At rest flush against the wall, exactly one tile away
        assert_eq!(sim.world.positions.get(block).unwrap().x, 220.0);
        let body = sim.world.block_bodies.get(block).unwrap();
        assert!(body.solid);
        // The halting tick reported it
        assert_eq!(sim.events.slide_halted.len(), 1);
    }

    #[test]
    fn test_slide_chain_into_stationary_block() {
        let mut sim = sim();
        let pushed = sim.world.spawn_block(Vec2::new(140.0, 100.0), TILE);
        let target = sim.world.spawn_block(Vec2::new(300.0, 100.0), TILE);

        for _ in 0..5 {
            sim.tick(RIGHT, DT);
        }
        for _ in 0..100 {
            sim.tick(MoveIntent::NONE, DT);
            assert_block_invariants(&sim);
            if !sim.world.block_bodies.get(pushed).unwrap().is_sliding() {
                break;
            }
        }

        // Pushed block rests flush against the target; target never moved
        assert_eq!(sim.world.positions.get(pushed).unwrap().x, 260.0);
        assert_eq!(sim.world.positions.get(target).unwrap().x, 300.0);
        assert!(sim.world.block_bodies.get(pushed).unwrap().solid);
        assert!(sim.world.block_bodies.get(target).unwrap().solid);
    }

    #[test]
    fn test_identical_runs_are_identical() {
        let script = |sim: &mut Simulation| {
            let block = sim.world.spawn_block(Vec2::new(140.0, 100.0), TILE);
            sim.world.spawn_wall(Vec2::new(340.0, 100.0), TILE);
            let mut trajectory = Vec::new();
            for i in 0..120 {
                let intent = if i < 30 { RIGHT } else { MoveIntent::NONE };
                sim.tick(intent, DT);
                let pos = *sim.world.positions.get(block).unwrap();
                trajectory.push((pos.x.to_bits(), pos.y.to_bits()));
            }
            trajectory
        };

        let run_a = script(&mut sim());
        let run_b = script(&mut sim());
        assert_eq!(run_a, run_b);
    }

    #[test]
    fn test_grazing_contact_does_not_push() {
        let mut sim = sim();
        // Residual integrator creep, below the push threshold
        sim.tuning.player_speed = 2.0;
        let block = sim.world.spawn_block(Vec2::new(117.0, 100.0), TILE);

        for _ in 0..20 {
            sim.tick(RIGHT, DT);
        }

        let body = sim.world.block_bodies.get(block).unwrap();
        assert!(body.solid);
        assert!(!body.is_sliding());
        assert!(sim.events.push_started.is_empty());
    }

    #[test]
    fn test_reset_clears_level() {
        let mut sim = sim();
        sim.world.spawn_block(Vec2::new(140.0, 100.0), TILE);
        sim.tick(RIGHT, DT);

        sim.reset();
        assert_eq!(sim.world.entity_count(), 0);
        assert!(sim.player.is_none());
        assert!(sim.events.push_started.is_empty());
    }
}
