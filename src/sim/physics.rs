//! Arcade Physics Step
//!
//! Discrete AABB integration with positional separation. Each tick:
//! 1. Sliding blocks advance and are clamped flush against whatever they
//!    hit; each obstruction is reported as a contact event.
//! 2. The player advances axis by axis, is clamped against solid bodies
//!    and the level bounds, and gets fresh per-side blocked flags.
//!    Player/block touches are reported as contact events.
//!
//! This module only moves bodies and reports contacts. It never mutates
//! a block's solidity or velocity - push grants and slide halts are the
//! resolvers' territory, dispatched by the tick driver after this step.
//!
//! Discrete overlap tests are safe here: at 60 Hz the fastest body moves
//! a tenth of a tile per tick, so nothing can tunnel.

use macroquad::math::Vec2;

use super::components::BlockedSides;
use super::entity::Entity;
use super::event::{ContactEvent, Events};
use super::grid::GridBounds;
use super::world::World;

/// Strict AABB overlap between two centered boxes. Bodies resting flush
/// against each other do not count as overlapping, so a clamped body
/// does not re-collide forever.
fn overlaps(pa: Vec2, ha: Vec2, pb: Vec2, hb: Vec2) -> bool {
    (pa.x - pb.x).abs() < ha.x + hb.x && (pa.y - pb.y).abs() < ha.y + hb.y
}

/// Snapshot of a potential obstruction, taken before anything moves in
/// the current phase.
struct Obstacle {
    entity: Entity,
    pos: Vec2,
    half: Vec2,
    /// Walls are always solid; blocks carry their current solid flag
    solid: bool,
    is_block: bool,
}

/// Walls first, then blocks, each in slot order. This is the insertion
/// order of simultaneous contacts, and it is stable across runs.
fn collect_obstacles(world: &World, exclude: Option<Entity>) -> Vec<Obstacle> {
    let mut obstacles = Vec::new();

    for (idx, _) in world.walls.iter() {
        let entity = Entity::new(idx, 0);
        if let (Some(pos), Some(collider)) =
            (world.positions.get(entity), world.colliders.get(entity))
        {
            obstacles.push(Obstacle {
                entity,
                pos: *pos,
                half: collider.half,
                solid: true,
                is_block: false,
            });
        }
    }

    for (idx, body) in world.block_bodies.iter() {
        let entity = Entity::new(idx, 0);
        if exclude == Some(entity) {
            continue;
        }
        if let (Some(pos), Some(collider)) =
            (world.positions.get(entity), world.colliders.get(entity))
        {
            obstacles.push(Obstacle {
                entity,
                pos: *pos,
                half: collider.half,
                solid: body.solid,
                is_block: true,
            });
        }
    }

    obstacles
}

/// Advance the simulation by `dt` seconds.
pub fn step(world: &mut World, events: &mut Events, bounds: GridBounds, dt: f32, debug_log: bool) {
    move_sliding_blocks(world, events, bounds, dt);
    move_player(world, events, bounds, dt, debug_log);
}

/// Integrate every sliding block, clamping flush on obstruction and
/// reporting a contact per obstruction. Velocities are left untouched;
/// the Slide Arbiter zeroes them when it processes the contact later
/// this tick.
fn move_sliding_blocks(world: &mut World, events: &mut Events, bounds: GridBounds, dt: f32) {
    let sliders: Vec<(Entity, Vec2)> = world
        .block_bodies
        .iter()
        .filter(|(_, body)| body.is_sliding())
        .map(|(idx, body)| (Entity::new(idx, 0), body.velocity))
        .collect();

    for (block, velocity) in sliders {
        let Some(half) = world.colliders.get(block).map(|c| c.half) else {
            continue;
        };
        let Some(mut pos) = world.positions.get(block).copied() else {
            continue;
        };

        // Blocks collide with walls and every other block, solid or not:
        // two blocks sliding toward each other must stop each other.
        let obstacles = collect_obstacles(world, Some(block));
        let delta = velocity * dt;

        if delta.x != 0.0 {
            pos.x += delta.x;
            for ob in &obstacles {
                if overlaps(pos, half, ob.pos, ob.half) {
                    if delta.x > 0.0 {
                        pos.x = ob.pos.x - ob.half.x - half.x;
                    } else {
                        pos.x = ob.pos.x + ob.half.x + half.x;
                    }
                    events.block_obstruction.send(ContactEvent { a: block, b: ob.entity });
                }
            }
            if pos.x - half.x < 0.0 {
                pos.x = half.x;
                events.block_obstruction.send(ContactEvent { a: block, b: Entity::NULL });
            } else if pos.x + half.x > bounds.width() {
                pos.x = bounds.width() - half.x;
                events.block_obstruction.send(ContactEvent { a: block, b: Entity::NULL });
            }
        }

        if delta.y != 0.0 {
            pos.y += delta.y;
            for ob in &obstacles {
                if overlaps(pos, half, ob.pos, ob.half) {
                    if delta.y > 0.0 {
                        pos.y = ob.pos.y - ob.half.y - half.y;
                    } else {
                        pos.y = ob.pos.y + ob.half.y + half.y;
                    }
                    events.block_obstruction.send(ContactEvent { a: block, b: ob.entity });
                }
            }
            if pos.y - half.y < 0.0 {
                pos.y = half.y;
                events.block_obstruction.send(ContactEvent { a: block, b: Entity::NULL });
            } else if pos.y + half.y > bounds.height() {
                pos.y = bounds.height() - half.y;
                events.block_obstruction.send(ContactEvent { a: block, b: Entity::NULL });
            }
        }

        world.positions.insert(block, pos);
    }
}

/// Integrate the player axis by axis against solid bodies and the level
/// bounds. Blocked flags are rebuilt from scratch - a flag is true iff
/// the corresponding side pressed against a solid body this very tick.
fn move_player(world: &mut World, events: &mut Events, bounds: GridBounds, dt: f32, debug_log: bool) {
    let Some(player) = world.player() else {
        return;
    };
    let Some(velocity) = world.velocities.get(player).map(|v| v.0) else {
        return;
    };
    let Some(half) = world.colliders.get(player).map(|c| c.half) else {
        return;
    };
    let Some(mut pos) = world.positions.get(player).copied() else {
        return;
    };

    let obstacles = collect_obstacles(world, None);
    let mut flags = BlockedSides::default();
    let mut touched: Vec<Entity> = Vec::new();

    fn note_touch(touched: &mut Vec<Entity>, entity: Entity) {
        if !touched.contains(&entity) {
            touched.push(entity);
        }
    }

    if velocity.x != 0.0 {
        pos.x += velocity.x * dt;
        for ob in &obstacles {
            if !ob.solid {
                continue;
            }
            if overlaps(pos, half, ob.pos, ob.half) {
                if velocity.x > 0.0 {
                    pos.x = ob.pos.x - ob.half.x - half.x;
                    flags.right = true;
                } else {
                    pos.x = ob.pos.x + ob.half.x + half.x;
                    flags.left = true;
                }
                if ob.is_block {
                    note_touch(&mut touched, ob.entity);
                }
            }
        }
        if pos.x - half.x < 0.0 {
            pos.x = half.x;
            flags.left = true;
        } else if pos.x + half.x > bounds.width() {
            pos.x = bounds.width() - half.x;
            flags.right = true;
        }
    }

    if velocity.y != 0.0 {
        pos.y += velocity.y * dt;
        for ob in &obstacles {
            if !ob.solid {
                continue;
            }
            if overlaps(pos, half, ob.pos, ob.half) {
                if velocity.y > 0.0 {
                    pos.y = ob.pos.y - ob.half.y - half.y;
                    flags.down = true;
                } else {
                    pos.y = ob.pos.y + ob.half.y + half.y;
                    flags.up = true;
                }
                if ob.is_block {
                    note_touch(&mut touched, ob.entity);
                }
            }
        }
        if pos.y - half.y < 0.0 {
            pos.y = half.y;
            flags.up = true;
        } else if pos.y + half.y > bounds.height() {
            pos.y = bounds.height() - half.y;
            flags.down = true;
        }
    }

    // Touches against non-solid (sliding) blocks don't clamp or set
    // flags, but the resolver still needs the contact to keep such a
    // block from re-solidifying under the player.
    for ob in &obstacles {
        if ob.is_block && !ob.solid && overlaps(pos, half, ob.pos, ob.half) {
            note_touch(&mut touched, ob.entity);
        }
    }

    world.positions.insert(player, pos);
    world.blocked.insert(player, flags);

    for block in touched {
        events.player_block.send(ContactEvent { a: player, b: block });
    }

    if debug_log {
        println!(
            "PHYS|pos:({:.1},{:.1})|vel:({:.0},{:.0})|blk:U{}D{}L{}R{}|pb:{}|ob:{}",
            pos.x,
            pos.y,
            velocity.x,
            velocity.y,
            flags.up as u8,
            flags.down as u8,
            flags.left as u8,
            flags.right as u8,
            events.player_block.len(),
            events.block_obstruction.len()
        );
    }
}
