//! Simulation tick
//!
//! Core game loop that advances the world by one engine frame.
//!
//! Update order:
//! 1. Discrete input (quit, speed changes)
//! 2. Clock advance
//! 3. Player deltas from held input, jump edge and vertical velocity
//! 4. Collision resolution with the configured policy
//! 5. Apply the resolved position
//! 6. Landing / gravity
//! 7. Pickup collection, then scrolling and recycling
//! 8. Death and respawn

use glam::Vec2;

use super::collision::{resolve_continuous, validate_movement};
use super::level;
use super::state::{PickupKind, World};
use crate::settings::CollisionPolicy;
use crate::tuning::Tuning;

/// Input commands for a single tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Held: move left
    pub left: bool,
    /// Held: move right (wins over left)
    pub right: bool,
    /// Held: fall faster
    pub down: bool,
    /// Held: jump (only the rising edge triggers a jump)
    pub jump: bool,
    /// One-shot: increase speed multiplier
    pub speed_up: bool,
    /// One-shot: decrease speed multiplier
    pub speed_down: bool,
    /// One-shot: leave the game
    pub quit: bool,
}

/// Things that happened during a tick, for audio cues and logging
#[derive(Debug, Clone, PartialEq)]
pub enum SimEvent {
    QuitRequested,
    SpeedChanged { speed: f32 },
    Jumped,
    PickupCollected { index: usize, kind: PickupKind, points: u64 },
    /// Player fell off the bottom of the screen
    Died,
    /// Player dropped back in with a reset score
    Respawned,
}

/// Advance the world by one engine frame
pub fn tick(world: &mut World, input: &TickInput, tuning: &Tuning) -> Vec<SimEvent> {
    let mut events = Vec::new();

    if input.quit {
        events.push(SimEvent::QuitRequested);
        return events;
    }

    let previous_speed = world.clock.speed();
    if input.speed_up {
        world.clock.speed_up();
    } else if input.speed_down {
        world.clock.speed_down();
    }
    if world.clock.speed() != previous_speed {
        log::debug!("Speed {:.2}x -> {:.2}x", previous_speed, world.clock.speed());
        events.push(SimEvent::SpeedChanged {
            speed: world.clock.speed(),
        });
    }

    world.clock.advance();
    world.time_ticks += 1;
    let step = world.clock.step();

    update_player(world, input, tuning, step, &mut events);
    collect_pickups(world, tuning, &mut events);

    if world.config.level.scrolls() {
        level::scroll(
            &mut world.floors,
            &mut world.pickups,
            tuning.scroll_speed * step,
        );
    }
    level::recycle(
        &mut world.floors,
        &mut world.pickups,
        &mut world.rng,
        tuning,
        world.config.screen_width,
    );

    check_death(world, &mut events);

    events
}

fn update_player(
    world: &mut World,
    input: &TickInput,
    tuning: &Tuning,
    step: f32,
    events: &mut Vec<SimEvent>,
) {
    let mut delta = Vec2::ZERO;

    if input.left {
        delta.x = -tuning.move_speed * step;
    }
    if input.right {
        delta.x = tuning.move_speed * step;
    }

    let jump_edge = input.jump && !world.jump_was_held;
    world.jump_was_held = input.jump;
    if jump_edge {
        world.player.vy = -tuning.jump_speed;
        events.push(SimEvent::Jumped);
    }

    if input.down {
        delta.y = tuning.down_speed * step;
    }
    delta.y += world.player.vy * step;

    let rect = world.player.rect();
    let movement = match world.config.collision {
        CollisionPolicy::AxisSeparated => {
            validate_movement(&rect, delta, &world.floors).apply(world.player.pos, delta)
        }
        CollisionPolicy::Continuous => resolve_continuous(&rect, delta, &world.floors),
    };
    world.player.pos = movement.pos;

    if movement.y_blocked {
        world.player.vy = 0.0;
    } else {
        world.player.vy += tuning.gravity * step;
    }
}

fn collect_pickups(world: &mut World, tuning: &Tuning, events: &mut Vec<SimEvent>) {
    let player = &mut world.player;

    for (index, pickup) in world.pickups.iter_mut().enumerate() {
        if !pickup.active {
            continue;
        }
        let near = (pickup.pos.x - player.pos.x).abs() < tuning.pickup_reach
            && (pickup.pos.y - player.pos.y).abs() < tuning.pickup_reach;
        if !near {
            continue;
        }

        pickup.active = false;
        let points = pickup.kind.score_value();
        world.score += points;
        player.vy = player.vy.min(-tuning.bounce_speed);
        log::debug!("Collected {:?} for {} (score {})", pickup.kind, points, world.score);
        events.push(SimEvent::PickupCollected {
            index,
            kind: pickup.kind,
            points,
        });
    }
}

fn check_death(world: &mut World, events: &mut Vec<SimEvent>) {
    if world.player.pos.y <= world.config.screen_height {
        return;
    }

    if world.player.alive {
        world.player.alive = false;
        log::info!("Player fell off the screen (score {})", world.score);
        events.push(SimEvent::Died);
    }

    if world.player.pos.y > world.respawn_threshold() {
        world.respawn();
        log::info!("Player respawned");
        events.push(SimEvent::Respawned);
    }
}
