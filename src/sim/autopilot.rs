//! Idle/demo mode - the computer plays the game
//!
//! Produces a [`TickInput`] from the current world: head for the nearest
//! pickup and flap whenever the player drops too low or falls too fast.

use super::state::World;
use super::tick::TickInput;

/// Below this fraction of the screen height the autopilot always jumps
const DANGER_LINE: f32 = 0.6;
/// Falling faster than this triggers a jump
const MAX_FALL_SPEED: f32 = 6.0;
/// Horizontal dead zone around the target
const DEAD_ZONE: f32 = 4.0;

/// Decide the next tick's input
pub fn plan(world: &World) -> TickInput {
    let player = &world.player;
    let mut input = TickInput::default();

    let target = world
        .active_pickups()
        .min_by(|a, b| {
            let da = a.pos.distance_squared(player.pos);
            let db = b.pos.distance_squared(player.pos);
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|p| p.pos);

    if let Some(target) = target {
        let dx = target.x - player.pos.x;
        if dx > DEAD_ZONE {
            input.right = true;
        } else if dx < -DEAD_ZONE {
            input.left = true;
        }
    }

    let too_low = player.pos.y > world.config.screen_height * DANGER_LINE;
    let falling_fast = player.vy > MAX_FALL_SPEED && player.pos.y > 0.0;
    // Jumps trigger on the rising edge, so release every other tick
    input.jump = (too_low || falling_fast) && !world.jump_was_held;

    input
}
