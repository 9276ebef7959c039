//! Game state and core simulation types
//!
//! Everything the simulation mutates during a tick lives in [`World`].

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::SpeedClock;
use super::collision::Rect;
use super::level;
use crate::consts::*;
use crate::settings::SimConfig;

/// Whether the player is in play or falling off the bottom of the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LifeState {
    /// Normal play
    Alive,
    /// Below the screen, waiting to cross the respawn depth
    FallingDead,
}

/// The player character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    /// Vertical velocity in units per canonical frame (negative is up)
    pub vy: f32,
    pub alive: bool,
}

impl Player {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            vy: 0.0,
            alive: true,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_SIZE, PLAYER_SIZE)
    }

    pub fn life_state(&self) -> LifeState {
        if self.alive {
            LifeState::Alive
        } else {
            LifeState::FallingDead
        }
    }

    /// True while moving downward (selects the falling sprite)
    pub fn is_falling(&self) -> bool {
        self.vy > 0.0
    }
}

/// Cosmetic floor theme (tile row in the block sheet)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ThemeId(pub u8);

impl ThemeId {
    /// Theme for the floor at `index`, cycling through the available themes
    pub fn for_index(index: usize) -> Self {
        Self((index % THEME_COUNT as usize) as u8)
    }
}

/// A solid platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Floor {
    pub rect: Rect,
    pub active: bool,
    pub theme: ThemeId,
}

impl Floor {
    /// Build a floor from block-grid coordinates.
    ///
    /// Height never exceeds width, so a one-block-wide floor is a square.
    pub fn from_blocks(x: i32, y: i32, width: i32, height: i32, theme: ThemeId) -> Self {
        let width = width as f32 * BLOCK_SIZE;
        let height = (height as f32 * BLOCK_SIZE).min(width);
        Self {
            rect: Rect::new(x as f32 * BLOCK_SIZE, y as f32 * BLOCK_SIZE, width, height),
            active: true,
            theme,
        }
    }

    pub fn left(&self) -> f32 {
        self.rect.left
    }

    pub fn right(&self) -> f32 {
        self.rect.right()
    }

    pub fn top(&self) -> f32 {
        self.rect.top
    }

    pub fn bottom(&self) -> f32 {
        self.rect.bottom()
    }
}

/// Fruit kinds, worth more the further down the list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Cherry,
    Strawberry,
    Lemon,
    Grape,
}

impl PickupKind {
    pub const ALL: [PickupKind; 4] = [
        PickupKind::Cherry,
        PickupKind::Strawberry,
        PickupKind::Lemon,
        PickupKind::Grape,
    ];

    pub fn index(self) -> usize {
        match self {
            PickupKind::Cherry => 0,
            PickupKind::Strawberry => 1,
            PickupKind::Lemon => 2,
            PickupKind::Grape => 3,
        }
    }

    /// Out-of-range indices wrap around
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    /// Points awarded on collection
    pub fn score_value(self) -> u64 {
        (self.index() as u64 + 1) * 100
    }
}

/// A collectible fruit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pickup {
    pub pos: Vec2,
    pub kind: PickupKind,
    pub active: bool,
}

impl Pickup {
    pub fn new(pos: Vec2, kind: PickupKind) -> Self {
        Self {
            pos,
            kind,
            active: true,
        }
    }
}

/// Complete simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub config: SimConfig,
    pub clock: SpeedClock,
    pub player: Player,
    pub floors: Vec<Floor>,
    pub pickups: Vec<Pickup>,
    pub score: u64,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Jump button state last tick, for rising-edge detection
    pub(crate) jump_was_held: bool,
    pub(crate) rng: Pcg32,
}

impl World {
    /// Create a world and lay out a fresh level from the configured seed
    pub fn new(config: SimConfig) -> Self {
        let mut rng = Pcg32::seed_from_u64(config.seed);
        let floors = level::generate_floors(&mut rng);
        let pickups = level::generate_pickups(&mut rng);
        log::info!(
            "Level generated (seed {}): {} floors, {} pickups",
            config.seed,
            floors.len(),
            pickups.len()
        );

        Self {
            clock: SpeedClock::new(config.fps, config.speed),
            player: Player::new(config.spawn),
            floors,
            pickups,
            score: 0,
            time_ticks: 0,
            jump_was_held: false,
            rng,
            config,
        }
    }

    /// Create a world with an explicit layout (used by tests and editors)
    pub fn with_layout(config: SimConfig, floors: Vec<Floor>, pickups: Vec<Pickup>) -> Self {
        Self {
            clock: SpeedClock::new(config.fps, config.speed),
            player: Player::new(config.spawn),
            floors,
            pickups,
            score: 0,
            time_ticks: 0,
            jump_was_held: false,
            rng: Pcg32::seed_from_u64(config.seed),
            config,
        }
    }

    /// Vertical position past which the player respawns
    pub fn respawn_threshold(&self) -> f32 {
        self.config.screen_height + self.config.respawn_depth
    }

    /// Put the player back at the respawn point with a zeroed score
    pub fn respawn(&mut self) {
        self.score = 0;
        self.player.pos = self.config.respawn;
        self.player.vy = 0.0;
        self.player.alive = true;
    }

    pub fn active_pickups(&self) -> impl Iterator<Item = &Pickup> {
        self.pickups.iter().filter(|p| p.active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_floor_height_capped_by_width() {
        let floor = Floor::from_blocks(2, 8, 1, 3, ThemeId(0));
        assert_eq!(floor.left(), 32.0);
        assert_eq!(floor.top(), 128.0);
        assert_eq!(floor.rect.width, 16.0);
        assert_eq!(floor.rect.height, 16.0);
        assert_eq!(floor.right(), 48.0);
        assert_eq!(floor.bottom(), 144.0);
    }

    #[test]
    fn test_pickup_score_values() {
        let values: Vec<u64> = PickupKind::ALL.iter().map(|k| k.score_value()).collect();
        assert_eq!(values, vec![100, 200, 300, 400]);
        assert_eq!(PickupKind::from_index(5), PickupKind::Strawberry);
    }

    #[test]
    fn test_new_world_spawns_alive() {
        let world = World::new(SimConfig::default());
        assert!(world.player.alive);
        assert_eq!(world.player.life_state(), LifeState::Alive);
        assert_eq!(world.player.pos, Vec2::new(SPAWN_X, SPAWN_Y));
        assert_eq!(world.floors.len(), FLOOR_COUNT);
        assert_eq!(world.pickups.len(), PICKUP_COUNT);
        assert_eq!(world.score, 0);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let a = World::new(SimConfig::default());
        let b = World::new(SimConfig::default());
        for (fa, fb) in a.floors.iter().zip(b.floors.iter()) {
            assert_eq!(fa.rect, fb.rect);
        }
        for (pa, pb) in a.pickups.iter().zip(b.pickups.iter()) {
            assert_eq!(pa.pos, pb.pos);
            assert_eq!(pa.kind, pb.kind);
        }
    }

    #[test]
    fn test_respawn_resets_player_and_score() {
        let mut world = World::new(SimConfig::default());
        world.score = 700;
        world.player.pos = Vec2::new(10.0, 900.0);
        world.player.vy = 12.0;
        world.player.alive = false;

        world.respawn();
        assert_eq!(world.score, 0);
        assert_eq!(world.player.pos, Vec2::new(SPAWN_X, RESPAWN_Y));
        assert_eq!(world.player.vy, 0.0);
        assert!(world.player.alive);
    }
}
