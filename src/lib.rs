//! Toomy Runner - A side-scrolling platformer core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (clock, collisions, game state)
//! - `platform`: Engine capabilities (input, drawing, audio, assets)
//! - `draw`: Frame drawing against the `Canvas` capability
//! - `game`: The reloadable simulation component
//! - `reload`: Hot-reload harness for the tuning module and assets
//! - `settings` / `tuning`: Startup configuration and data-driven balance

pub mod draw;
pub mod game;
pub mod platform;
pub mod reload;
pub mod settings;
pub mod sim;
pub mod tuning;

pub use game::Game;
pub use settings::{CollisionPolicy, ConfigError, LevelMode, SimConfig};
pub use tuning::{DisplayRequest, Tuning};

/// Game configuration constants
pub mod consts {
    /// Frame rate the movement constants were authored against
    pub const BASE_FPS: f32 = 30.0;
    /// Default target frame rate
    pub const DEFAULT_FPS: u32 = 75;

    /// Speed multiplier bounds and increment
    pub const SPEED_MIN: f32 = 0.25;
    pub const SPEED_MAX: f32 = 3.0;
    pub const SPEED_INCREMENT: f32 = 0.25;

    /// Level layout grid size
    pub const BLOCK_SIZE: f32 = 16.0;
    /// Player sprite is a square of this size
    pub const PLAYER_SIZE: f32 = 16.0;

    /// Screen dimensions
    pub const SCREEN_WIDTH: f32 = 256.0;
    pub const SCREEN_HEIGHT: f32 = 256.0;

    /// Where the player starts the run
    pub const SPAWN_X: f32 = 72.0;
    pub const SPAWN_Y: f32 = 25.0;
    /// Where the player drops back in after dying (just above the screen)
    pub const RESPAWN_Y: f32 = -16.0;
    /// How far below the screen the player falls before respawning
    pub const RESPAWN_DEPTH: f32 = 600.0;

    /// Entity counts for a fresh level
    pub const FLOOR_COUNT: usize = 5;
    pub const PICKUP_COUNT: usize = 5;
    /// Number of cosmetic floor themes
    pub const THEME_COUNT: u8 = 5;
}
