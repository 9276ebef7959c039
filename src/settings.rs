//! Game settings and startup configuration
//!
//! Built once from the command line. Anything that should change while the
//! game runs belongs in [`crate::tuning::Tuning`] instead.

use std::path::PathBuf;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::clock::clamp_speed;

/// Errors from loading or validating configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// How player movement is resolved against floors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CollisionPolicy {
    /// Per-axis validity; blocked axes don't move at all
    #[default]
    AxisSeparated,
    /// Per-axis hit sets; blocked axes snap to the contacted edge
    Continuous,
}

impl CollisionPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollisionPolicy::AxisSeparated => "axis",
            CollisionPolicy::Continuous => "continuous",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "axis" | "axis-separated" => Some(CollisionPolicy::AxisSeparated),
            "continuous" | "physics" => Some(CollisionPolicy::Continuous),
            _ => None,
        }
    }
}

/// Level behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LevelMode {
    /// Floors stay where they were generated
    #[default]
    Static,
    /// Floors and pickups scroll left and recycle on the right
    Endless,
}

impl LevelMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelMode::Static => "static",
            LevelMode::Endless => "endless",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "static" => Some(LevelMode::Static),
            "endless" | "runner" => Some(LevelMode::Endless),
            _ => None,
        }
    }

    pub fn scrolls(&self) -> bool {
        matches!(self, LevelMode::Endless)
    }
}

/// Simulation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Target frame rate of the host loop
    pub fps: u32,
    /// Initial speed multiplier (clamped to 0.25..=3.0)
    pub speed: f32,

    // === Screen ===
    pub screen_width: f32,
    pub screen_height: f32,
    pub caption: String,
    /// Integer display scale (passed through to the engine)
    pub scale: u32,

    // === Player ===
    /// Start-of-run position
    pub spawn: Vec2,
    /// Position after a respawn
    pub respawn: Vec2,
    /// Distance below the screen bottom at which a dead player respawns
    pub respawn_depth: f32,

    // === Level ===
    pub collision: CollisionPolicy,
    pub level: LevelMode,
    /// Level layout seed
    pub seed: u64,
    /// Asset bundles loaded at startup
    pub assets: Vec<PathBuf>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            fps: DEFAULT_FPS,
            speed: 1.0,

            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            caption: "Toomy Runner".to_string(),
            scale: 3,

            spawn: Vec2::new(SPAWN_X, SPAWN_Y),
            respawn: Vec2::new(SPAWN_X, RESPAWN_Y),
            respawn_depth: RESPAWN_DEPTH,

            collision: CollisionPolicy::AxisSeparated,
            level: LevelMode::Static,
            seed: 0,
            assets: vec![PathBuf::from("assets/toomy_game.pyxres")],
        }
    }
}

impl SimConfig {
    /// Configuration for the given frame rate and speed, other fields default
    pub fn new(fps: u32, speed: f32) -> Result<Self, ConfigError> {
        if fps == 0 {
            return Err(ConfigError::Invalid {
                field: "fps",
                reason: "must be at least 1".to_string(),
            });
        }
        if !speed.is_finite() {
            return Err(ConfigError::Invalid {
                field: "speed",
                reason: format!("must be a finite number, got {speed}"),
            });
        }

        let clamped = clamp_speed(speed);
        if clamped != speed {
            log::warn!(
                "Speed {} out of range, using {} ({}..={})",
                speed,
                clamped,
                SPEED_MIN,
                SPEED_MAX
            );
        }

        Ok(Self {
            fps,
            speed: clamped,
            ..Self::default()
        })
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_collision(mut self, collision: CollisionPolicy) -> Self {
        self.collision = collision;
        self
    }

    pub fn with_level(mut self, level: LevelMode) -> Self {
        self.level = level;
        self
    }

    pub fn with_assets(mut self, assets: Vec<PathBuf>) -> Self {
        self.assets = assets;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_clamps_speed() {
        let config = SimConfig::new(60, 5.0).unwrap();
        assert_eq!(config.speed, SPEED_MAX);
        assert_eq!(config.fps, 60);

        let config = SimConfig::new(60, 0.1).unwrap();
        assert_eq!(config.speed, SPEED_MIN);
    }

    #[test]
    fn test_new_rejects_zero_fps_and_nan_speed() {
        assert!(matches!(
            SimConfig::new(0, 1.0),
            Err(ConfigError::Invalid { field: "fps", .. })
        ));
        assert!(matches!(
            SimConfig::new(30, f32::NAN),
            Err(ConfigError::Invalid { field: "speed", .. })
        ));
    }

    #[test]
    fn test_policy_and_mode_parse() {
        assert_eq!(
            CollisionPolicy::from_str("Continuous"),
            Some(CollisionPolicy::Continuous)
        );
        assert_eq!(
            CollisionPolicy::from_str(CollisionPolicy::AxisSeparated.as_str()),
            Some(CollisionPolicy::AxisSeparated)
        );
        assert_eq!(LevelMode::from_str("runner"), Some(LevelMode::Endless));
        assert_eq!(LevelMode::from_str("bogus"), None);
        assert!(LevelMode::Endless.scrolls());
        assert!(!LevelMode::Static.scrolls());
    }

    #[test]
    fn test_default_respawn_point_above_screen() {
        let config = SimConfig::default();
        assert_eq!(config.spawn, Vec2::new(72.0, 25.0));
        assert_eq!(config.respawn, Vec2::new(72.0, -16.0));
        assert_eq!(config.respawn_depth, 600.0);
    }
}
