//! Data-driven game balance
//!
//! Physics and scoring constants, loaded from JSON. This is the module the
//! hot-reload harness swaps while the game keeps running, so every field
//! has a default and a partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::settings::ConfigError;

/// Movement and pickup constants, in units per canonical (30 Hz) frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Horizontal speed while a direction is held
    pub move_speed: f32,
    /// Extra downward speed while down is held
    pub down_speed: f32,
    /// Upward speed applied on the jump edge
    pub jump_speed: f32,
    /// Added to vertical velocity every canonical frame while airborne
    pub gravity: f32,
    /// Minimum upward speed after collecting a pickup
    pub bounce_speed: f32,
    /// Pickups are collected when both axis distances are below this
    pub pickup_reach: f32,
    /// Leftward scroll speed in endless mode
    pub scroll_speed: f32,
    /// Entities left of this x are recycled
    pub recycle_boundary: f32,
    /// How far ahead a recycled pickup reappears
    pub pickup_wrap_distance: f32,
    /// Display the module expects; must match what the process started with
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display: Option<DisplayRequest>,
}

/// Display parameters named by the tuning module.
///
/// Unset fields follow the startup configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayRequest {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub caption: Option<String>,
    pub scale: Option<u32>,
    pub fps: Option<u32>,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            move_speed: 2.0,
            down_speed: 2.0,
            jump_speed: 10.0,
            gravity: 1.0,
            bounce_speed: 8.0,
            pickup_reach: 12.0,
            scroll_speed: 2.0,
            recycle_boundary: -40.0,
            pickup_wrap_distance: 240.0,
            display: None,
        }
    }
}

impl Tuning {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Load tuning from a JSON file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_default()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        let fields = [
            ("move_speed", self.move_speed),
            ("down_speed", self.down_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("bounce_speed", self.bounce_speed),
            ("pickup_reach", self.pickup_reach),
            ("scroll_speed", self.scroll_speed),
            ("pickup_wrap_distance", self.pickup_wrap_distance),
        ];
        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::Invalid {
                    field: name,
                    reason: format!("must be a finite non-negative number, got {value}"),
                });
            }
        }
        if !self.recycle_boundary.is_finite() {
            return Err(ConfigError::Invalid {
                field: "recycle_boundary",
                reason: "must be finite".to_string(),
            });
        }
        if let Some(display) = &self.display {
            let sizes = [
                ("display.width", display.width),
                ("display.height", display.height),
                ("display.scale", display.scale),
                ("display.fps", display.fps),
            ];
            for (name, value) in sizes {
                if value == Some(0) {
                    return Err(ConfigError::Invalid {
                        field: name,
                        reason: "must be greater than zero".to_string(),
                    });
                }
            }
        }
        Ok(())
    }
}
