//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Speed-scaled step only, no wall clock
//! - Seeded RNG only
//! - Order-independent collision checks
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod clock;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;

pub use clock::SpeedClock;
pub use collision::{AxisMove, Movement, Rect, resolve_continuous, validate_movement};
pub use state::{Floor, LifeState, Pickup, PickupKind, Player, ThemeId, World};
pub use tick::{SimEvent, TickInput, tick};
