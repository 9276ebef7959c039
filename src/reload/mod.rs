//! Hot-reload harness
//!
//! Lets the game keep running while its tuning module and asset bundles are
//! edited on disk. The harness owns no simulation state: it watches file
//! modification times and tells a [`Reloadable`] target when to reload.
//!
//! - `watcher`: modification-time source and the debounce rule
//! - `assets`: records asset loads so they can be replayed
//! - `harness`: the polling orchestrator

pub mod assets;
pub mod harness;
pub mod watcher;

use std::path::{Path, PathBuf};

use crate::platform::{AssetError, AssetLoader};
use crate::settings::ConfigError;

pub use assets::{AssetLoad, AssetRecorder};
pub use harness::{HotReload, InitParams, ReloadOutcome};
pub use watcher::{FsModTimes, ModTimes, is_due};

/// Errors raised while reloading
#[derive(Debug, thiserror::Error)]
pub enum ReloadError {
    /// The display cannot be reconfigured live; the process must restart
    #[error("re-initialised with different parameters ({previous:?} -> {requested:?}), restart required")]
    InitMismatch {
        previous: InitParams,
        requested: InitParams,
    },

    #[error("failed to reload module {path}: {source}")]
    Module {
        path: PathBuf,
        #[source]
        source: ConfigError,
    },

    #[error(transparent)]
    Asset(#[from] AssetError),

    #[error("cannot read modification time of {path}: {source}")]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ReloadError {
    /// Errors that cannot be recovered from without restarting the process
    pub fn is_fatal(&self) -> bool {
        matches!(self, ReloadError::InitMismatch { .. })
    }
}

/// A component that can swap its code/data module in place
pub trait Reloadable {
    /// Re-read the module at `path`, keeping runtime state
    fn reload_module(&mut self, path: &Path) -> Result<(), ReloadError>;

    /// Issue every asset load the component needs
    fn load_assets(&mut self, loader: &mut dyn AssetLoader) -> Result<(), AssetError>;

    /// Display parameters the component expects
    fn init_params(&self) -> InitParams;
}
