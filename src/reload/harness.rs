//! Polling hot-reload orchestrator

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use super::assets::AssetRecorder;
use super::watcher::{FsModTimes, ModTimes, is_due};
use super::{ReloadError, Reloadable};
use crate::platform::AssetLoader;
use crate::settings::SimConfig;

/// Default time between filesystem checks
pub const POLL_INTERVAL: Duration = Duration::from_secs(1);
/// Default minimum age of a modification before it is acted on
pub const DEBOUNCE: Duration = Duration::from_secs(1);

/// Display parameters captured on the first initialisation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InitParams {
    pub width: u32,
    pub height: u32,
    pub caption: String,
    pub scale: u32,
    pub fps: u32,
}

impl InitParams {
    pub fn from_config(config: &SimConfig) -> Self {
        Self {
            width: config.screen_width as u32,
            height: config.screen_height as u32,
            caption: config.caption.clone(),
            scale: config.scale,
            fps: config.fps,
        }
    }
}

/// What a poll did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReloadOutcome {
    /// Poll interval has not elapsed yet
    Skipped,
    /// Nothing was due
    Unchanged,
    /// The module was reloaded and its assets replayed
    Module,
    /// These assets were reloaded individually
    Assets(Vec<PathBuf>),
}

/// Watches a module and the assets it loads
pub struct HotReload<M: ModTimes = FsModTimes> {
    mod_times: M,
    module: Option<PathBuf>,
    /// Last modification time acted on, per watched path
    stamps: HashMap<PathBuf, SystemTime>,
    assets: AssetRecorder,
    init: Option<InitParams>,
    poll_interval: Duration,
    debounce: Duration,
    last_poll: Option<SystemTime>,
}

impl HotReload<FsModTimes> {
    pub fn new() -> Self {
        Self::with_mod_times(FsModTimes)
    }
}

impl Default for HotReload<FsModTimes> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: ModTimes> HotReload<M> {
    pub fn with_mod_times(mod_times: M) -> Self {
        Self {
            mod_times,
            module: None,
            stamps: HashMap::new(),
            assets: AssetRecorder::new(),
            init: None,
            poll_interval: POLL_INTERVAL,
            debounce: DEBOUNCE,
            last_poll: None,
        }
    }

    pub fn with_timing(mut self, poll_interval: Duration, debounce: Duration) -> Self {
        self.poll_interval = poll_interval;
        self.debounce = debounce;
        self
    }

    pub fn mod_times_mut(&mut self) -> &mut M {
        &mut self.mod_times
    }

    pub fn module(&self) -> Option<&Path> {
        self.module.as_deref()
    }

    pub fn recorded_assets(&self) -> &[super::AssetLoad] {
        self.assets.loads()
    }

    /// Capture display parameters, or check them against the captured ones
    pub fn init(&mut self, params: InitParams) -> Result<(), ReloadError> {
        match &self.init {
            None => {
                log::info!("Display initialised: {:?}", params);
                self.init = Some(params);
                Ok(())
            }
            Some(previous) if *previous == params => Ok(()),
            Some(previous) => Err(ReloadError::InitMismatch {
                previous: previous.clone(),
                requested: params,
            }),
        }
    }

    /// Start watching the module at `path` from its current state
    pub fn watch_module(&mut self, path: impl Into<PathBuf>) -> Result<(), ReloadError> {
        let path = path.into();
        let modified = self.stat(&path)?;
        self.stamps.insert(path.clone(), modified);
        log::info!("Watching module {}", path.display());
        self.module = Some(path);
        Ok(())
    }

    fn stat(&self, path: &Path) -> Result<SystemTime, ReloadError> {
        self.mod_times
            .modified(path)
            .map_err(|source| ReloadError::Stat {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Have the target issue its asset loads, recording each one
    pub fn load_assets(
        &mut self,
        target: &mut dyn Reloadable,
        loader: &mut dyn AssetLoader,
    ) -> Result<(), ReloadError> {
        let already = self.assets.loads().len();
        let result = target.load_assets(&mut self.assets.recording(loader));

        // Loads that succeeded before a failure are still watched
        for load in &self.assets.loads()[already..] {
            match self.mod_times.modified(&load.path) {
                Ok(modified) => {
                    self.stamps.insert(load.path.clone(), modified);
                }
                Err(err) => log::warn!("Cannot watch {}: {}", load.path.display(), err),
            }
        }
        result.map_err(ReloadError::from)
    }

    /// Check watched files and reload whatever is due.
    ///
    /// Does nothing until `poll_interval` has passed since the previous
    /// poll. A changed module takes priority; assets are only checked when
    /// the module did not need reloading.
    pub fn poll(
        &mut self,
        now: SystemTime,
        target: &mut dyn Reloadable,
        loader: &mut dyn AssetLoader,
    ) -> Result<ReloadOutcome, ReloadError> {
        if let Some(last) = self.last_poll
            && now
                .duration_since(last)
                .is_ok_and(|elapsed| elapsed < self.poll_interval)
        {
            return Ok(ReloadOutcome::Skipped);
        }
        self.last_poll = Some(now);

        if let Some(module) = self.module.clone() {
            match self.mod_times.modified(&module) {
                Ok(modified) => {
                    if is_due(self.stamps.get(&module).copied(), modified, now, self.debounce) {
                        // Stamp first so a broken module is attempted once per edit
                        self.stamps.insert(module.clone(), modified);
                        log::info!("Reloading module {}", module.display());
                        target.reload_module(&module)?;
                        self.init(target.init_params())?;

                        self.assets.clear();
                        self.load_assets(target, loader)?;
                        return Ok(ReloadOutcome::Module);
                    }
                }
                Err(err) => log::warn!("Cannot check {}: {}", module.display(), err),
            }
        }

        let mut reloaded = Vec::new();
        for load in self.assets.loads() {
            let Ok(modified) = self.mod_times.modified(&load.path) else {
                continue;
            };
            if !is_due(self.stamps.get(&load.path).copied(), modified, now, self.debounce) {
                continue;
            }
            self.stamps.insert(load.path.clone(), modified);
            self.assets.reload(loader, load)?;
            reloaded.push(load.path.clone());
        }

        if reloaded.is_empty() {
            Ok(ReloadOutcome::Unchanged)
        } else {
            Ok(ReloadOutcome::Assets(reloaded))
        }
    }
}
