//! The reloadable game component
//!
//! Owns the world and the current tuning. The hot-reload harness swaps the
//! tuning module and replays asset loads through the [`Reloadable`] impl
//! while the world (player, score, clock) carries on untouched.

use std::path::Path;

use crate::draw;
use crate::platform::{
    AssetError, AssetLoader, AssetParts, AudioSink, Canvas, MUSIC_MAIN, play_cues,
};
use crate::reload::{InitParams, ReloadError, Reloadable};
use crate::settings::SimConfig;
use crate::sim::{SimEvent, TickInput, World, tick};
use crate::tuning::Tuning;

pub struct Game {
    world: World,
    tuning: Tuning,
    music_started: bool,
}

impl Game {
    pub fn new(config: SimConfig, tuning: Tuning) -> Self {
        Self {
            world: World::new(config),
            tuning,
            music_started: false,
        }
    }

    /// Wrap an existing world
    pub fn from_world(world: World, tuning: Tuning) -> Self {
        Self {
            world,
            tuning,
            music_started: false,
        }
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn config(&self) -> &SimConfig {
        &self.world.config
    }

    /// Start the looping background track, once
    pub fn start_music(&mut self, audio: &mut dyn AudioSink) {
        if !self.music_started {
            audio.play_music(MUSIC_MAIN, true);
            self.music_started = true;
        }
    }

    /// Advance one tick and play the resulting sound cues
    pub fn step(&mut self, input: &TickInput, audio: &mut dyn AudioSink) -> Vec<SimEvent> {
        let events = tick(&mut self.world, input, &self.tuning);
        play_cues(&events, audio);
        events
    }

    pub fn draw(&self, canvas: &mut dyn Canvas) {
        draw::draw_frame(&self.world, canvas);
    }
}

impl Reloadable for Game {
    fn reload_module(&mut self, path: &Path) -> Result<(), ReloadError> {
        let tuning = Tuning::load(path).map_err(|source| ReloadError::Module {
            path: path.to_path_buf(),
            source,
        })?;
        if tuning != self.tuning {
            log::info!("Tuning changed: {:?}", tuning);
        }
        self.tuning = tuning;
        Ok(())
    }

    fn load_assets(&mut self, loader: &mut dyn AssetLoader) -> Result<(), AssetError> {
        for path in &self.world.config.assets {
            loader.load(path, AssetParts::ALL)?;
        }
        Ok(())
    }

    /// Startup display parameters with the module's display block applied
    fn init_params(&self) -> InitParams {
        let mut params = InitParams::from_config(&self.world.config);
        if let Some(display) = &self.tuning.display {
            params.width = display.width.unwrap_or(params.width);
            params.height = display.height.unwrap_or(params.height);
            params.scale = display.scale.unwrap_or(params.scale);
            params.fps = display.fps.unwrap_or(params.fps);
            if let Some(caption) = &display.caption {
                params.caption = caption.clone();
            }
        }
        params
    }
}
