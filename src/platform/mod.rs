//! Platform abstraction layer
//!
//! The simulation never talks to a game engine directly. Engines plug in
//! through these capabilities:
//! - Input: held / pressed-this-frame button queries
//! - Drawing: sprite blits and text
//! - Audio: sound cues and music
//! - Assets: loading resource bundles

pub mod headless;
pub mod input;

use std::path::{Path, PathBuf};

use crate::sim::SimEvent;

pub use headless::{FsAssetLoader, LogAudio, NullCanvas};
pub use input::{Button, EdgeInput, InputSource, read_input};

/// A rectangular region of an image bank
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprite {
    /// Image bank index
    pub image: u8,
    pub u: u16,
    pub v: u16,
    pub w: u16,
    pub h: u16,
    /// Palette colour drawn as transparent
    pub colkey: Option<u8>,
}

impl Sprite {
    pub const fn new(image: u8, u: u16, v: u16, w: u16, h: u16, colkey: Option<u8>) -> Self {
        Self {
            image,
            u,
            v,
            w,
            h,
            colkey,
        }
    }

    /// The same sprite cropped to at most `w` x `h`
    pub fn cropped(&self, w: u16, h: u16) -> Self {
        Self {
            w: self.w.min(w),
            h: self.h.min(h),
            ..*self
        }
    }
}

/// Drawing surface supplied by the engine
pub trait Canvas {
    fn width(&self) -> f32;
    fn height(&self) -> f32;
    fn clear(&mut self, color: u8);
    fn blit(&mut self, x: f32, y: f32, sprite: &Sprite);
    fn text(&mut self, x: f32, y: f32, text: &str, color: u8);
}

/// Sound output supplied by the engine
pub trait AudioSink {
    fn play(&mut self, channel: u8, sound: u8);
    fn play_music(&mut self, track: u8, looped: bool);
}

/// Channel used for gameplay sound effects
pub const SFX_CHANNEL: u8 = 3;
/// Sound bank entries
pub const SOUND_PICKUP: u8 = 4;
pub const SOUND_DEATH: u8 = 5;
/// Background music track
pub const MUSIC_MAIN: u8 = 0;

/// Translate simulation events into sound cues
pub fn play_cues(events: &[SimEvent], audio: &mut dyn AudioSink) {
    for event in events {
        match event {
            SimEvent::PickupCollected { .. } => audio.play(SFX_CHANNEL, SOUND_PICKUP),
            SimEvent::Died => audio.play(SFX_CHANNEL, SOUND_DEATH),
            _ => {}
        }
    }
}

/// Which parts of a resource bundle to load
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetParts {
    pub image: bool,
    pub tilemap: bool,
    pub sound: bool,
    pub music: bool,
}

impl AssetParts {
    pub const ALL: AssetParts = AssetParts {
        image: true,
        tilemap: true,
        sound: true,
        music: true,
    };

    pub fn without_music(self) -> Self {
        Self {
            music: false,
            ..self
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.image || self.tilemap || self.sound || self.music)
    }
}

/// Errors from loading a resource bundle
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("cannot read asset {path}: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("asset {path} is empty")]
    Empty { path: PathBuf },
}

/// Resource loader supplied by the engine
pub trait AssetLoader {
    fn load(&mut self, path: &Path, parts: AssetParts) -> Result<(), AssetError>;
}
