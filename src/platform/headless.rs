//! Headless capability implementations
//!
//! Used by the command-line runner: drawing is counted, audio is logged and
//! assets are read from disk without being interpreted.

use std::path::Path;

use super::{AssetError, AssetLoader, AssetParts, AudioSink, Canvas, Sprite};
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};

/// Canvas that discards drawing but counts the calls
#[derive(Debug, Clone, Default)]
pub struct NullCanvas {
    pub clears: u64,
    pub blits: u64,
    pub texts: u64,
}

impl Canvas for NullCanvas {
    fn width(&self) -> f32 {
        SCREEN_WIDTH
    }

    fn height(&self) -> f32 {
        SCREEN_HEIGHT
    }

    fn clear(&mut self, _color: u8) {
        self.clears += 1;
    }

    fn blit(&mut self, _x: f32, _y: f32, _sprite: &Sprite) {
        self.blits += 1;
    }

    fn text(&mut self, _x: f32, _y: f32, _text: &str, _color: u8) {
        self.texts += 1;
    }
}

/// Audio sink that logs cues
#[derive(Debug, Clone, Default)]
pub struct LogAudio;

impl AudioSink for LogAudio {
    fn play(&mut self, channel: u8, sound: u8) {
        log::debug!("Sound {} on channel {}", sound, channel);
    }

    fn play_music(&mut self, track: u8, looped: bool) {
        log::info!("Music {} (looped: {})", track, looped);
    }
}

/// Loader that reads bundles from disk
#[derive(Debug, Clone, Default)]
pub struct FsAssetLoader {
    /// Total bytes read so far
    pub bytes_loaded: u64,
    pub loads: u64,
}

impl AssetLoader for FsAssetLoader {
    fn load(&mut self, path: &Path, parts: AssetParts) -> Result<(), AssetError> {
        let bytes = std::fs::read(path).map_err(|source| AssetError::Unreadable {
            path: path.to_path_buf(),
            source,
        })?;
        if bytes.is_empty() {
            return Err(AssetError::Empty {
                path: path.to_path_buf(),
            });
        }

        self.bytes_loaded += bytes.len() as u64;
        self.loads += 1;
        log::info!("Loaded {} ({} bytes, {:?})", path.display(), bytes.len(), parts);
        Ok(())
    }
}
