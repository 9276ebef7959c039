//! Asset load recording
//!
//! Every load a reloadable component issues goes through [`Recording`],
//! which remembers the path and requested parts so single assets can be
//! re-loaded later. Music is only ever loaded once so hot swaps don't
//! restart the background track.

use std::path::{Path, PathBuf};

use crate::platform::{AssetError, AssetLoader, AssetParts};

/// One recorded load request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetLoad {
    pub path: PathBuf,
    /// Parts actually requested from the engine (music may be stripped)
    pub parts: AssetParts,
}

/// Loads seen since the last module reload
#[derive(Debug, Clone, Default)]
pub struct AssetRecorder {
    loads: Vec<AssetLoad>,
    music_loaded: bool,
}

impl AssetRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loads(&self) -> &[AssetLoad] {
        &self.loads
    }

    pub fn music_loaded(&self) -> bool {
        self.music_loaded
    }

    /// Forget recorded loads (the music flag survives)
    pub fn clear(&mut self) {
        self.loads.clear();
    }

    fn effective_parts(&self, parts: AssetParts) -> AssetParts {
        if self.music_loaded {
            parts.without_music()
        } else {
            parts
        }
    }

    /// Perform a load and record it once it succeeded
    pub fn load(
        &mut self,
        loader: &mut dyn AssetLoader,
        path: &Path,
        parts: AssetParts,
    ) -> Result<(), AssetError> {
        let parts = self.effective_parts(parts);
        loader.load(path, parts)?;
        self.loads.push(AssetLoad {
            path: path.to_path_buf(),
            parts,
        });
        if parts.music {
            self.music_loaded = true;
        }
        Ok(())
    }

    /// Re-load a previously recorded asset without recording it again
    pub fn reload(&self, loader: &mut dyn AssetLoader, load: &AssetLoad) -> Result<(), AssetError> {
        let parts = self.effective_parts(load.parts);
        log::info!("Reloading asset {}", load.path.display());
        loader.load(&load.path, parts)
    }

    /// Wrap `inner` so loads through it are recorded here
    pub fn recording<'a>(&'a mut self, inner: &'a mut dyn AssetLoader) -> Recording<'a> {
        Recording {
            recorder: self,
            inner,
        }
    }
}

/// An [`AssetLoader`] that records every load before forwarding it
pub struct Recording<'a> {
    recorder: &'a mut AssetRecorder,
    inner: &'a mut dyn AssetLoader,
}

impl AssetLoader for Recording<'_> {
    fn load(&mut self, path: &Path, parts: AssetParts) -> Result<(), AssetError> {
        self.recorder.load(self.inner, path, parts)
    }
}
