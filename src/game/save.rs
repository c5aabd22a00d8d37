//! # Save Files
//!
//! The whole [`GameState`] is encoded with bincode and deflated into one opaque
//! blob. The layout is not a compatibility contract; only round trips are.

use crate::game::GameState;
use crate::TombsResult;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use log::{info, warn};
use std::fs;
use std::io::{Read, Write};
use std::path::Path;

impl GameState {
    /// Encodes the full state into a compressed blob.
    pub fn to_save_bytes(&self) -> TombsResult<Vec<u8>> {
        let encoded = bincode::serialize(self)?;
        let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(&encoded)?;
        Ok(encoder.finish()?)
    }

    /// Decodes a blob produced by [`GameState::to_save_bytes`].
    pub fn from_save_bytes(bytes: &[u8]) -> TombsResult<Self> {
        let mut decoded = Vec::new();
        ZlibDecoder::new(bytes).read_to_end(&mut decoded)?;
        let mut state: GameState = bincode::deserialize(&decoded)?;
        state.reseed();
        Ok(state)
    }

    /// Writes the save blob to `path`, replacing any previous save.
    pub fn save_to_file(&self, path: impl AsRef<Path>) -> TombsResult<()> {
        let path = path.as_ref();
        let bytes = self.to_save_bytes()?;
        fs::write(path, &bytes)?;
        info!("Saved game to {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }

    /// Reads a save blob from `path`.
    pub fn load_from_file(path: impl AsRef<Path>) -> TombsResult<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        match Self::from_save_bytes(&bytes) {
            Ok(state) => {
                info!("Loaded game from {}", path.display());
                Ok(state)
            }
            Err(e) => {
                warn!("Rejected save file {}: {e}", path.display());
                Err(e)
            }
        }
    }
}
