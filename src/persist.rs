//! Save-file gateway.
//!
//! Score and kill count survive restarts through a small JSON file.
//! Loading is infallible: a missing or unreadable save simply means a
//! fresh session. Saving is best-effort and single-shot, so a failed
//! write can never block shutdown.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

const SAVE_FILE: &str = ".sidescroller_save.json";

/// The only state that outlives the process.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SaveState {
    pub score: u32,
    pub kills: u32,
}

/// Save location under `$HOME`, falling back to the working directory.
pub fn default_save_path() -> PathBuf {
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(SAVE_FILE)
}

/// Read the save file. Any failure yields a fresh `SaveState`.
pub fn load_save(path: &Path) -> SaveState {
    match fs::read_to_string(path) {
        Ok(contents) => match serde_json::from_str(&contents) {
            Ok(save) => {
                info!("loaded save from {}", path.display());
                save
            }
            Err(err) => {
                warn!("ignoring malformed save {}: {}", path.display(), err);
                SaveState::default()
            }
        },
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            info!("no save at {}, starting a new game", path.display());
            SaveState::default()
        }
        Err(err) => {
            warn!("could not read save {}: {}", path.display(), err);
            SaveState::default()
        }
    }
}

/// Overwrite the save file with the current score and kill count.
pub fn write_save(path: &Path, save: &SaveState) -> io::Result<()> {
    let contents = serde_json::to_string(save)?;
    fs::write(path, contents)
}
