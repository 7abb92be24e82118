/// Tutorial progress persistence
///
/// Remembers whether the player already finished the tutorial.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::TutorialConfig;
use crate::error::PersistenceError;
use crate::messaging::TutorialEvent;

/// Persisted tutorial data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorialProgress {
    /// Whether the tutorial was completed or skipped
    pub completed: bool,

    /// Format version (for future migrations)
    pub version: u32,
}

impl Default for TutorialProgress {
    fn default() -> Self {
        Self {
            completed: false,
            version: Self::VERSION,
        }
    }
}

impl TutorialProgress {
    /// Current format version
    pub const VERSION: u32 = 1;

    pub fn completed() -> Self {
        Self {
            completed: true,
            version: Self::VERSION,
        }
    }

    /// Get progress file path
    pub fn file_path() -> Result<PathBuf, PersistenceError> {
        TutorialConfig::app_dir()
            .map(|dir| dir.join("progress.json"))
            .ok_or(PersistenceError::NoConfigDir)
    }

    /// Load progress from the default location
    pub fn load() -> Result<Self, PersistenceError> {
        Self::load_from(&Self::file_path()?)
    }

    /// Load progress; a missing file means a fresh player
    pub fn load_from(path: &Path) -> Result<Self, PersistenceError> {
        if !path.exists() {
            tracing::debug!("No tutorial progress found, starting fresh");
            return Ok(Self::default());
        }

        let load_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            PersistenceError::LoadFailed {
                path: path.display().to_string(),
                source,
            }
        };

        let json = fs::read_to_string(path).map_err(|e| load_failed(e.into()))?;
        let progress: TutorialProgress =
            serde_json::from_str(&json).map_err(|e| load_failed(e.into()))?;

        tracing::debug!("Loaded tutorial progress from: {}", path.display());

        // Check version for future migrations
        if progress.version != Self::VERSION {
            tracing::warn!(
                "Tutorial progress version mismatch: expected {}, found {}",
                Self::VERSION,
                progress.version
            );
        }

        Ok(progress)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), PersistenceError> {
        let save_failed = |source: Box<dyn std::error::Error + Send + Sync>| {
            PersistenceError::SaveFailed {
                path: path.display().to_string(),
                source,
            }
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| save_failed(e.into()))?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| save_failed(e.into()))?;
        fs::write(path, json).map_err(|e| save_failed(e.into()))?;

        tracing::debug!("Saved tutorial progress to: {}", path.display());
        Ok(())
    }

    /// Record completion at `path` when `event` ends a finished flow.
    ///
    /// Returns whether progress was written.
    pub fn save_on_finish(event: &TutorialEvent, path: &Path) -> Result<bool, PersistenceError> {
        match event {
            TutorialEvent::Ended { finished: true } => {
                Self::completed().save_to(path)?;
                tracing::info!("Tutorial marked as completed");
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Delete the progress file
    pub fn delete_at(path: &Path) -> Result<(), PersistenceError> {
        if path.exists() {
            fs::remove_file(path).map_err(|e| PersistenceError::SaveFailed {
                path: path.display().to_string(),
                source: e.into(),
            })?;
            tracing::debug!("Deleted tutorial progress file: {}", path.display());
        }
        Ok(())
    }
}
