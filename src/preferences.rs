//! Saved region and view choices.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use vatcal_core::{Region, ViewMode};

/// User preferences at ~/.config/vatcal/preferences.toml
///
/// Values are kept as plain strings on disk; anything unknown falls back
/// to the default instead of failing the load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Preferences {
    pub region: Region,
    pub view: ViewMode,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    region: Option<String>,
    view: Option<String>,
}

impl From<StoredPreferences> for Preferences {
    fn from(stored: StoredPreferences) -> Self {
        Preferences {
            region: stored
                .region
                .and_then(|r| r.parse().ok())
                .unwrap_or_default(),
            view: stored.view.and_then(|v| v.parse().ok()).unwrap_or_default(),
        }
    }
}

impl Preferences {
    pub fn path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("vatcal");

        Ok(config_dir.join("preferences.toml"))
    }

    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        // A corrupt file is treated like an empty one
        let stored: StoredPreferences = toml::from_str(&contents).unwrap_or_default();

        Ok(stored.into())
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let stored = StoredPreferences {
            region: Some(self.region.id().to_string()),
            view: Some(self.view.id().to_string()),
        };
        let contents = toml::to_string(&stored).context("Failed to serialize preferences")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(())
    }
}
