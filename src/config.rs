//! User settings
//!
//! Stored as JSON in the user's config directory:
//! - Linux: ~/.config/image-to-base64/settings.json
//! - macOS: ~/Library/Application Support/image-to-base64/settings.json
//! - Windows: %APPDATA%\image-to-base64\settings.json

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::ingest::encode::DEFAULT_MAX_CONCURRENT_ENCODES;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to access settings file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Settings that shape the pipeline and the download dialog
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// How many files are read and encoded at the same time
    pub max_concurrent_encodes: usize,
    /// Starting folder for the save dialog (system downloads folder if unset)
    pub download_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_concurrent_encodes: DEFAULT_MAX_CONCURRENT_ENCODES,
            download_dir: None,
        }
    }
}

impl Settings {
    /// Get the path where settings are stored
    pub fn settings_path() -> Option<PathBuf> {
        let mut path = dirs::config_dir().or_else(dirs::home_dir)?;
        path.push("image-to-base64");
        path.push("settings.json");
        Some(path)
    }

    /// Load settings from the default location, falling back to defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            tracing::warn!("Could not determine config directory, using default settings");
            return Self::default();
        };

        Self::load_or_init(&path)
    }

    /// Load settings from `path`, writing the defaults there on first run
    /// so users have a file to edit.
    pub fn load_or_init(path: &Path) -> Self {
        if !path.exists() {
            let settings = Self::default();
            match settings.save_to(path) {
                Ok(()) => tracing::info!("Wrote default settings to {}", path.display()),
                Err(e) => tracing::warn!("{}", e),
            }
            return settings;
        }

        match Self::load_from(path) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!("{}; using default settings", e);
                Self::default()
            }
        }
    }

    /// Load settings from `path`. A missing file gives the defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::from_json(&json).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Write settings to `path`, creating parent directories
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let io_err = |source: std::io::Error| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        std::fs::write(path, json).map_err(io_err)
    }

    /// Parse from a JSON string
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Concurrency limit, never below one
    pub fn encode_limit(&self) -> usize {
        self.max_concurrent_encodes.max(1)
    }

    /// Folder the save dialog opens in
    pub fn download_dir(&self) -> Option<PathBuf> {
        self.download_dir.clone().or_else(dirs::download_dir)
    }
}
