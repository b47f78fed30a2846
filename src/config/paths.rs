//! Path management for Carteira
//!
//! ## Path Resolution Order
//!
//! 1. `CARTEIRA_DATA_DIR` environment variable (if set)
//! 2. The platform config directory from `directories`
//!    (`~/.config/carteira` on Linux, `%APPDATA%\carteira\config` on Windows)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::CarteiraError;

/// Environment variable overriding the base directory
pub const DATA_DIR_ENV: &str = "CARTEIRA_DATA_DIR";

/// Manages all paths used by Carteira
#[derive(Debug, Clone)]
pub struct CarteiraPaths {
    /// Base directory for all Carteira data
    base_dir: PathBuf,
}

impl CarteiraPaths {
    /// Create a new CarteiraPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined and the
    /// override variable is unset.
    pub fn new() -> Result<Self, CarteiraError> {
        let base_dir = match std::env::var(DATA_DIR_ENV) {
            Ok(custom) if !custom.trim().is_empty() => PathBuf::from(custom),
            _ => resolve_default_path()?,
        };

        Ok(Self { base_dir })
    }

    /// Create CarteiraPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the session cache (userId / userName)
    pub fn session_file(&self) -> PathBuf {
        self.base_dir.join("session.json")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), CarteiraError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| CarteiraError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if settings have been written before
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

fn resolve_default_path() -> Result<PathBuf, CarteiraError> {
    ProjectDirs::from("mz", "carteira", "carteira")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| CarteiraError::Config("Could not determine a home directory".into()))
}
