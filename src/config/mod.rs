//! Configuration module for Carteira
//!
//! This module provides configuration management including:
//! - Platform-aware path resolution
//! - User settings persistence
//! - Locale and currency preferences

pub mod paths;
pub mod settings;

pub use paths::CarteiraPaths;
pub use settings::Settings;
