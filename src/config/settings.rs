//! User settings for Carteira
//!
//! Manages user preferences: display locale and currency, how many
//! categories the ranking shows, log verbosity and strict data checking.

use serde::{Deserialize, Serialize};

use super::paths::CarteiraPaths;
use crate::display::currency::CurrencyFormat;
use crate::error::CarteiraError;

/// User settings for Carteira
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// BCP 47 locale used for money formatting
    #[serde(default = "default_locale")]
    pub locale: String,

    /// ISO 4217 currency code
    #[serde(default = "default_currency")]
    pub currency: String,

    /// Number of categories shown by the ranking report
    #[serde(default = "default_top_categories")]
    pub top_categories: usize,

    /// Fallback log filter when `CARTEIRA_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Fail reports that had to drop malformed records
    #[serde(default)]
    pub strict_data: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_locale() -> String {
    "pt-MZ".to_string()
}

fn default_currency() -> String {
    "MZN".to_string()
}

fn default_top_categories() -> usize {
    5
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            locale: default_locale(),
            currency: default_currency(),
            top_categories: default_top_categories(),
            log_level: default_log_level(),
            strict_data: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &CarteiraPaths) -> Result<Self, CarteiraError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                CarteiraError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                CarteiraError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &CarteiraPaths) -> Result<(), CarteiraError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            CarteiraError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents).map_err(|e| {
            CarteiraError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }

    /// Resolve the configured locale/currency pair into a formatter
    pub fn currency_format(&self) -> Result<CurrencyFormat, CarteiraError> {
        CurrencyFormat::for_locale(&self.locale, &self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.locale, "pt-MZ");
        assert_eq!(settings.currency, "MZN");
        assert_eq!(settings.top_categories, 5);
        assert!(!settings.strict_data);
        assert!(settings.currency_format().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CarteiraPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.top_categories = 3;
        settings.strict_data = true;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.top_categories, 3);
        assert!(loaded.strict_data);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = CarteiraPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency": "EUR", "locale": "pt-PT"}"#)
            .unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency, "EUR");
        assert_eq!(loaded.top_categories, 5);
        assert_eq!(loaded.log_level, "warn");
    }

    #[test]
    fn test_unknown_currency_is_config_error() {
        let settings = Settings {
            currency: "XYZ".into(),
            ..Settings::default()
        };
        assert!(matches!(
            settings.currency_format(),
            Err(CarteiraError::Config(_))
        ));
    }
}
