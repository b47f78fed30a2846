//! Custom error types for Carteira
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The aggregation functions in `reports`
//! never return these: they degrade to empty or zero results instead.

use thiserror::Error;

/// The main error type for Carteira operations
#[derive(Error, Debug)]
pub enum CarteiraError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// CSV writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Session cache errors
    #[error("Session error: {0}")]
    Session(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Records were dropped while strict data checking was on
    #[error("{0} record(s) failed validation")]
    DataQuality(usize),
}

impl CarteiraError {
    /// Create a "not found" error for a payload file
    pub fn file_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "File",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for CarteiraError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for CarteiraError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for CarteiraError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

impl From<csv::Error> for CarteiraError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for Carteira operations
pub type CarteiraResult<T> = Result<T, CarteiraError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CarteiraError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = CarteiraError::file_not_found("transacoes.json");
        assert_eq!(err.to_string(), "File not found: transacoes.json");
        assert!(err.is_not_found());
        assert!(!err.is_validation());
    }

    #[test]
    fn test_data_quality_error() {
        let err = CarteiraError::DataQuality(3);
        assert_eq!(err.to_string(), "3 record(s) failed validation");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CarteiraError = io_err.into();
        assert!(matches!(err, CarteiraError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CarteiraError = json_err.into();
        assert!(matches!(err, CarteiraError::Json(_)));
    }
}
