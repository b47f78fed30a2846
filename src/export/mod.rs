//! Export module for Carteira
//!
//! Report views serialize to any of:
//! - JSON: a versioned envelope around the view, for scripts
//! - YAML: the same envelope, human-readable
//! - CSV: flat rows, spreadsheet-compatible

pub mod csv;
pub mod json;
pub mod yaml;

use clap::ValueEnum;
use std::fmt;

pub use self::csv::write_csv_rows;
pub use json::{write_json, ReportExport, EXPORT_SCHEMA_VERSION};
pub use yaml::write_yaml;

/// Output format for report commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ExportFormat {
    /// Formatted terminal output
    #[default]
    Table,
    /// JSON envelope
    Json,
    /// YAML envelope
    Yaml,
    /// Flat CSV rows
    Csv,
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}
