//! JSON export
//!
//! Every structured export wraps the report view in an envelope carrying the
//! schema version and any records dropped while decoding the input.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::api::DataIssue;
use crate::error::{CarteiraError, CarteiraResult};

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A report view with provenance
#[derive(Debug, Clone, Serialize)]
pub struct ReportExport<T> {
    /// Schema version for compatibility checking
    pub schema_version: String,

    /// Export timestamp
    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    /// Which report this is ("statement", "budgets", ...)
    pub report: String,

    pub data: T,

    /// Input records left out of the report
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub issues: Vec<DataIssue>,
}

impl<T: Serialize> ReportExport<T> {
    pub fn new(report: impl Into<String>, data: T) -> Self {
        Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            report: report.into(),
            data,
            issues: Vec::new(),
        }
    }

    pub fn with_issues(mut self, issues: Vec<DataIssue>) -> Self {
        self.issues = issues;
        self
    }
}

/// Write a value as JSON
pub fn write_json<W: Write, T: Serialize>(
    writer: &mut W,
    value: &T,
    pretty: bool,
) -> CarteiraResult<()> {
    let result = if pretty {
        serde_json::to_writer_pretty(&mut *writer, value)
    } else {
        serde_json::to_writer(&mut *writer, value)
    };
    result.map_err(|e| CarteiraError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| CarteiraError::Export(e.to_string()))?;
    Ok(())
}
