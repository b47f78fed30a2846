//! YAML export

use serde::Serialize;
use std::io::Write;

use super::json::ReportExport;
use crate::error::{CarteiraError, CarteiraResult};

/// Write a report envelope as YAML with a short header comment
pub fn write_yaml<W: Write, T: Serialize>(
    writer: &mut W,
    export: &ReportExport<T>,
) -> CarteiraResult<()> {
    writeln!(writer, "# Carteira {} report", export.report)
        .map_err(|e| CarteiraError::Export(e.to_string()))?;
    writeln!(writer, "# Generated: {}", export.exported_at)
        .map_err(|e| CarteiraError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, export).map_err(|e| CarteiraError::Export(e.to_string()))?;

    Ok(())
}
