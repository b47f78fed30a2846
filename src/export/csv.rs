//! CSV export
//!
//! Writes flat row types with a header line taken from their field names.

use serde::Serialize;
use std::io::Write;

use crate::error::CarteiraResult;

/// Write serializable rows as CSV
///
/// An empty slice writes nothing, not even a header.
pub fn write_csv_rows<W: Write, R: Serialize>(writer: W, rows: &[R]) -> CarteiraResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for row in rows {
        csv_writer.serialize(row)?;
    }
    csv_writer.flush()?;
    Ok(())
}
