//! Shared plumbing for the report commands
//!
//! Loading payloads, the strict-data gate, argument parsing helpers and the
//! one place that decides where and how a report is written.

use chrono::NaiveDate;
use clap::Args;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::api::{decode_batch, Converted, DataIssue, Record};
use crate::config::Settings;
use crate::error::{CarteiraError, CarteiraResult};
use crate::export::{write_csv_rows, write_json, write_yaml, ExportFormat, ReportExport};
use crate::storage::read_payload;

/// Output options shared by every report
#[derive(Args, Debug, Clone)]
pub struct OutputArgs {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: ExportFormat,

    /// Write to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}

impl Default for OutputArgs {
    fn default() -> Self {
        Self {
            format: ExportFormat::Table,
            output: None,
            pretty: false,
        }
    }
}

/// Decode a saved list payload, dropping and logging bad records
pub fn load_batch<R: Record>(source: &str) -> CarteiraResult<Converted<R::Model>> {
    decode_batch::<R>(source, read_payload(source)?)
}

/// Decode a saved single-object payload
pub fn load_object<T: DeserializeOwned>(source: &str) -> CarteiraResult<T> {
    let value = read_payload(source)?;
    serde_json::from_value(value).map_err(|e| {
        CarteiraError::Validation(format!("{} does not have the expected shape: {}", source, e))
    })
}

/// Fail when strict data checking is on and records were dropped
pub fn check_quality(settings: &Settings, issues: &[DataIssue]) -> CarteiraResult<()> {
    if settings.strict_data && !issues.is_empty() {
        return Err(CarteiraError::DataQuality(issues.len()));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` argument
pub fn parse_day(value: &str) -> CarteiraResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|_| {
        CarteiraError::Validation(format!("Invalid date format: {}. Use YYYY-MM-DD", value))
    })
}

/// Parse a `YYYY-MM` argument into (year, 1-based month)
pub fn parse_month(value: &str) -> CarteiraResult<(i32, u32)> {
    let invalid =
        || CarteiraError::Validation(format!("Invalid month format: {}. Use YYYY-MM", value));

    let (year, month) = value.trim().split_once('-').ok_or_else(invalid)?;
    let year: i32 = year.parse().map_err(|_| invalid())?;
    let month: u32 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok((year, month))
}

/// Today in local time
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// One report ready to be written in any format
pub struct Report<T, R> {
    pub name: &'static str,
    pub data: T,
    pub rows: Vec<R>,
    pub text: String,
    pub issues: Vec<DataIssue>,
}

impl<T: Serialize, R: Serialize> Report<T, R> {
    /// Write to the file in `out`, or stdout
    pub fn emit(self, out: &OutputArgs) -> CarteiraResult<()> {
        match &out.output {
            Some(path) => {
                let file = File::create(path).map_err(|e| {
                    CarteiraError::Export(format!(
                        "Failed to create file {}: {}",
                        path.display(),
                        e
                    ))
                })?;
                let mut writer = BufWriter::new(file);
                self.write_to(&mut writer, out)?;
                writer.flush()?;
                eprintln!("Relatório exportado para: {}", path.display());
                Ok(())
            }
            None => {
                let stdout = io::stdout();
                let mut writer = stdout.lock();
                self.write_to(&mut writer, out)
            }
        }
    }

    pub fn write_to<W: Write>(self, writer: &mut W, out: &OutputArgs) -> CarteiraResult<()> {
        match out.format {
            ExportFormat::Table => {
                writer.write_all(self.text.as_bytes())?;
                Ok(())
            }
            ExportFormat::Csv => write_csv_rows(writer, &self.rows),
            ExportFormat::Json => {
                let export = ReportExport::new(self.name, self.data).with_issues(self.issues);
                write_json(writer, &export, out.pretty)
            }
            ExportFormat::Yaml => {
                let export = ReportExport::new(self.name, self.data).with_issues(self.issues);
                write_yaml(writer, &export)
            }
        }
    }
}
