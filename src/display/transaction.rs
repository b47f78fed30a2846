//! Transaction display formatting
//!
//! The income entries view: entries grouped by month, newest first.

use serde::Serialize;

use super::currency::CurrencyFormat;
use super::report::separator;
use crate::models::Transaction;
use crate::reports::statement::format_months;
use crate::reports::YearMonthGroup;

/// One CSV row per month of entries
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryMonthRow {
    pub year: i32,
    /// One-based month number
    pub month: u32,
    pub entries: usize,
    pub total: String,
}

/// Flatten grouped entries, newest month first
pub fn entry_rows(group: &YearMonthGroup<&Transaction>) -> Vec<EntryMonthRow> {
    group
        .newest_first()
        .map(|(year, month0, bucket)| EntryMonthRow {
            year,
            month: month0 + 1,
            entries: bucket.items.len(),
            total: bucket.total.to_decimal_string(),
        })
        .collect()
}

/// Format grouped entries for terminal display
pub fn format_entries(group: &YearMonthGroup<&Transaction>, currency: &CurrencyFormat) -> String {
    if group.is_empty() {
        return "Nenhuma entrada encontrada.\n".to_string();
    }

    let mut output = String::from("ENTRADAS\n");
    output.push_str(&format_months(group, currency, ""));
    output.push_str(&separator(52));
    output.push('\n');
    output.push_str(&format!(
        "{:<32} {:>19}\n",
        "TOTAL",
        currency.format_money(group.grand_total())
    ));
    output
}
