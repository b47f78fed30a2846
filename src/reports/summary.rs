//! Monthly summary, trends and analysis periods

use chrono::{Datelike, Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

use super::grouping::group_by_year_month;
use crate::api::records::{MonthlySummaryRecord, MonthlyTrendsRecord, RawAmount};
use crate::display::currency::CurrencyFormat;
use crate::display::report::{format_bar, month_abbrev, separator};
use crate::error::{CarteiraError, CarteiraResult};
use crate::models::{Money, Transaction};

fn amount_field(value: Option<&RawAmount>, field: &str) -> CarteiraResult<Money> {
    let amount = match value {
        None => Money::zero(),
        Some(raw) => raw
            .to_money()
            .map_err(|reason| CarteiraError::Validation(format!("{}: {}", field, reason)))?,
    };
    if amount.exceeds_record_limit() {
        return Err(CarteiraError::Validation(format!(
            "{}: above the per-record limit",
            field
        )));
    }
    Ok(amount)
}

/// Income and expense totals for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MonthlySummary {
    pub total_entries: Money,
    pub total_expenses: Money,
}

impl MonthlySummary {
    /// Build from the backend's summary payload; missing totals count as zero
    pub fn from_record(record: &MonthlySummaryRecord) -> CarteiraResult<Self> {
        Ok(Self {
            total_entries: amount_field(record.total_entries.as_ref(), "total_entries")?,
            total_expenses: amount_field(record.total_expenses.as_ref(), "total_expenses")?,
        })
    }

    /// Compute from transactions dated in `year` / `month` (1-based)
    pub fn for_month(transactions: &[Transaction], year: i32, month: u32) -> Self {
        let in_month = transactions
            .iter()
            .filter(|t| t.date.year() == year && t.date.month() == month);

        let mut summary = Self::default();
        for txn in in_month {
            if txn.is_income() {
                summary.total_entries += txn.amount;
            } else {
                summary.total_expenses += txn.amount;
            }
        }
        summary
    }

    /// Entries minus expenses
    pub fn balance(&self) -> Money {
        self.total_entries - self.total_expenses
    }

    pub fn format_terminal(&self, currency: &CurrencyFormat) -> String {
        let mut output = String::new();
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Entradas",
            currency.format_money(self.total_entries)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Gastos",
            currency.format_money(self.total_expenses)
        ));
        output.push_str(&separator(41));
        output.push('\n');
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Saldo",
            currency.format_money(self.balance())
        ));
        output
    }
}

/// One labelled month of the trend series
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub entries: Money,
    pub expenses: Money,
}

/// Income and expenses month by month, oldest first
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MonthlyTrends {
    pub points: Vec<TrendPoint>,
}

impl MonthlyTrends {
    /// Zip the backend's parallel series into points
    ///
    /// Series of unequal length are cut to the shortest.
    pub fn from_record(record: &MonthlyTrendsRecord) -> CarteiraResult<Self> {
        let len = record
            .labels
            .len()
            .min(record.entries.len())
            .min(record.expenses.len());

        if len != record.labels.len() || len != record.entries.len() || len != record.expenses.len()
        {
            warn!(
                labels = record.labels.len(),
                entries = record.entries.len(),
                expenses = record.expenses.len(),
                kept = len,
                "trend series differ in length; truncating to the shortest"
            );
        }

        let points = (0..len)
            .map(|i| {
                Ok(TrendPoint {
                    label: record.labels[i].clone(),
                    entries: amount_field(Some(&record.entries[i]), "entries")?,
                    expenses: amount_field(Some(&record.expenses[i]), "expenses")?,
                })
            })
            .collect::<CarteiraResult<Vec<_>>>()?;

        Ok(Self { points })
    }

    /// Compute the series from transactions, one point per month that has any
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        let entries = group_by_year_month(transactions.iter().filter(|t| t.is_income()));
        let expenses = group_by_year_month(transactions.iter().filter(|t| t.is_expense()));

        let months: BTreeSet<(i32, u32)> = entries
            .buckets()
            .chain(expenses.buckets())
            .map(|(year, month0, _)| (year, month0))
            .collect();

        let points = months
            .into_iter()
            .map(|(year, month0)| TrendPoint {
                label: format!("{} {}", month_abbrev(month0), year),
                entries: entries.get(year, month0).map_or(Money::zero(), |b| b.total),
                expenses: expenses.get(year, month0).map_or(Money::zero(), |b| b.total),
            })
            .collect();

        Self { points }
    }

    /// Keep only the most recent `n` points
    pub fn last(mut self, n: usize) -> Self {
        let excess = self.points.len().saturating_sub(n);
        self.points.drain(..excess);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn format_terminal(&self, currency: &CurrencyFormat) -> String {
        if self.is_empty() {
            return "Sem dados de tendência.\n".to_string();
        }

        let max = self
            .points
            .iter()
            .map(|p| p.entries.max(p.expenses).as_f64())
            .fold(0.0, f64::max);

        let mut output = String::new();
        output.push_str(&format!(
            "{:<10} {:>18} {:>18}  {}\n",
            "Mês", "Entradas", "Gastos", "Gastos/Entradas"
        ));
        output.push_str(&separator(72));
        output.push('\n');
        for point in &self.points {
            output.push_str(&format!(
                "{:<10} {:>18} {:>18}  {}\n",
                point.label,
                currency.format_money(point.entries),
                currency.format_money(point.expenses),
                format_bar(point.expenses.as_f64(), max, 12)
            ));
        }
        output
    }
}

/// Time window ending today used by the analysis views
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPeriod {
    Week,
    #[default]
    Month,
    Year,
}

impl AnalysisPeriod {
    /// First day inside the window
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        let start = match self {
            Self::Week => today.checked_sub_signed(Duration::days(7)),
            Self::Month => today.checked_sub_months(Months::new(1)),
            Self::Year => today.checked_sub_months(Months::new(12)),
        };
        start.map_or(NaiveDate::MIN, |d| d + Duration::days(1))
    }

    pub fn contains(&self, date: NaiveDate, today: NaiveDate) -> bool {
        date >= self.start(today) && date <= today
    }

    /// Transactions dated inside the window
    pub fn filter<'a>(&self, transactions: &'a [Transaction], today: NaiveDate) -> Vec<&'a Transaction> {
        transactions
            .iter()
            .filter(|t| self.contains(t.date, today))
            .collect()
    }
}

impl fmt::Display for AnalysisPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Week => write!(f, "week"),
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

impl FromStr for AnalysisPeriod {
    type Err = CarteiraError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "week" | "semana" => Ok(Self::Week),
            "month" | "mes" | "mês" => Ok(Self::Month),
            "year" | "ano" => Ok(Self::Year),
            other => Err(CarteiraError::Validation(format!(
                "Unknown analysis period: {}",
                other
            ))),
        }
    }
}
