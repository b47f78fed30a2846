//! Statement (extrato) views
//!
//! Expenses partitioned by category and then grouped by month, and income
//! entries grouped by month. Both build on `group_by_year_month`.

use serde::Serialize;
use std::collections::HashSet;

use super::grouping::{group_by_year_month, YearMonthGroup};
use crate::display::currency::CurrencyFormat;
use crate::display::report::{month_name, separator, truncate};
use crate::models::{Category, CategoryId, Money, Transaction};

/// One category's expenses grouped by month
#[derive(Debug, Clone, Serialize)]
pub struct CategoryLedger<'a> {
    pub category_id: CategoryId,
    pub category_name: String,
    pub months: YearMonthGroup<&'a Transaction>,
}

impl CategoryLedger<'_> {
    pub fn total(&self) -> Money {
        self.months.grand_total()
    }
}

/// Expenses by category, then year, then month
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStatement<'a> {
    /// Ledgers in the order of the category list; empty categories are omitted
    pub ledgers: Vec<CategoryLedger<'a>>,
    /// Expenses with no category or a category missing from the list
    pub uncategorized: usize,
}

/// A flat statement row, for CSV export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatementRow {
    pub category: String,
    pub year: i32,
    /// One-based month number
    pub month: u32,
    pub transactions: usize,
    /// Total in major units with two decimals
    pub total: String,
}

/// Partition expenses by category, then group each partition by month
///
/// Income transactions are ignored. Categories appear in list order and only
/// when they have at least one expense.
pub fn group_by_category<'a>(
    transactions: &'a [Transaction],
    categories: &[Category],
) -> CategoryStatement<'a> {
    let expenses: Vec<&Transaction> = transactions.iter().filter(|t| t.is_expense()).collect();

    let ledgers: Vec<CategoryLedger<'a>> = categories
        .iter()
        .filter_map(|category| {
            let months = group_by_year_month(
                expenses
                    .iter()
                    .copied()
                    .filter(|t| t.category_id == Some(category.id)),
            );
            if months.is_empty() {
                return None;
            }
            Some(CategoryLedger {
                category_id: category.id,
                category_name: category.name.clone(),
                months,
            })
        })
        .collect();

    let known: HashSet<CategoryId> = categories.iter().map(|c| c.id).collect();
    let uncategorized = expenses
        .iter()
        .filter(|t| t.category_id.map_or(true, |id| !known.contains(&id)))
        .count();

    CategoryStatement {
        ledgers,
        uncategorized,
    }
}

/// Group income entries by year and month
pub fn group_entries(transactions: &[Transaction]) -> YearMonthGroup<&Transaction> {
    group_by_year_month(transactions.iter().filter(|t| t.is_income()))
}

impl<'a> CategoryStatement<'a> {
    /// Ledger for a category name
    pub fn ledger(&self, name: &str) -> Option<&CategoryLedger<'a>> {
        self.ledgers.iter().find(|l| l.category_name == name)
    }

    /// Total across every ledger
    pub fn total(&self) -> Money {
        self.ledgers.iter().map(|l| l.total()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.ledgers.is_empty()
    }

    /// Flatten to one row per (category, year, month), newest month first
    pub fn rows(&self) -> Vec<StatementRow> {
        self.ledgers
            .iter()
            .flat_map(|ledger| {
                ledger
                    .months
                    .newest_first()
                    .map(move |(year, month0, bucket)| StatementRow {
                        category: ledger.category_name.clone(),
                        year,
                        month: month0 + 1,
                        transactions: bucket.items.len(),
                        total: bucket.total.to_decimal_string(),
                    })
            })
            .collect()
    }

    /// Format the statement for terminal display
    pub fn format_terminal(&self, currency: &CurrencyFormat) -> String {
        if self.is_empty() {
            return "Nenhuma transação encontrada.\n".to_string();
        }

        let mut output = String::new();
        for ledger in &self.ledgers {
            output.push_str(&format!(
                "{} ({})\n",
                ledger.category_name.to_uppercase(),
                currency.format_money(ledger.total())
            ));
            output.push_str(&format_months(&ledger.months, currency, "  "));
            output.push('\n');
        }

        output.push_str(&separator(60));
        output.push('\n');
        output.push_str(&format!(
            "{:<40} {:>19}\n",
            "TOTAL",
            currency.format_money(self.total())
        ));
        if self.uncategorized > 0 {
            output.push_str(&format!(
                "{} transação(ões) sem categoria\n",
                self.uncategorized
            ));
        }

        output
    }
}

/// Render month buckets newest first, each with its transactions
pub fn format_months(
    group: &YearMonthGroup<&Transaction>,
    currency: &CurrencyFormat,
    indent: &str,
) -> String {
    let mut output = String::new();
    let mut current_year = None;

    for (year, month0, bucket) in group.newest_first() {
        if current_year != Some(year) {
            output.push_str(&format!("{}{}\n", indent, year));
            current_year = Some(year);
        }
        output.push_str(&format!(
            "{}  {:<28} {:>18}\n",
            indent,
            month_name(month0),
            currency.format_money(bucket.total)
        ));
        for txn in &bucket.items {
            let label = txn.description.as_deref().unwrap_or("");
            output.push_str(&format!(
                "{}    {}  {:<16} {:>18}\n",
                indent,
                txn.date.format("%d/%m/%Y"),
                truncate(label, 16),
                currency.format_money(txn.amount)
            ));
        }
    }

    output
}
