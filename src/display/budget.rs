//! Budget display formatting
//!
//! Budget cards as a terminal table, plus the flat and structured row types
//! the exporters write.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::currency::CurrencyFormat;
use super::report::{format_percent, truncate};
use crate::models::category::find_category;
use crate::models::{Budget, Category};
use crate::reports::{BudgetBalance, BudgetProgress};

/// A budget together with its derived progress
#[derive(Debug, Clone, Serialize)]
pub struct BudgetStatus<'a> {
    #[serde(flatten)]
    pub budget: &'a Budget,
    pub category: String,
    pub progress: BudgetProgress,
}

impl<'a> BudgetStatus<'a> {
    /// Derive progress and resolve the category label
    ///
    /// The backend-joined name wins; otherwise the category list is
    /// consulted, and the id is the last resort.
    pub fn new(budget: &'a Budget, categories: &[Category]) -> Self {
        let category = budget
            .category_name
            .clone()
            .or_else(|| find_category(categories, budget.category_id).map(|c| c.name.clone()))
            .unwrap_or_else(|| budget.category_id.to_string());

        Self {
            budget,
            category,
            progress: BudgetProgress::of(budget),
        }
    }
}

/// One table or CSV row per budget
#[derive(Debug, Clone, Serialize, Tabled)]
pub struct BudgetRow {
    #[tabled(rename = "Categoria")]
    pub category: String,
    #[tabled(rename = "Orçamento")]
    pub amount: String,
    #[tabled(rename = "Gasto")]
    pub spent: String,
    #[tabled(rename = "Saldo")]
    pub balance: String,
    #[tabled(rename = "%")]
    pub percent: String,
    #[tabled(rename = "Estado")]
    pub tier: String,
    #[tabled(rename = "Cor")]
    pub color: String,
}

impl BudgetRow {
    pub fn from_status(status: &BudgetStatus<'_>, currency: &CurrencyFormat) -> Self {
        let balance = match status.progress.balance {
            BudgetBalance::Remaining(left) => format!("resta {}", currency.format_money(left)),
            BudgetBalance::Exceeded(over) => format!("excedido {}", currency.format_money(over)),
        };

        Self {
            category: truncate(&status.category, 24),
            amount: currency.format_money(status.budget.amount),
            spent: currency.format_money(status.budget.spent),
            balance,
            percent: format_percent(status.progress.percent),
            tier: status.progress.tier.to_string(),
            color: status.progress.tier.hex_color().to_string(),
        }
    }
}

/// Budgets as a rounded terminal table
pub fn format_budget_table(statuses: &[BudgetStatus<'_>], currency: &CurrencyFormat) -> String {
    if statuses.is_empty() {
        return "Nenhum orçamento encontrado.\n".to_string();
    }

    let rows: Vec<BudgetRow> = statuses
        .iter()
        .map(|s| BudgetRow::from_status(s, currency))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}
