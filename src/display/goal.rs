//! Goal display formatting

use chrono::NaiveDate;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use super::currency::CurrencyFormat;
use super::report::{format_bar, format_percent, truncate};
use crate::models::FinancialGoal;
use crate::reports::GoalProgress;

/// A goal together with its progress as of a given day
#[derive(Debug, Clone, Serialize)]
pub struct GoalStatus<'a> {
    #[serde(flatten)]
    pub goal: &'a FinancialGoal,
    pub progress: GoalProgress,
}

impl<'a> GoalStatus<'a> {
    pub fn new(goal: &'a FinancialGoal, today: NaiveDate) -> Self {
        Self {
            goal,
            progress: GoalProgress::of(goal, today),
        }
    }
}

#[derive(Debug, Clone, Serialize, Tabled)]
pub struct GoalRow {
    #[tabled(rename = "Meta")]
    pub title: String,
    #[tabled(rename = "Alvo")]
    pub target: String,
    #[tabled(rename = "Atual")]
    pub current: String,
    #[tabled(rename = "Falta")]
    pub remaining: String,
    #[tabled(rename = "Prazo")]
    pub target_date: String,
    #[tabled(rename = "Dias")]
    pub remaining_days: i64,
    #[tabled(rename = "Progresso")]
    pub progress: String,
    #[tabled(rename = "Estado")]
    pub tier: String,
}

impl GoalRow {
    pub fn from_status(status: &GoalStatus<'_>, currency: &CurrencyFormat) -> Self {
        let pct = status.progress.percent;
        Self {
            title: truncate(&status.goal.title, 24),
            target: currency.format_money(status.goal.target_amount),
            current: currency.format_money(status.goal.current_amount),
            remaining: currency.format_money(status.progress.remaining_amount),
            target_date: status.goal.target_date.format("%d/%m/%Y").to_string(),
            remaining_days: status.progress.remaining_days,
            progress: format!("{} {}", format_bar(pct as f64, 100.0, 10), format_percent(pct)),
            tier: status.progress.tier.to_string(),
        }
    }
}

/// Goals as a rounded terminal table
pub fn format_goal_table(statuses: &[GoalStatus<'_>], currency: &CurrencyFormat) -> String {
    if statuses.is_empty() {
        return "Nenhuma meta encontrada.\n".to_string();
    }

    let rows: Vec<GoalRow> = statuses
        .iter()
        .map(|s| GoalRow::from_status(s, currency))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GoalId, Money};

    #[test]
    fn test_goal_row() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let goal = FinancialGoal::new(
            GoalId::new(3),
            "Viagem a Inhambane",
            Money::from_cents(1_000_000),
            Money::from_cents(600_000),
            NaiveDate::from_ymd_opt(2024, 7, 1).unwrap(),
        );
        let status = GoalStatus::new(&goal, today);
        let row = GoalRow::from_status(&status, &CurrencyFormat::default());

        assert_eq!(row.remaining_days, 30);
        assert_eq!(row.tier, "in-progress");
        assert_eq!(row.remaining, "4000,00\u{a0}MTn");
        assert!(row.progress.ends_with("60%"));
        assert_eq!(row.target_date, "01/07/2024");

        let output = format_goal_table(&[status], &CurrencyFormat::default());
        assert!(output.contains("Viagem a Inhambane"));
    }

    #[test]
    fn test_empty_goal_table() {
        assert_eq!(
            format_goal_table(&[], &CurrencyFormat::default()),
            "Nenhuma meta encontrada.\n"
        );
    }
}
