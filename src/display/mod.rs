//! Display formatting for terminal output
//!
//! Currency rendering plus the table and text views for each report.

pub mod budget;
pub mod currency;
pub mod goal;
pub mod report;
pub mod transaction;

pub use budget::{format_budget_table, BudgetRow, BudgetStatus};
pub use currency::{format_amount, format_money, CurrencyFormat};
pub use goal::{format_goal_table, GoalRow, GoalStatus};
pub use transaction::{entry_rows, format_entries, EntryMonthRow};
