//! Aggregation over typed records
//!
//! Pure functions from models to the views the CLI renders: month grouping,
//! category statements, budget and goal progress, top-N ranking, summaries
//! and trends. Nothing here performs I/O.

pub mod grouping;
pub mod progress;
pub mod ranking;
pub mod statement;
pub mod summary;

pub use grouping::{group_by_year_month, group_by_year_month_with, Dated, MonthBucket, YearMonthGroup};
pub use progress::{
    percent, remaining_days, BudgetBalance, BudgetProgress, BudgetTier, GoalProgress, GoalTier,
    TierTable, BUDGET_TIERS, GOAL_TIERS,
};
pub use ranking::{category_totals, top_n, CategoryTotal, RankedCategory};
pub use statement::{group_by_category, group_entries, CategoryLedger, CategoryStatement, StatementRow};
pub use summary::{AnalysisPeriod, MonthlySummary, MonthlyTrends, TrendPoint};
