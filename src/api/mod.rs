//! REST boundary
//!
//! Wire record types for each backend endpoint, and their conversion into the
//! typed models. Nothing past this module sees raw JSON.

pub mod convert;
pub mod date;
pub mod records;

pub use convert::{decode_batch, Converted, DataIssue, Record};
pub use date::parse_record_date;
pub use records::{
    BudgetRecord, CategoryRecord, CategoryTotalRecord, GoalRecord, LoginResponse,
    MonthlySummaryRecord, MonthlyTrendsRecord, RawAmount, TransactionRecord, UserRecord,
};
