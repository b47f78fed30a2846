//! Core data models for Carteira
//!
//! Typed entities the aggregation layer works on. They are produced from the
//! backend's payloads by `api::convert` and never mutated afterwards.

pub mod budget;
pub mod category;
pub mod goal;
pub mod ids;
pub mod money;
pub mod session;
pub mod transaction;

pub use budget::Budget;
pub use category::Category;
pub use goal::FinancialGoal;
pub use ids::{BudgetId, CategoryId, GoalId, TransactionId, UserId};
pub use money::Money;
pub use session::{Route, Session};
pub use transaction::{Transaction, TransactionKind};
