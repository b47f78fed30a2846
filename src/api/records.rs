//! Wire records, one per backend endpoint
//!
//! These mirror the JSON the backend returns. Amounts may arrive as numbers
//! or as decimal strings (MySQL `DECIMAL` columns serialize as strings), and
//! dates stay raw strings until `api::convert` validates them.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetId, CategoryId, GoalId, Money, TransactionId, UserId};

/// An amount as the backend sends it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

impl RawAmount {
    /// Convert to an exact amount, describing the problem on failure
    pub fn to_money(&self) -> Result<Money, String> {
        match self {
            Self::Number(value) => {
                Money::from_f64(*value).ok_or_else(|| format!("not a finite number: {}", value))
            }
            Self::Text(text) => Money::parse(text).map_err(|e| e.to_string()),
        }
    }
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

/// `GET /transacoes` (expenses), `GET /entries/current-month` (entries)
///
/// Expenses carry `expense_date`, entries carry `entry_date`; generic
/// transaction payloads carry `date` plus an explicit `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub id: TransactionId,
    pub amount: RawAmount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expense_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_date: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `GET /categories`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryRecord {
    pub id: CategoryId,
    #[serde(default)]
    pub name: String,
}

/// `GET /budgets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetRecord {
    pub id: BudgetId,
    pub category_id: CategoryId,
    pub amount: RawAmount,
    /// Absent or null when nothing was spent yet
    #[serde(default)]
    pub spent: Option<RawAmount>,
    #[serde(default)]
    pub category_name: Option<String>,
}

/// `GET /financial-goals`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoalRecord {
    pub id: GoalId,
    #[serde(default)]
    pub title: String,
    pub target_amount: RawAmount,
    #[serde(default)]
    pub current_amount: Option<RawAmount>,
    #[serde(default)]
    pub target_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// `GET /monthly-summary`
///
/// SQL `SUM` over no rows yields null, so both totals are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlySummaryRecord {
    #[serde(default)]
    pub total_entries: Option<RawAmount>,
    #[serde(default)]
    pub total_expenses: Option<RawAmount>,
}

/// One row of `GET /expenses-by-category`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotalRecord {
    pub category_name: String,
    pub total_amount: RawAmount,
}

/// `GET /monthly-trends`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MonthlyTrendsRecord {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub entries: Vec<RawAmount>,
    #[serde(default)]
    pub expenses: Vec<RawAmount>,
}

/// The user object inside login/register responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: UserId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// `POST /login` and `POST /register`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub user: UserRecord,
}
