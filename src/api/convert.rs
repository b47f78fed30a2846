//! Validation of wire records into typed entities
//!
//! A payload is decoded record by record. A record that does not decode or
//! does not validate is dropped and reported as a `DataIssue`; the rest of the
//! batch still converts.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use tracing::{debug, warn};

use super::date::parse_record_date;
use super::records::{
    BudgetRecord, CategoryRecord, CategoryTotalRecord, GoalRecord, LoginResponse, RawAmount,
    TransactionRecord,
};
use crate::error::{CarteiraError, CarteiraResult};
use crate::models::budget::BudgetValidationError;
use crate::models::category::CategoryValidationError;
use crate::models::goal::GoalValidationError;
use crate::models::transaction::TransactionValidationError;
use crate::models::{
    Budget, Category, FinancialGoal, Money, Session, Transaction, TransactionKind,
};
use crate::reports::ranking::CategoryTotal;

/// A record that was dropped at the boundary
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DataIssue {
    /// Payload the record came from (a path, or `-` for stdin)
    pub source: String,
    /// Position of the record in its payload
    pub index: usize,
    /// Raw record id, when it could be read
    pub id: Option<String>,
    /// Offending field
    pub field: String,
    pub reason: String,
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} record #{}", self.source, self.index)?;
        if let Some(id) = &self.id {
            write!(f, " (id {})", id)?;
        }
        write!(f, ": {}: {}", self.field, self.reason)
    }
}

/// A field-level rejection produced by `Record::into_model`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub reason: String,
}

impl FieldError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

macro_rules! field_error_from {
    ($($error:ty),* $(,)?) => {
        $(
            impl From<$error> for FieldError {
                fn from(e: $error) -> Self {
                    FieldError::new(e.field(), e.to_string())
                }
            }
        )*
    };
}

field_error_from!(
    TransactionValidationError,
    CategoryValidationError,
    BudgetValidationError,
    GoalValidationError,
);

/// The valid part of a batch plus what was dropped
#[derive(Debug, Clone)]
pub struct Converted<T> {
    pub items: Vec<T>,
    pub issues: Vec<DataIssue>,
}

impl<T> Converted<T> {
    /// True when nothing was dropped
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

impl<T> Default for Converted<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            issues: Vec::new(),
        }
    }
}

/// A wire record that converts into a typed entity
pub trait Record: DeserializeOwned {
    type Model;

    /// Validate and convert
    fn into_model(self) -> Result<Self::Model, FieldError>;
}

/// Decode a JSON array payload record by record
///
/// `source` names the payload in issue reports. Fails only when the payload
/// itself is not an array.
pub fn decode_batch<R: Record>(source: &str, payload: Value) -> CarteiraResult<Converted<R::Model>> {
    let values = match payload {
        Value::Array(values) => values,
        other => {
            return Err(CarteiraError::Validation(format!(
                "{}: expected a JSON array of records, got {}",
                source,
                json_kind(&other)
            )))
        }
    };

    let mut converted = Converted::default();
    for (index, value) in values.into_iter().enumerate() {
        let id = record_id(&value);
        let result = serde_json::from_value::<R>(value)
            .map_err(|e| FieldError::new("record", e.to_string()))
            .and_then(R::into_model);

        match result {
            Ok(model) => converted.items.push(model),
            Err(e) => {
                let issue = DataIssue {
                    source: source.to_string(),
                    index,
                    id,
                    field: e.field.to_string(),
                    reason: e.reason,
                };
                warn!(%issue, "dropping record");
                converted.issues.push(issue);
            }
        }
    }

    debug!(
        source,
        kept = converted.items.len(),
        dropped = converted.issues.len(),
        "decoded payload"
    );
    Ok(converted)
}

/// The raw `id` of a record, as sent
fn record_id(value: &Value) -> Option<String> {
    match value.get("id")? {
        Value::Number(n) => Some(n.to_string()),
        Value::String(s) => Some(s.clone()),
        _ => None,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

fn amount(field: &'static str, raw: &RawAmount) -> Result<Money, FieldError> {
    raw.to_money().map_err(|e| FieldError::new(field, e))
}

/// A missing amount counts as zero
fn optional_amount(field: &'static str, raw: Option<&RawAmount>) -> Result<Money, FieldError> {
    raw.map_or(Ok(Money::zero()), |raw| amount(field, raw))
}

fn required_date(
    field: &'static str,
    raw: Option<&str>,
) -> Result<chrono::NaiveDate, FieldError> {
    let raw = raw.ok_or_else(|| FieldError::new(field, "missing"))?;
    parse_record_date(raw).ok_or_else(|| FieldError::new(field, format!("unparseable date '{}'", raw)))
}

impl Record for TransactionRecord {
    type Model = Transaction;

    fn into_model(self) -> Result<Transaction, FieldError> {
        let amount = amount("amount", &self.amount)?;

        let (field, raw_date) = if self.date.is_some() {
            ("date", self.date.as_deref())
        } else if self.expense_date.is_some() {
            ("expense_date", self.expense_date.as_deref())
        } else {
            ("entry_date", self.entry_date.as_deref())
        };
        let date = required_date(field, raw_date)?;

        let kind = match self.kind.as_deref() {
            Some(raw) => raw
                .parse::<TransactionKind>()
                .map_err(|e| FieldError::new("type", e))?,
            None if self.expense_date.is_some() => TransactionKind::Expense,
            None if self.entry_date.is_some() => TransactionKind::Income,
            None => return Err(FieldError::new("type", "missing")),
        };

        let transaction = Transaction {
            id: self.id,
            amount,
            date,
            kind,
            category_id: self.category_id,
            description: self.description.filter(|d| !d.trim().is_empty()),
        };
        transaction.validate()?;
        Ok(transaction)
    }
}

impl Record for CategoryRecord {
    type Model = Category;

    fn into_model(self) -> Result<Category, FieldError> {
        let category = Category::new(self.id, self.name.trim());
        category.validate()?;
        Ok(category)
    }
}

impl Record for BudgetRecord {
    type Model = Budget;

    fn into_model(self) -> Result<Budget, FieldError> {
        let amount = amount("amount", &self.amount)?;
        let spent = optional_amount("spent", self.spent.as_ref())?;

        let mut budget = Budget::new(self.id, self.category_id, amount, spent);
        budget.category_name = self.category_name.filter(|n| !n.trim().is_empty());
        budget.validate()?;
        Ok(budget)
    }
}

impl Record for GoalRecord {
    type Model = FinancialGoal;

    fn into_model(self) -> Result<FinancialGoal, FieldError> {
        let target_amount = amount("target_amount", &self.target_amount)?;
        let current_amount = optional_amount("current_amount", self.current_amount.as_ref())?;
        let target_date = required_date("target_date", self.target_date.as_deref())?;

        let mut goal = FinancialGoal::new(
            self.id,
            self.title.trim(),
            target_amount,
            current_amount,
            target_date,
        );
        goal.description = self.description.filter(|d| !d.trim().is_empty());
        goal.validate()?;
        Ok(goal)
    }
}

impl Record for CategoryTotalRecord {
    type Model = CategoryTotal;

    fn into_model(self) -> Result<CategoryTotal, FieldError> {
        if self.category_name.trim().is_empty() {
            return Err(FieldError::new("category_name", "cannot be empty"));
        }
        let total = amount("total_amount", &self.total_amount)?;
        if total.is_negative() {
            return Err(FieldError::new("total_amount", "cannot be negative"));
        }
        if total.exceeds_record_limit() {
            return Err(FieldError::new("total_amount", "above the per-record limit"));
        }
        Ok(CategoryTotal::new(self.category_name.trim(), total))
    }
}

impl From<LoginResponse> for Session {
    fn from(response: LoginResponse) -> Self {
        Session::new(response.user.id, response.user.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryId, TransactionId};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_expenses_and_entries_infer_kind() {
        let payload = json!([
            {"id": 1, "amount": 100, "expense_date": "2024-01-05", "category_id": 3},
            {"id": 2, "amount": "2500.00", "entry_date": "2024-01-01T00:00:00.000Z"},
            {"id": 3, "amount": 40, "date": "2024-01-07", "type": "gasto"}
        ]);

        let converted = decode_batch::<TransactionRecord>("transacoes.json", payload).unwrap();
        assert!(converted.is_clean());
        assert_eq!(converted.items.len(), 3);

        let expense = &converted.items[0];
        assert_eq!(expense.kind, TransactionKind::Expense);
        assert_eq!(expense.category_id, Some(CategoryId::new(3)));
        assert_eq!(expense.date, NaiveDate::from_ymd_opt(2024, 1, 5).unwrap());

        assert_eq!(converted.items[1].kind, TransactionKind::Income);
        assert_eq!(converted.items[1].amount, Money::from_cents(250000));
        assert_eq!(converted.items[2].kind, TransactionKind::Expense);
    }

    #[test]
    fn test_bad_records_are_reported_not_fatal() {
        let payload = json!([
            {"id": 1, "amount": 100, "expense_date": "not a date"},
            {"id": 2, "amount": 0, "expense_date": "2024-01-05"},
            {"id": 3, "amount": 10, "date": "2024-01-05"},
            {"id": "x", "amount": 10},
            {"id": 5, "amount": 10, "expense_date": "2024-01-05"}
        ]);

        let converted = decode_batch::<TransactionRecord>("transacoes.json", payload).unwrap();
        assert_eq!(converted.items.len(), 1);
        assert_eq!(converted.items[0].id, TransactionId::new(5));

        let fields: Vec<_> = converted.issues.iter().map(|i| i.field.as_str()).collect();
        assert_eq!(fields, vec!["expense_date", "amount", "type", "record"]);
        assert_eq!(converted.issues[0].index, 0);
        assert_eq!(converted.issues[0].source, "transacoes.json");
        assert_eq!(converted.issues[0].id.as_deref(), Some("1"));
        assert_eq!(converted.issues[3].id.as_deref(), Some("x"));
        assert_eq!(
            converted.issues[1].to_string(),
            "transacoes.json record #1 (id 2): amount: Amount must be greater than zero, got 0"
        );
    }

    #[test]
    fn test_non_array_payload_is_an_error() {
        let err = decode_batch::<CategoryRecord>("categories.json", json!({"error": "unauthorized"})).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_payload() {
        let converted = decode_batch::<TransactionRecord>("-", json!([])).unwrap();
        assert!(converted.items.is_empty());
        assert!(converted.is_clean());
    }

    #[test]
    fn test_category_names_are_required() {
        let payload = json!([{"id": 1, "name": " Renda "}, {"id": 2, "name": ""}, {"id": 3}]);
        let converted = decode_batch::<CategoryRecord>("categories.json", payload).unwrap();
        assert_eq!(converted.items.len(), 1);
        assert_eq!(converted.items[0].name, "Renda");
        assert_eq!(converted.issues.len(), 2);
    }

    #[test]
    fn test_budget_spent_defaults_to_zero() {
        let payload = json!([
            {"id": 1, "category_id": 2, "amount": "1000.00", "spent": null},
            {"id": 2, "category_id": 2, "amount": "1000.00", "spent": "-5"}
        ]);
        let converted = decode_batch::<BudgetRecord>("budgets.json", payload).unwrap();
        assert_eq!(converted.items.len(), 1);
        assert_eq!(converted.items[0].spent, Money::zero());
        assert_eq!(converted.issues[0].field, "spent");
    }

    #[test]
    fn test_goal_conversion() {
        let payload = json!([
            {"id": 1, "title": "Carro", "target_amount": 5000, "current_amount": "1250.50",
             "target_date": "2030-06-30", "description": ""},
            {"id": 2, "title": "Casa", "target_amount": 5000, "target_date": null}
        ]);
        let converted = decode_batch::<GoalRecord>("goals.json", payload).unwrap();
        assert_eq!(converted.items.len(), 1);
        assert_eq!(converted.items[0].current_amount, Money::from_cents(125050));
        assert!(converted.items[0].description.is_none());
        assert_eq!(converted.issues[0].field, "target_date");
        assert_eq!(converted.issues[0].reason, "missing");
    }

    #[test]
    fn test_amounts_above_record_limit_are_dropped() {
        let payload = json!([
            {"id": 1, "amount": "50000000000000000", "expense_date": "2024-01-05"},
            {"id": 2, "amount": "50000000000000000", "expense_date": "2024-01-06"},
            {"id": 3, "amount": "100000000000.00", "expense_date": "2024-01-07"}
        ]);
        let converted = decode_batch::<TransactionRecord>("transacoes.json", payload).unwrap();
        assert_eq!(converted.items.len(), 1);
        assert_eq!(converted.items[0].amount, Money::RECORD_LIMIT);
        assert_eq!(converted.issues.len(), 2);
        assert!(converted.issues.iter().all(|i| i.field == "amount"));

        let budgets = json!([
            {"id": 1, "category_id": 2, "amount": "1000.00", "spent": "50000000000000000"}
        ]);
        let converted = decode_batch::<BudgetRecord>("budgets.json", budgets).unwrap();
        assert_eq!(converted.issues[0].field, "spent");

        let totals = json!([{"category_name": "Renda", "total_amount": "50000000000000000"}]);
        let converted = decode_batch::<CategoryTotalRecord>("totals.json", totals).unwrap();
        assert_eq!(converted.issues[0].field, "total_amount");
        assert_eq!(converted.issues[0].id, None);
    }

    #[test]
    fn test_goal_title_is_checked_by_model() {
        let payload = json!([
            {"id": 4, "title": "  ", "target_amount": 5000, "target_date": "2030-06-30"}
        ]);
        let converted = decode_batch::<GoalRecord>("goals.json", payload).unwrap();
        assert_eq!(converted.issues[0].field, "title");
        assert_eq!(converted.issues[0].reason, "Goal title cannot be empty");
    }

    #[test]
    fn test_session_from_login() {
        let response: LoginResponse =
            serde_json::from_value(json!({"user": {"id": 9, "name": "Ana"}})).unwrap();
        let session = Session::from(response);
        assert_eq!(session.user_name, "Ana");
        assert_eq!(session.user_id.get(), 9);
    }
}
