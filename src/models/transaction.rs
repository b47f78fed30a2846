//! Transaction model
//!
//! A recorded income entry (entrada) or expense (gasto). Transactions are
//! immutable once fetched from the backend.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ids::{CategoryId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money received (entrada)
    #[serde(alias = "entrada")]
    Income,
    /// Money spent (gasto)
    #[serde(alias = "gasto")]
    Expense,
}

impl TransactionKind {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Entrada"),
            Self::Expense => write!(f, "Gasto"),
        }
    }
}

impl FromStr for TransactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "income" | "entrada" | "entradas" => Ok(Self::Income),
            "expense" | "gasto" | "gastos" => Ok(Self::Expense),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Amount, always positive; direction comes from `kind`
    pub amount: Money,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Income or expense
    pub kind: TransactionKind,

    /// Category (expenses usually carry one, entries usually don't)
    #[serde(default)]
    pub category_id: Option<CategoryId>,

    /// Free-text description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    /// Create a new expense
    pub fn expense(
        id: TransactionId,
        date: NaiveDate,
        amount: Money,
        category_id: Option<CategoryId>,
    ) -> Self {
        Self {
            id,
            amount,
            date,
            kind: TransactionKind::Expense,
            category_id,
            description: None,
        }
    }

    /// Create a new income entry
    pub fn income(id: TransactionId, date: NaiveDate, amount: Money) -> Self {
        Self {
            id,
            amount,
            date,
            kind: TransactionKind::Income,
            category_id: None,
            description: None,
        }
    }

    /// Set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }
        if self.amount.exceeds_record_limit() {
            return Err(TransactionValidationError::AmountTooLarge(self.amount));
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.date, self.kind, self.amount)
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NonPositiveAmount(Money),
    AmountTooLarge(Money),
}

impl TransactionValidationError {
    /// Name of the rejected field
    pub fn field(&self) -> &'static str {
        "amount"
    }
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero, got {}", amount.as_f64())
            }
            Self::AmountTooLarge(amount) => {
                write!(f, "Amount {} is above the per-record limit", amount.as_f64())
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}
