//! Budget model
//!
//! A per-category spending ceiling. The running `spent` total is computed by
//! the backend; the client only reads it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, CategoryId};
use super::money::Money;

/// A spending ceiling for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// The category this budget caps
    pub category_id: CategoryId,

    /// Target ceiling (> 0)
    pub amount: Money,

    /// Spent so far this period (>= 0), computed server-side
    pub spent: Money,

    /// Category name when the backend joins it in
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,
}

impl Budget {
    /// Create a new budget
    pub fn new(id: BudgetId, category_id: CategoryId, amount: Money, spent: Money) -> Self {
        Self {
            id,
            category_id,
            amount,
            spent,
            category_name: None,
        }
    }

    /// Set the joined category name
    pub fn with_category_name(mut self, name: impl Into<String>) -> Self {
        self.category_name = Some(name.into());
        self
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if !self.amount.is_positive() {
            return Err(BudgetValidationError::NonPositiveAmount);
        }
        if self.amount.exceeds_record_limit() {
            return Err(BudgetValidationError::AmountTooLarge);
        }
        if self.spent.is_negative() {
            return Err(BudgetValidationError::NegativeSpent);
        }
        if self.spent.exceeds_record_limit() {
            return Err(BudgetValidationError::SpentTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = self
            .category_name
            .clone()
            .unwrap_or_else(|| self.category_id.to_string());
        write!(f, "{}: {} of {}", label, self.spent, self.amount)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NonPositiveAmount,
    AmountTooLarge,
    NegativeSpent,
    SpentTooLarge,
}

impl BudgetValidationError {
    /// Name of the rejected field
    pub fn field(&self) -> &'static str {
        match self {
            Self::NonPositiveAmount | Self::AmountTooLarge => "amount",
            Self::NegativeSpent | Self::SpentTooLarge => "spent",
        }
    }
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonPositiveAmount => write!(f, "Budget amount must be greater than zero"),
            Self::AmountTooLarge => write!(f, "Budget amount is above the per-record limit"),
            Self::NegativeSpent => write!(f, "Spent amount cannot be negative"),
            Self::SpentTooLarge => write!(f, "Spent amount is above the per-record limit"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate() {
        let ok = Budget::new(BudgetId::new(1), CategoryId::new(1), Money::from_cents(100000), Money::zero());
        assert!(ok.validate().is_ok());

        let zero = Budget::new(BudgetId::new(2), CategoryId::new(1), Money::zero(), Money::zero());
        assert_eq!(zero.validate(), Err(BudgetValidationError::NonPositiveAmount));

        let negative = Budget::new(
            BudgetId::new(3),
            CategoryId::new(1),
            Money::from_cents(100),
            Money::from_cents(-1),
        );
        assert_eq!(negative.validate(), Err(BudgetValidationError::NegativeSpent));
        assert_eq!(BudgetValidationError::NegativeSpent.field(), "spent");

        let huge = Budget::new(
            BudgetId::new(4),
            CategoryId::new(1),
            Money::from_cents(100),
            Money::RECORD_LIMIT + Money::from_cents(1),
        );
        assert_eq!(huge.validate(), Err(BudgetValidationError::SpentTooLarge));
    }

    #[test]
    fn test_display_prefers_category_name() {
        let budget = Budget::new(
            BudgetId::new(1),
            CategoryId::new(4),
            Money::from_cents(100000),
            Money::from_cents(95000),
        );
        assert!(budget.to_string().starts_with("cat-4: "));
        assert!(budget.with_category_name("Renda").to_string().starts_with("Renda: "));
    }
}
