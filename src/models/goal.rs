//! Financial goal model
//!
//! A savings target with a deadline and a running total of contributions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::GoalId;
use super::money::Money;

/// A savings target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FinancialGoal {
    /// Unique identifier
    pub id: GoalId,

    /// Short title shown on the goal card
    pub title: String,

    /// Amount to reach (> 0)
    pub target_amount: Money,

    /// Contributed so far (>= 0)
    pub current_amount: Money,

    /// Deadline
    pub target_date: NaiveDate,

    /// Optional longer description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl FinancialGoal {
    /// Create a new goal
    pub fn new(
        id: GoalId,
        title: impl Into<String>,
        target_amount: Money,
        current_amount: Money,
        target_date: NaiveDate,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            target_amount,
            current_amount,
            target_date,
            description: None,
        }
    }

    /// Whether the contributions have reached the target
    pub fn is_reached(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Validate the goal
    pub fn validate(&self) -> Result<(), GoalValidationError> {
        if self.title.trim().is_empty() {
            return Err(GoalValidationError::EmptyTitle);
        }
        if !self.target_amount.is_positive() {
            return Err(GoalValidationError::NonPositiveTarget);
        }
        if self.target_amount.exceeds_record_limit() {
            return Err(GoalValidationError::TargetTooLarge);
        }
        if self.current_amount.is_negative() {
            return Err(GoalValidationError::NegativeCurrent);
        }
        if self.current_amount.exceeds_record_limit() {
            return Err(GoalValidationError::CurrentTooLarge);
        }
        Ok(())
    }
}

impl fmt::Display for FinancialGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} of {} by {}",
            self.title, self.current_amount, self.target_amount, self.target_date
        )
    }
}

/// Validation errors for goals
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoalValidationError {
    EmptyTitle,
    NonPositiveTarget,
    TargetTooLarge,
    NegativeCurrent,
    CurrentTooLarge,
}

impl GoalValidationError {
    /// Name of the rejected field
    pub fn field(&self) -> &'static str {
        match self {
            Self::EmptyTitle => "title",
            Self::NonPositiveTarget | Self::TargetTooLarge => "target_amount",
            Self::NegativeCurrent | Self::CurrentTooLarge => "current_amount",
        }
    }
}

impl fmt::Display for GoalValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Goal title cannot be empty"),
            Self::NonPositiveTarget => write!(f, "Target amount must be greater than zero"),
            Self::TargetTooLarge => write!(f, "Target amount is above the per-record limit"),
            Self::NegativeCurrent => write!(f, "Current amount cannot be negative"),
            Self::CurrentTooLarge => write!(f, "Current amount is above the per-record limit"),
        }
    }
}

impl std::error::Error for GoalValidationError {}
