//! Budget and goal progress
//!
//! Percent-of-target, status tiers, remaining amounts and days left.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;

use crate::models::{Budget, FinancialGoal, Money};

/// Percentage of `target` reached by `current`, rounded and clamped to 0..=100
///
/// A zero or negative target yields 0.
pub fn percent(current: Money, target: Money) -> u8 {
    if !target.is_positive() {
        return 0;
    }
    let ratio = (current.cents() as f64 / target.cents() as f64 * 100.0).round();
    ratio.clamp(0.0, 100.0) as u8
}

/// Whole days from `today` until `target_date`, never negative
pub fn remaining_days(target_date: NaiveDate, today: NaiveDate) -> i64 {
    (target_date - today).num_days().max(0)
}

/// Ordered threshold lookup: highest threshold first, first match wins
#[derive(Debug, Clone, Copy)]
pub struct TierTable<T: 'static> {
    steps: &'static [(u8, T)],
    fallback: T,
}

impl<T: Copy> TierTable<T> {
    /// `steps` must be sorted by threshold, highest first
    pub const fn new(steps: &'static [(u8, T)], fallback: T) -> Self {
        Self { steps, fallback }
    }

    pub fn lookup(&self, pct: u8) -> T {
        debug_assert!(self.steps.windows(2).all(|w| w[0].0 >= w[1].0));
        self.steps
            .iter()
            .find(|(threshold, _)| pct >= *threshold)
            .map_or(self.fallback, |(_, tier)| *tier)
    }
}

/// How close a budget is to its ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BudgetTier {
    Ok,
    Warning,
    Critical,
}

pub const BUDGET_TIERS: TierTable<BudgetTier> = TierTable::new(
    &[(90, BudgetTier::Critical), (70, BudgetTier::Warning)],
    BudgetTier::Ok,
);

impl BudgetTier {
    /// Colour the budget card used for this tier
    pub fn hex_color(&self) -> &'static str {
        match self {
            Self::Critical => "#e74c3c",
            Self::Warning => "#f39c12",
            Self::Ok => "#2ecc71",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Warning => "warning",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for BudgetTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How far along a savings goal is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoalTier {
    Early,
    InProgress,
    NearComplete,
}

pub const GOAL_TIERS: TierTable<GoalTier> = TierTable::new(
    &[(90, GoalTier::NearComplete), (50, GoalTier::InProgress)],
    GoalTier::Early,
);

impl GoalTier {
    /// Colour the goal card used for this tier
    pub fn hex_color(&self) -> &'static str {
        match self {
            Self::NearComplete => "#2ecc71",
            Self::InProgress => "#3498db",
            Self::Early => "#f39c12",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Early => "early",
            Self::InProgress => "in-progress",
            Self::NearComplete => "near-complete",
        }
    }
}

impl fmt::Display for GoalTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// What is left in a budget, or by how much it was overrun
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "amount", rename_all = "lowercase")]
pub enum BudgetBalance {
    Remaining(Money),
    /// Spent reached or passed the ceiling
    Exceeded(Money),
}

/// Derived view of one budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BudgetProgress {
    pub percent: u8,
    pub tier: BudgetTier,
    /// `amount - spent`; negative when over budget
    pub remaining: Money,
    pub balance: BudgetBalance,
}

impl BudgetProgress {
    pub fn of(budget: &Budget) -> Self {
        let pct = percent(budget.spent, budget.amount);
        let remaining = budget.amount - budget.spent;
        let balance = if budget.amount > budget.spent {
            BudgetBalance::Remaining(remaining)
        } else {
            BudgetBalance::Exceeded(-remaining)
        };

        Self {
            percent: pct,
            tier: BUDGET_TIERS.lookup(pct),
            remaining,
            balance,
        }
    }
}

/// Derived view of one goal on a given day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GoalProgress {
    pub percent: u8,
    pub tier: GoalTier,
    /// `target - current`; negative once the goal is overshot
    pub remaining_amount: Money,
    pub remaining_days: i64,
}

impl GoalProgress {
    pub fn of(goal: &FinancialGoal, today: NaiveDate) -> Self {
        let pct = percent(goal.current_amount, goal.target_amount);
        Self {
            percent: pct,
            tier: GOAL_TIERS.lookup(pct),
            remaining_amount: goal.target_amount - goal.current_amount,
            remaining_days: remaining_days(goal.target_date, today),
        }
    }
}
