//! Top-N category ranking
//!
//! Orders category totals by amount and computes each one's share of the
//! ranked subset.

use serde::Serialize;

use crate::display::currency::CurrencyFormat;
use crate::display::report::{format_bar, format_share, separator, truncate};
use crate::models::{Category, Money, Transaction};

/// Total spent in one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryTotal {
    pub name: String,
    pub total: Money,
}

impl CategoryTotal {
    pub fn new(name: impl Into<String>, total: Money) -> Self {
        Self {
            name: name.into(),
            total,
        }
    }
}

/// A category total with its share of the ranked subset
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCategory {
    pub name: String,
    pub total: Money,
    /// Percentage of the top-N sum, 0 when that sum is zero
    pub share: f64,
}

/// The `n` largest totals, largest first, with their shares
///
/// Ties keep their input order.
pub fn top_n(totals: &[CategoryTotal], n: usize) -> Vec<RankedCategory> {
    let mut sorted: Vec<&CategoryTotal> = totals.iter().collect();
    sorted.sort_by(|a, b| b.total.cmp(&a.total));
    sorted.truncate(n);

    let sum: Money = sorted.iter().map(|t| t.total).sum();

    sorted
        .into_iter()
        .map(|t| {
            let share = if sum.is_positive() {
                t.total.cents() as f64 / sum.cents() as f64 * 100.0
            } else {
                0.0
            };
            RankedCategory {
                name: t.name.clone(),
                total: t.total,
                share,
            }
        })
        .collect()
}

/// Expense totals per category, in category order
///
/// Categories with no spending are left out.
pub fn category_totals(transactions: &[Transaction], categories: &[Category]) -> Vec<CategoryTotal> {
    categories
        .iter()
        .filter_map(|category| {
            let total: Money = transactions
                .iter()
                .filter(|t| t.is_expense() && t.category_id == Some(category.id))
                .map(|t| t.amount)
                .sum();

            if total.is_zero() {
                None
            } else {
                Some(CategoryTotal::new(category.name.clone(), total))
            }
        })
        .collect()
}

/// Format a ranking for terminal display
pub fn format_ranking(ranked: &[RankedCategory], currency: &CurrencyFormat) -> String {
    if ranked.is_empty() {
        return "Sem gastos por categoria.\n".to_string();
    }

    let max = ranked.first().map_or(0.0, |r| r.total.as_f64());
    let mut output = String::new();

    output.push_str(&format!(
        "{:<3} {:<20} {:>18} {:>7}  {}\n",
        "#", "Categoria", "Total", "%", "Distribuição"
    ));
    output.push_str(&separator(72));
    output.push('\n');

    for (position, item) in ranked.iter().enumerate() {
        output.push_str(&format!(
            "{:<3} {:<20} {:>18} {:>7}  {}\n",
            position + 1,
            truncate(&item.name, 20),
            currency.format_money(item.total),
            format_share(item.share),
            format_bar(item.total.as_f64(), max, 16)
        ));
    }

    output
}
