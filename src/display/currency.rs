//! Currency formatting
//!
//! Renders amounts the way the mobile client's `Intl.NumberFormat` did for
//! the configured locale. The default is Mozambican Portuguese with meticais:
//! `1234,50 MTn`, `12 345,00 MTn`.

use serde::{Deserialize, Serialize};

use crate::error::CarteiraError;
use crate::models::Money;

const NBSP: char = '\u{a0}';

/// Locale-specific rules for rendering a currency amount
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrencyFormat {
    /// Currency symbol, e.g. "MTn"
    pub symbol: String,
    /// Separator between units and cents
    pub decimal_separator: char,
    /// Separator between digit groups of three
    pub group_separator: char,
    /// Grouping only applies once the leading group has this many digits
    pub min_grouping_digits: usize,
    /// Whether the symbol follows the number (separated by a no-break space)
    pub symbol_after: bool,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self::pt_mz()
    }
}

impl CurrencyFormat {
    /// Mozambican Portuguese, meticais
    pub fn pt_mz() -> Self {
        Self {
            symbol: "MTn".to_string(),
            decimal_separator: ',',
            group_separator: NBSP,
            min_grouping_digits: 2,
            symbol_after: true,
        }
    }

    /// European Portuguese, euros
    pub fn pt_pt() -> Self {
        Self {
            symbol: "€".to_string(),
            ..Self::pt_mz()
        }
    }

    /// US English, dollars
    pub fn en_us() -> Self {
        Self {
            symbol: "$".to_string(),
            decimal_separator: '.',
            group_separator: ',',
            min_grouping_digits: 1,
            symbol_after: false,
        }
    }

    /// Resolve a locale/currency pair from settings
    pub fn for_locale(locale: &str, currency: &str) -> Result<Self, CarteiraError> {
        let locale = locale.trim().replace('_', "-");
        match (locale.as_str(), currency.trim().to_ascii_uppercase().as_str()) {
            ("pt-MZ", "MZN") => Ok(Self::pt_mz()),
            ("pt-PT", "EUR") => Ok(Self::pt_pt()),
            ("en-US", "USD") => Ok(Self::en_us()),
            (l, c) => Err(CarteiraError::Config(format!(
                "Unsupported locale/currency pair: {}/{}",
                l, c
            ))),
        }
    }

    /// Format an exact amount
    pub fn format_money(&self, amount: Money) -> String {
        let units = self.group_digits(&amount.units().unsigned_abs().to_string());
        let number = format!(
            "{}{}{:02}",
            units,
            self.decimal_separator,
            amount.cents_part()
        );
        let sign = if amount.is_negative() { "-" } else { "" };

        if self.symbol_after {
            format!("{}{}{}{}", sign, number, NBSP, self.symbol)
        } else {
            format!("{}{}{}", sign, self.symbol, number)
        }
    }

    /// Format a float amount, rounding to cents only
    ///
    /// Non-finite input renders as zero.
    pub fn format_amount(&self, amount: f64) -> String {
        self.format_money(Money::from_f64(amount).unwrap_or_default())
    }

    fn group_digits(&self, digits: &str) -> String {
        if digits.len() < 3 + self.min_grouping_digits {
            return digits.to_string();
        }

        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(self.group_separator);
            }
            out.push(c);
        }
        out
    }
}

/// Format an amount with the default pt-MZ / MZN rules
pub fn format_money(amount: Money) -> String {
    CurrencyFormat::default().format_money(amount)
}

/// Format a float amount with the default pt-MZ / MZN rules
pub fn format_amount(amount: f64) -> String {
    CurrencyFormat::default().format_amount(amount)
}
