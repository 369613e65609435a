//! Price arithmetic and locale-style currency formatting.
//!
//! Amounts are `rust_decimal::Decimal` in the currency's standard unit.
//! Formatting never reaches into ambient settings: callers pass a
//! [`CurrencyFormat`] built from the storefront settings record.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Currency symbol used when settings do not name one.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "Rs.";

/// Maximum fraction digits shown for formatted amounts.
const MAX_FRACTION_DIGITS: u32 = 3;

/// Apply a percentage discount to a unit price.
///
/// A zero or negative discount leaves the price untouched; discounts above
/// 100% are treated as 100%.
#[must_use]
pub fn discounted_price(price: Decimal, discount_percent: Decimal) -> Decimal {
    if discount_percent <= Decimal::ZERO {
        return price;
    }
    let discount = discount_percent.min(Decimal::ONE_HUNDRED);
    price * (Decimal::ONE - discount / Decimal::ONE_HUNDRED)
}

/// How integer digits are grouped when formatting amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DigitGrouping {
    /// South Asian grouping: `12,34,567`.
    #[default]
    Lakh,
    /// Groups of three: `1,234,567`.
    Thousands,
}

impl DigitGrouping {
    /// Insert separators into a string of ASCII digits.
    fn group(self, digits: &str) -> String {
        let (first, rest) = match self {
            Self::Lakh => (3, 2),
            Self::Thousands => (3, 3),
        };

        let chars: Vec<char> = digits.chars().collect();
        let mut groups: Vec<String> = Vec::new();
        let mut end = chars.len();
        let mut size = first;
        while end > 0 {
            let start = end.saturating_sub(size);
            if let Some(group) = chars.get(start..end) {
                groups.push(group.iter().collect());
            }
            end = start;
            size = rest;
        }
        groups.reverse();
        groups.join(",")
    }
}

/// Currency presentation policy.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CurrencyFormat {
    /// Symbol placed before the amount, separated by a space.
    pub symbol: String,
    /// Digit grouping for the integer part.
    pub grouping: DigitGrouping,
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        Self {
            symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            grouping: DigitGrouping::default(),
        }
    }
}

impl CurrencyFormat {
    /// Create a format with the given symbol and grouping.
    #[must_use]
    pub fn new(symbol: impl Into<String>, grouping: DigitGrouping) -> Self {
        Self {
            symbol: symbol.into(),
            grouping,
        }
    }

    /// Format a bare number: grouped integer part, at most three fraction
    /// digits (banker's rounding), trailing zeros dropped.
    #[must_use]
    pub fn format_number(&self, amount: Decimal) -> String {
        let rounded = amount
            .round_dp_with_strategy(MAX_FRACTION_DIGITS, RoundingStrategy::MidpointNearestEven)
            .normalize();
        let negative = rounded.is_sign_negative() && !rounded.is_zero();
        let text = rounded.abs().to_string();

        let (int_part, frac_part) = match text.split_once('.') {
            Some((int_part, frac_part)) => (int_part, Some(frac_part)),
            None => (text.as_str(), None),
        };

        let mut out = String::new();
        if negative {
            out.push('-');
        }
        out.push_str(&self.grouping.group(int_part));
        if let Some(frac) = frac_part {
            out.push('.');
            out.push_str(frac);
        }
        out
    }

    /// Format an amount with the currency symbol, e.g. `Rs. 1,800`.
    #[must_use]
    pub fn format(&self, amount: Decimal) -> String {
        format!("{} {}", self.symbol, self.format_number(amount))
    }
}

/// Display strings for a discounted price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceBreakdown {
    /// List price before discount.
    pub original: String,
    /// Price after discount.
    pub discounted: String,
    /// Amount saved (zero when there is no discount).
    pub saved: String,
    /// Whether a discount applies.
    pub has_discount: bool,
}

impl PriceBreakdown {
    /// Build the breakdown for a price and discount percentage.
    #[must_use]
    pub fn new(price: Decimal, discount_percent: Decimal, format: &CurrencyFormat) -> Self {
        let has_discount = discount_percent > Decimal::ZERO;
        let discounted = discounted_price(price, discount_percent);
        let saved = if has_discount {
            price - discounted
        } else {
            Decimal::ZERO
        };

        Self {
            original: format.format(price),
            discounted: format.format(discounted),
            saved: format.format(saved),
            has_discount,
        }
    }
}
