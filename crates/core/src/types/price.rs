//! Unit prices parsed from the backend's currency-prefixed strings.
//!
//! The catalog stores prices as display strings (e.g. `"$85"`) rather
//! than structured money values. `UnitPrice` normalizes those strings
//! into decimal amounts for cart arithmetic; rendering back into a
//! locale-specific display string is handled by [`crate::locale`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Fallback amount applied when a stone has no parseable price.
pub const DEFAULT_UNIT_PRICE: Decimal = Decimal::from_parts(85, 0, 0, false, 0);

/// A per-unit price in the base currency (USD).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnitPrice(Decimal);

impl UnitPrice {
    /// Create a price from a known decimal amount.
    #[must_use]
    pub const fn new(amount: Decimal) -> Self {
        Self(amount)
    }

    /// Parse a currency-prefixed price string (e.g. `"$85"`, `"85.50"`).
    ///
    /// Every character that is not a digit or a decimal point is
    /// stripped first. An empty or unparseable remainder falls back to
    /// [`DEFAULT_UNIT_PRICE`].
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_ascii_digit() || *c == '.')
            .collect();
        Self(cleaned.parse().unwrap_or(DEFAULT_UNIT_PRICE))
    }

    /// Parse an optional price string; `None` falls back to the default.
    #[must_use]
    pub fn parse_opt(raw: Option<&str>) -> Self {
        raw.map_or(Self(DEFAULT_UNIT_PRICE), Self::parse)
    }

    /// The decimal amount in the base currency.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }
}

impl std::fmt::Display for UnitPrice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_dollar_prefixed() {
        assert_eq!(UnitPrice::parse("$85").amount(), Decimal::from(85));
    }

    #[test]
    fn test_parse_plain_decimal() {
        assert_eq!(UnitPrice::parse("85.50").amount(), Decimal::new(8550, 2));
    }

    #[test]
    fn test_parse_unparseable_falls_back() {
        assert_eq!(UnitPrice::parse("call us").amount(), DEFAULT_UNIT_PRICE);
        assert_eq!(UnitPrice::parse("").amount(), DEFAULT_UNIT_PRICE);
    }

    #[test]
    fn test_parse_opt_none_falls_back() {
        assert_eq!(UnitPrice::parse_opt(None).amount(), DEFAULT_UNIT_PRICE);
        assert_eq!(
            UnitPrice::parse_opt(Some("$120")).amount(),
            Decimal::from(120)
        );
    }

    #[test]
    fn test_display_two_decimals() {
        assert_eq!(UnitPrice::parse("$85").to_string(), "$85.00");
    }
}
