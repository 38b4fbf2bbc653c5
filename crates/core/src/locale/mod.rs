//! Locale handling and bilingual formatting.
//!
//! The storefront serves English (base locale, LTR) and Persian (RTL).
//! Source prices are Latin currency strings; everything locale-specific
//! (numeral glyphs, the toman conversion, unit labels) happens here at
//! presentation time.

pub mod format;
pub mod numerals;

pub use format::{
    format_number, format_price, format_price_with_unit, format_quantity, format_technical_value,
    localize_unit,
};
pub use numerals::{to_latin_digits, to_persian_digits};

use serde::{Deserialize, Serialize};

/// UI locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Locale {
    #[default]
    En,
    Fa,
}

impl Locale {
    /// Two-letter language code.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Fa => "fa",
        }
    }

    /// Whether the locale renders right-to-left.
    #[must_use]
    pub const fn is_rtl(&self) -> bool {
        matches!(self, Self::Fa)
    }
}

impl std::fmt::Display for Locale {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "fa" => Ok(Self::Fa),
            _ => Err(format!("unsupported locale: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_round_trip() {
        assert_eq!("en".parse::<Locale>(), Ok(Locale::En));
        assert_eq!("fa".parse::<Locale>(), Ok(Locale::Fa));
        assert!("de".parse::<Locale>().is_err());
    }

    #[test]
    fn test_rtl_flag() {
        assert!(!Locale::En.is_rtl());
        assert!(Locale::Fa.is_rtl());
    }
}
