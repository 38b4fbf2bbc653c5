//! Bilingual price, quantity and unit formatting.
//!
//! Pure functions, no state. Prices arrive as Latin currency strings
//! (e.g. `"$85"`); for the Persian locale they are converted into toman
//! at a fixed approximate rate and rendered with Persian numerals.
//! Currency conversion happens here only - cart arithmetic stays in the
//! base currency.

use rust_decimal::Decimal;

use super::Locale;
use super::numerals::to_persian_digits;

/// Approximate toman per USD. Fixed rate, refreshed manually with
/// catalog updates.
const TOMAN_PER_USD: u32 = 42_000;

/// Strip currency decoration and parse the numeric part of a price.
fn parse_amount(raw: &str) -> Option<Decimal> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    cleaned.parse().ok()
}

/// Insert `,` thousands separators into an unsigned digit string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Format a price string for display.
///
/// - Unparseable prices render as a localized "price on request" text.
/// - `En`: `$<amount>` with two decimal places.
/// - `Fa`: converted to toman, thousands-separated, Persian numerals.
#[must_use]
pub fn format_price(raw: &str, locale: Locale) -> String {
    let Some(amount) = parse_amount(raw) else {
        return match locale {
            Locale::En => "Price TBD".to_owned(),
            Locale::Fa => "قیمت نامشخص".to_owned(),
        };
    };

    match locale {
        Locale::En => format!("${amount:.2}"),
        Locale::Fa => {
            let toman = (amount * Decimal::from(TOMAN_PER_USD)).round();
            let grouped = group_thousands(&toman.to_string());
            format!("{} تومان", to_persian_digits(&grouped))
        }
    }
}

/// Format a quantity for display (Persian numerals for `Fa`).
#[must_use]
pub fn format_quantity(quantity: u32, locale: Locale) -> String {
    let text = quantity.to_string();
    match locale {
        Locale::En => text,
        Locale::Fa => to_persian_digits(&text),
    }
}

/// Format a technical value (dimensions, densities) for display.
///
/// The value passes through unchanged apart from numeral localization.
#[must_use]
pub fn format_technical_value(value: &str, locale: Locale) -> String {
    match locale {
        Locale::En => value.to_owned(),
        Locale::Fa => to_persian_digits(value),
    }
}

/// Localize a unit abbreviation for display.
///
/// Unknown units are numeral-localized and otherwise passed through.
#[must_use]
pub fn localize_unit(unit: &str, locale: Locale) -> String {
    let translated = match unit {
        "m²" | "m2" | "sqm" => Some(("m²", "متر مربع")),
        "mm" => Some(("mm", "میلی‌متر")),
        "cm" => Some(("cm", "سانتی‌متر")),
        "m" => Some(("m", "متر")),
        "kg/m³" => Some(("kg/m³", "کیلوگرم بر متر مکعب")),
        "MPa" => Some(("MPa", "مگاپاسکال")),
        "%" => Some(("%", "درصد")),
        _ => None,
    };

    match (translated, locale) {
        (Some((en, _)), Locale::En) => en.to_owned(),
        (Some((_, fa)), Locale::Fa) => fa.to_owned(),
        (None, _) => format_technical_value(unit, locale),
    }
}

/// Format a price together with its unit, e.g. `$85.00/m²` or
/// `۳,۵۷۰,۰۰۰ تومان/متر مربع`.
#[must_use]
pub fn format_price_with_unit(raw: &str, locale: Locale, unit: &str) -> String {
    format!(
        "{}/{}",
        format_price(raw, locale),
        localize_unit(unit, locale)
    )
}

/// Format an integer with thousands separators per locale.
#[must_use]
pub fn format_number(value: u64, locale: Locale) -> String {
    let grouped = group_thousands(&value.to_string());
    match locale {
        Locale::En => grouped,
        Locale::Fa => to_persian_digits(&grouped),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_price_en_two_decimals() {
        assert_eq!(format_price("85", Locale::En), "$85.00");
        assert_eq!(format_price("$85", Locale::En), "$85.00");
        assert_eq!(format_price("120.5", Locale::En), "$120.50");
    }

    #[test]
    fn test_format_price_fa_toman_conversion() {
        // 85 USD * 42,000 = 3,570,000 toman
        assert_eq!(format_price("$85", Locale::Fa), "۳,۵۷۰,۰۰۰ تومان");
    }

    #[test]
    fn test_format_price_unparseable() {
        assert_eq!(format_price("call us", Locale::En), "Price TBD");
        assert_eq!(format_price("", Locale::Fa), "قیمت نامشخص");
    }

    #[test]
    fn test_format_quantity() {
        assert_eq!(format_quantity(5, Locale::En), "5");
        assert_eq!(format_quantity(5, Locale::Fa), "۵");
        assert_eq!(format_quantity(12, Locale::Fa), "۱۲");
    }

    #[test]
    fn test_localize_unit_known() {
        assert_eq!(localize_unit("m2", Locale::En), "m²");
        assert_eq!(localize_unit("sqm", Locale::Fa), "متر مربع");
        assert_eq!(localize_unit("%", Locale::Fa), "درصد");
    }

    #[test]
    fn test_localize_unit_unknown_passthrough() {
        assert_eq!(localize_unit("slabs", Locale::En), "slabs");
        // Unknown units still get numeral localization
        assert_eq!(localize_unit("30mm", Locale::Fa), "۳۰mm");
    }

    #[test]
    fn test_format_price_with_unit() {
        assert_eq!(format_price_with_unit("85", Locale::En, "m²"), "$85.00/m²");
        assert_eq!(
            format_price_with_unit("85", Locale::Fa, "m²"),
            "۳,۵۷۰,۰۰۰ تومان/متر مربع"
        );
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(1_250_000, Locale::En), "1,250,000");
        assert_eq!(format_number(1_250_000, Locale::Fa), "۱,۲۵۰,۰۰۰");
        assert_eq!(format_number(999, Locale::En), "999");
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands("1"), "1");
        assert_eq!(group_thousands("1234"), "1,234");
        assert_eq!(group_thousands("3570000"), "3,570,000");
    }
}
