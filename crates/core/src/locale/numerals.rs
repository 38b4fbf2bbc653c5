//! Digit-by-digit substitution between Latin and Persian numerals.
//!
//! Substitution is bidirectional and leaves every non-digit character
//! untouched, so it is safe to run over already-formatted strings
//! (thousands separators, currency symbols, unit labels).

/// Persian (Extended Arabic-Indic) digit glyphs, index = Latin digit.
const PERSIAN_DIGITS: [char; 10] = ['۰', '۱', '۲', '۳', '۴', '۵', '۶', '۷', '۸', '۹'];

/// Replace every ASCII digit with its Persian glyph.
#[must_use]
pub fn to_persian_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c.is_ascii_digit() {
                let index = (c as usize) - ('0' as usize);
                PERSIAN_DIGITS.get(index).copied().unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

/// Replace every Persian digit glyph with its ASCII digit.
#[must_use]
pub fn to_latin_digits(text: &str) -> String {
    text.chars()
        .map(|c| {
            PERSIAN_DIGITS
                .iter()
                .position(|&p| p == c)
                .and_then(|index| u32::try_from(index).ok())
                .and_then(|digit| char::from_digit(digit, 10))
                .unwrap_or(c)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_persian_digits() {
        assert_eq!(to_persian_digits("0123456789"), "۰۱۲۳۴۵۶۷۸۹");
        assert_eq!(to_persian_digits("25 mm"), "۲۵ mm");
    }

    #[test]
    fn test_to_latin_digits() {
        assert_eq!(to_latin_digits("۰۱۲۳۴۵۶۷۸۹"), "0123456789");
        assert_eq!(to_latin_digits("۳,۵۷۰,۰۰۰ تومان"), "3,570,000 تومان");
    }

    #[test]
    fn test_round_trip() {
        let original = "order 402, qty 7";
        assert_eq!(to_latin_digits(&to_persian_digits(original)), original);
    }

    #[test]
    fn test_non_digits_untouched() {
        assert_eq!(to_persian_digits("no digits here"), "no digits here");
        assert_eq!(to_latin_digits("بدون رقم"), "بدون رقم");
    }
}
