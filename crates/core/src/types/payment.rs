//! Payment gateways selectable at checkout.

use serde::{Deserialize, Serialize};

use crate::locale::Locale;

/// A payment gateway the customer can pick during checkout.
///
/// The wire encoding (snake_case) is what the checkout endpoint expects
/// as `payment_type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Zarinpal,
    Mellat,
    Parsian,
    Melli,
    CashOnDelivery,
    BankTransfer,
}

impl PaymentMethod {
    /// All selectable gateways, in display order.
    pub const ALL: [Self; 6] = [
        Self::Zarinpal,
        Self::Mellat,
        Self::Parsian,
        Self::Melli,
        Self::CashOnDelivery,
        Self::BankTransfer,
    ];

    /// The wire identifier sent to the checkout endpoint.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Zarinpal => "zarinpal",
            Self::Mellat => "mellat",
            Self::Parsian => "parsian",
            Self::Melli => "melli",
            Self::CashOnDelivery => "cash_on_delivery",
            Self::BankTransfer => "bank_transfer",
        }
    }

    /// Display label for the given locale.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Zarinpal => "ZarinPal",
                Self::Mellat => "Mellat Bank",
                Self::Parsian => "Parsian Bank",
                Self::Melli => "Melli Bank",
                Self::CashOnDelivery => "Cash on delivery",
                Self::BankTransfer => "Bank transfer",
            },
            Locale::Fa => match self {
                Self::Zarinpal => "زرین‌پال",
                Self::Mellat => "بانک ملت",
                Self::Parsian => "بانک پارسیان",
                Self::Melli => "بانک ملی",
                Self::CashOnDelivery => "پرداخت در محل",
                Self::BankTransfer => "حواله بانکی",
            },
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "zarinpal" => Ok(Self::Zarinpal),
            "mellat" => Ok(Self::Mellat),
            "parsian" => Ok(Self::Parsian),
            "melli" => Ok(Self::Melli),
            "cash_on_delivery" => Ok(Self::CashOnDelivery),
            "bank_transfer" => Ok(Self::BankTransfer),
            _ => Err(format!("invalid payment method: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_zarinpal() {
        assert_eq!(PaymentMethod::default(), PaymentMethod::Zarinpal);
    }

    #[test]
    fn test_wire_encoding_snake_case() {
        let json = serde_json::to_string(&PaymentMethod::CashOnDelivery).expect("serialize");
        assert_eq!(json, "\"cash_on_delivery\"");
    }

    #[test]
    fn test_from_str_round_trip() {
        for method in PaymentMethod::ALL {
            assert_eq!(method.as_str().parse::<PaymentMethod>(), Ok(method));
        }
        assert!("paypal".parse::<PaymentMethod>().is_err());
    }
}
