//! Checkout flow: shipping validation, profile prefill and submission.
//!
//! The flow is a small state machine persisted in the session between
//! requests:
//!
//! ```text
//! Idle -> FormOpen -> Submitting -> Failed
//!                 \-> FormOpen (validation error, no network call)
//! ```
//!
//! A successful submit is terminal for the service - the browser is
//! navigated to the gateway's `payment_url` and returns on a callback
//! page negotiated with the gateway, so no in-app success state exists.

use serde::{Deserialize, Serialize};

use arta_stone_core::Locale;

use crate::commerce::CommerceError;
use crate::commerce::types::ShippingInfo;

/// Longest backend message shown to the user verbatim; anything longer
/// collapses to the generic localized error.
const VERBATIM_MESSAGE_LIMIT: usize = 120;

/// Shipping fields required before an order can be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShippingField {
    Address,
    City,
    PostalCode,
    Phone,
}

impl ShippingField {
    /// Display label for validation messages.
    #[must_use]
    pub const fn label(&self, locale: Locale) -> &'static str {
        match locale {
            Locale::En => match self {
                Self::Address => "street address",
                Self::City => "city",
                Self::PostalCode => "postal code",
                Self::Phone => "phone number",
            },
            Locale::Fa => match self {
                Self::Address => "نشانی",
                Self::City => "شهر",
                Self::PostalCode => "کد پستی",
                Self::Phone => "شماره تماس",
            },
        }
    }
}

/// Why a checkout attempt failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CheckoutErrorKind {
    /// A required shipping field is blank; caught before any network call.
    MissingField { field: ShippingField },
    /// The backend reports an empty cart.
    EmptyCart,
    /// A cart line has no price; the order total cannot be computed.
    PriceNotSet,
    /// The backend rejected the auth token.
    Unauthenticated,
    /// Transport failure reaching the backend.
    Network,
    /// The payment gateway rejected or could not be reached.
    Gateway,
    /// Anything else; carries the backend's message.
    Other { message: String },
}

impl CheckoutErrorKind {
    /// Classify a commerce error.
    ///
    /// Uses the HTTP status and the backend's machine-readable `code`
    /// field when present; known human messages remain as a fallback
    /// because the deployed backend does not send `code` on every
    /// error.
    #[must_use]
    pub fn from_commerce(error: &CommerceError) -> Self {
        match error {
            CommerceError::Http(_) | CommerceError::InvalidJson { .. } => Self::Network,
            CommerceError::NotFound(message) => Self::Other {
                message: message.clone(),
            },
            CommerceError::Api {
                status,
                code,
                message,
            } => {
                if let Some(code) = code {
                    match code.as_str() {
                        "cart_empty" => return Self::EmptyCart,
                        "price_not_set" => return Self::PriceNotSet,
                        "not_authenticated" | "authentication_failed" => {
                            return Self::Unauthenticated;
                        }
                        "gateway_error" | "payment_failed" => return Self::Gateway,
                        _ => {}
                    }
                }

                if matches!(status, 401 | 403) {
                    return Self::Unauthenticated;
                }

                let lower = message.to_lowercase();
                if lower.contains("cart is empty") {
                    Self::EmptyCart
                } else if lower.contains("price not set") {
                    Self::PriceNotSet
                } else if lower.contains("authentication credentials") {
                    Self::Unauthenticated
                } else if lower.contains("network error") {
                    Self::Network
                } else if lower.contains("payment") && lower.contains("failed") {
                    Self::Gateway
                } else {
                    Self::Other {
                        message: message.clone(),
                    }
                }
            }
        }
    }

    /// Localized user-facing message.
    #[must_use]
    pub fn message(&self, locale: Locale) -> String {
        match (self, locale) {
            (Self::MissingField { field }, Locale::En) => {
                format!("Please enter your {}.", field.label(locale))
            }
            (Self::MissingField { field }, Locale::Fa) => {
                format!("لطفاً {} را وارد کنید.", field.label(locale))
            }
            (Self::EmptyCart, Locale::En) => "Your cart is empty.".to_owned(),
            (Self::EmptyCart, Locale::Fa) => "سبد خرید شما خالی است.".to_owned(),
            (Self::PriceNotSet, Locale::En) => {
                "An item in your cart has no price set. Please contact us for a quote.".to_owned()
            }
            (Self::PriceNotSet, Locale::Fa) => {
                "قیمت یکی از اقلام سبد شما تعیین نشده است. لطفاً برای استعلام قیمت با ما تماس بگیرید."
                    .to_owned()
            }
            (Self::Unauthenticated, Locale::En) => {
                "Please log in to complete your order.".to_owned()
            }
            (Self::Unauthenticated, Locale::Fa) => {
                "برای ثبت سفارش وارد حساب کاربری خود شوید.".to_owned()
            }
            (Self::Network, Locale::En) => {
                "Network error. Please check your connection and try again.".to_owned()
            }
            (Self::Network, Locale::Fa) => {
                "خطای شبکه. لطفاً اتصال اینترنت خود را بررسی کنید و دوباره تلاش کنید.".to_owned()
            }
            (Self::Gateway, Locale::En) => {
                "The payment gateway could not be reached. Please try again.".to_owned()
            }
            (Self::Gateway, Locale::Fa) => {
                "اتصال به درگاه پرداخت برقرار نشد. لطفاً دوباره تلاش کنید.".to_owned()
            }
            (Self::Other { message }, _) => {
                // Short backend messages are meaningful enough to show
                // verbatim; long ones are server noise.
                if !message.is_empty() && message.chars().count() <= VERBATIM_MESSAGE_LIMIT {
                    message.clone()
                } else {
                    match locale {
                        Locale::En => {
                            "Something went wrong while placing your order. Please try again."
                                .to_owned()
                        }
                        Locale::Fa => {
                            "در ثبت سفارش شما خطایی رخ داد. لطفاً دوباره تلاش کنید.".to_owned()
                        }
                    }
                }
            }
        }
    }
}

/// The shipping form as the customer edits it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingForm {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
}

impl ShippingForm {
    /// Best-effort prefill from the profile's free-text address.
    ///
    /// The address is split on commas and trimmed: with three or more
    /// segments the last two are taken as city and postal code and the
    /// rest re-joined as the street address; with exactly two they are
    /// (address, city); otherwise the fields stay blank for manual
    /// entry. The heuristic may misparse - the UI offers an explicit
    /// re-trigger.
    #[must_use]
    pub fn prefill(profile_address: Option<&str>, phone: Option<&str>) -> Self {
        let mut form = Self {
            phone: phone.unwrap_or_default().to_owned(),
            ..Self::default()
        };

        let Some(raw) = profile_address else {
            return form;
        };

        let segments: Vec<&str> = raw
            .split(',')
            .map(str::trim)
            .filter(|segment| !segment.is_empty())
            .collect();

        match segments.as_slice() {
            [] | [_] => {}
            [address, city] => {
                form.address = (*address).to_owned();
                form.city = (*city).to_owned();
            }
            [head @ .., city, postal_code] => {
                form.address = head.join(", ");
                form.city = (*city).to_owned();
                form.postal_code = (*postal_code).to_owned();
            }
        }

        form
    }

    /// First blank field in display order, if any.
    fn missing_field(&self) -> Option<ShippingField> {
        if self.address.trim().is_empty() {
            Some(ShippingField::Address)
        } else if self.city.trim().is_empty() {
            Some(ShippingField::City)
        } else if self.postal_code.trim().is_empty() {
            Some(ShippingField::PostalCode)
        } else if self.phone.trim().is_empty() {
            Some(ShippingField::Phone)
        } else {
            None
        }
    }

    fn into_shipping(self) -> ShippingInfo {
        ShippingInfo {
            address: self.address.trim().to_owned(),
            city: self.city.trim().to_owned(),
            postal_code: self.postal_code.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
        }
    }
}

/// Checkout flow state, persisted in the session between requests.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CheckoutState {
    #[default]
    Idle,
    FormOpen {
        form: ShippingForm,
        error: Option<CheckoutErrorKind>,
    },
    Submitting,
    Failed {
        error: CheckoutErrorKind,
    },
}

/// Drives the checkout state machine.
#[derive(Debug, Clone, Default)]
pub struct CheckoutFlow {
    state: CheckoutState,
}

impl CheckoutFlow {
    /// Resume a flow from persisted state.
    #[must_use]
    pub const fn from_state(state: CheckoutState) -> Self {
        Self { state }
    }

    /// Open the shipping form, prefilled from the profile.
    #[must_use]
    pub fn open(profile_address: Option<&str>, phone: Option<&str>) -> Self {
        Self {
            state: CheckoutState::FormOpen {
                form: ShippingForm::prefill(profile_address, phone),
                error: None,
            },
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &CheckoutState {
        &self.state
    }

    /// Consume the flow, yielding the state for persistence.
    #[must_use]
    pub fn into_state(self) -> CheckoutState {
        self.state
    }

    /// Validate the form and move to `Submitting`.
    ///
    /// All four shipping fields must be non-blank before any network
    /// call. On a missing field the flow transitions back to `FormOpen`
    /// carrying the validation error, and no request payload is
    /// produced.
    ///
    /// # Errors
    ///
    /// Returns the validation error kind when a field is blank.
    pub fn begin_submit(&mut self, form: ShippingForm) -> Result<ShippingInfo, CheckoutErrorKind> {
        if let Some(field) = form.missing_field() {
            let error = CheckoutErrorKind::MissingField { field };
            self.state = CheckoutState::FormOpen {
                form,
                error: Some(error.clone()),
            };
            return Err(error);
        }

        self.state = CheckoutState::Submitting;
        Ok(form.into_shipping())
    }

    /// Record a failed submission.
    pub fn fail(&mut self, error: CheckoutErrorKind) {
        self.state = CheckoutState::Failed { error };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // =========================================================================
    // Prefill heuristic
    // =========================================================================

    #[test]
    fn test_prefill_three_segments() {
        let form = ShippingForm::prefill(Some("12 Main St, Springfield, 12345"), None);
        assert_eq!(form.address, "12 Main St");
        assert_eq!(form.city, "Springfield");
        assert_eq!(form.postal_code, "12345");
    }

    #[test]
    fn test_prefill_two_segments() {
        let form = ShippingForm::prefill(Some("12 Main St, Springfield"), None);
        assert_eq!(form.address, "12 Main St");
        assert_eq!(form.city, "Springfield");
        assert_eq!(form.postal_code, "");
    }

    #[test]
    fn test_prefill_single_segment_leaves_fields_blank() {
        let form = ShippingForm::prefill(Some("12 Main St"), None);
        assert_eq!(form.address, "");
        assert_eq!(form.city, "");
        assert_eq!(form.postal_code, "");
    }

    #[test]
    fn test_prefill_many_segments_joins_street() {
        let form = ShippingForm::prefill(Some("Unit 4, 12 Main St, Springfield, 12345"), None);
        assert_eq!(form.address, "Unit 4, 12 Main St");
        assert_eq!(form.city, "Springfield");
        assert_eq!(form.postal_code, "12345");
    }

    #[test]
    fn test_prefill_no_address_keeps_phone() {
        let form = ShippingForm::prefill(None, Some("+98 912 000 0000"));
        assert_eq!(form.phone, "+98 912 000 0000");
        assert_eq!(form.address, "");
    }

    // =========================================================================
    // Validation
    // =========================================================================

    fn complete_form() -> ShippingForm {
        ShippingForm {
            address: "12 Main St".to_string(),
            city: "Springfield".to_string(),
            postal_code: "12345".to_string(),
            phone: "+98 912 000 0000".to_string(),
        }
    }

    #[test]
    fn test_begin_submit_valid_form() {
        let mut flow = CheckoutFlow::open(None, None);
        let shipping = flow.begin_submit(complete_form()).expect("valid form");
        assert_eq!(shipping.city, "Springfield");
        assert_eq!(flow.state(), &CheckoutState::Submitting);
    }

    #[test]
    fn test_begin_submit_rejects_each_blank_field() {
        let blank_cases = [
            (
                ShippingForm {
                    address: String::new(),
                    ..complete_form()
                },
                ShippingField::Address,
            ),
            (
                ShippingForm {
                    city: "  ".to_string(),
                    ..complete_form()
                },
                ShippingField::City,
            ),
            (
                ShippingForm {
                    postal_code: String::new(),
                    ..complete_form()
                },
                ShippingField::PostalCode,
            ),
            (
                ShippingForm {
                    phone: String::new(),
                    ..complete_form()
                },
                ShippingField::Phone,
            ),
        ];

        for (form, expected_field) in blank_cases {
            let mut flow = CheckoutFlow::open(None, None);
            let error = flow.begin_submit(form).expect_err("blank field");
            assert_eq!(
                error,
                CheckoutErrorKind::MissingField {
                    field: expected_field
                }
            );
            // Back to the form with the error attached - no network call
            // was reachable from here.
            assert!(matches!(
                flow.state(),
                CheckoutState::FormOpen { error: Some(_), .. }
            ));
        }
    }

    // =========================================================================
    // Error classification
    // =========================================================================

    fn api_error(status: u16, message: &str) -> CommerceError {
        CommerceError::Api {
            status,
            code: None,
            message: message.to_string(),
        }
    }

    #[test]
    fn test_from_commerce_known_messages() {
        assert_eq!(
            CheckoutErrorKind::from_commerce(&api_error(400, "Cart is empty")),
            CheckoutErrorKind::EmptyCart
        );
        assert_eq!(
            CheckoutErrorKind::from_commerce(&api_error(
                400,
                "Price not set for stone: Silver Travertine"
            )),
            CheckoutErrorKind::PriceNotSet
        );
        assert_eq!(
            CheckoutErrorKind::from_commerce(&api_error(
                401,
                "Authentication credentials were not provided."
            )),
            CheckoutErrorKind::Unauthenticated
        );
    }

    #[test]
    fn test_from_commerce_machine_code_wins() {
        let error = CommerceError::Api {
            status: 400,
            code: Some("cart_empty".to_string()),
            message: "unrelated text".to_string(),
        };
        assert_eq!(
            CheckoutErrorKind::from_commerce(&error),
            CheckoutErrorKind::EmptyCart
        );
    }

    #[test]
    fn test_from_commerce_unknown_is_other() {
        assert_eq!(
            CheckoutErrorKind::from_commerce(&api_error(400, "Invalid total amount")),
            CheckoutErrorKind::Other {
                message: "Invalid total amount".to_string()
            }
        );
    }

    // =========================================================================
    // Localized messages
    // =========================================================================

    #[test]
    fn test_message_localization() {
        assert_eq!(
            CheckoutErrorKind::EmptyCart.message(Locale::En),
            "Your cart is empty."
        );
        assert_eq!(
            CheckoutErrorKind::EmptyCart.message(Locale::Fa),
            "سبد خرید شما خالی است."
        );
    }

    #[test]
    fn test_short_other_message_shown_verbatim() {
        let kind = CheckoutErrorKind::Other {
            message: "Invalid total amount".to_string(),
        };
        assert_eq!(kind.message(Locale::En), "Invalid total amount");
    }

    #[test]
    fn test_long_other_message_falls_back_to_generic() {
        let kind = CheckoutErrorKind::Other {
            message: "x".repeat(200),
        };
        assert_eq!(
            kind.message(Locale::En),
            "Something went wrong while placing your order. Please try again."
        );
    }
}
