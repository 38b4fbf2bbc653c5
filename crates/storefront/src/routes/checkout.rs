//! Checkout route handlers.
//!
//! Drives the session-persisted checkout flow: opening the shipping
//! form (prefilled from the profile), re-triggering the prefill, and
//! submitting the order. A successful submit answers with the payment
//! gateway URL; the browser navigates there and never sees an in-app
//! success state.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use arta_stone_core::{Locale, PaymentMethod};

use crate::commerce::types::CheckoutRequest;
use crate::middleware::{CurrentLocale, RequireAuth};
use crate::models::{CurrentUser, session_keys};
use crate::services::{CheckoutErrorKind, CheckoutFlow, CheckoutState, ShippingForm};
use crate::state::AppState;

// =============================================================================
// View & Request Types
// =============================================================================

/// A selectable payment gateway.
#[derive(Debug, Clone, Serialize)]
pub struct PaymentMethodView {
    pub id: PaymentMethod,
    pub label: &'static str,
    pub default: bool,
}

/// The checkout form as presented to the UI.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutFormView {
    pub form: ShippingForm,
    pub payment_methods: Vec<PaymentMethodView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Checkout submission body.
#[derive(Debug, Deserialize)]
pub struct CheckoutSubmitRequest {
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub payment_type: Option<PaymentMethod>,
}

/// Successful checkout response: where to send the customer.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutSubmitResponse {
    pub payment_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub authority: Option<String>,
}

/// Failed checkout response.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutErrorResponse {
    pub error: CheckoutErrorKind,
    pub message: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

async fn load_flow(session: &Session) -> CheckoutFlow {
    let state = session
        .get::<CheckoutState>(session_keys::CHECKOUT_STATE)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();
    CheckoutFlow::from_state(state)
}

async fn store_flow(session: &Session, flow: &CheckoutFlow) {
    if let Err(e) = session
        .insert(session_keys::CHECKOUT_STATE, flow.state())
        .await
    {
        tracing::error!(error = %e, "failed to persist checkout state");
    }
}

fn form_view(flow: &CheckoutFlow, locale: Locale) -> CheckoutFormView {
    let (form, error) = match flow.state() {
        CheckoutState::FormOpen { form, error } => (form.clone(), error.clone()),
        _ => (ShippingForm::default(), None),
    };

    CheckoutFormView {
        form,
        payment_methods: PaymentMethod::ALL
            .into_iter()
            .map(|method| PaymentMethodView {
                id: method,
                label: method.label(locale),
                default: method == PaymentMethod::default(),
            })
            .collect(),
        error: error.map(|kind| kind.message(locale)),
    }
}

/// Open the form prefilled from the profile and persist the state.
async fn open_form(session: &Session, user: &CurrentUser, locale: Locale) -> CheckoutFormView {
    let flow = CheckoutFlow::open(user.address.as_deref(), user.phone.as_deref());
    store_flow(session, &flow).await;
    form_view(&flow, locale)
}

// =============================================================================
// Handlers
// =============================================================================

/// Open the checkout form.
#[instrument(skip(session, user))]
pub async fn open(
    CurrentLocale(locale): CurrentLocale,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Json<CheckoutFormView> {
    Json(open_form(&session, &user, locale).await)
}

/// Re-run the profile prefill ("fill from profile").
///
/// The comma heuristic is best-effort and may misparse, so the UI can
/// ask for it again explicitly after the customer edited the fields.
#[instrument(skip(session, user))]
pub async fn prefill(
    CurrentLocale(locale): CurrentLocale,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Json<CheckoutFormView> {
    Json(open_form(&session, &user, locale).await)
}

/// Validate the shipping form and submit the order.
#[instrument(skip(state, session, user, request))]
pub async fn submit(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(request): Json<CheckoutSubmitRequest>,
) -> Response {
    let form = ShippingForm {
        address: request.address,
        city: request.city,
        postal_code: request.postal_code,
        phone: request.phone,
    };
    let payment_type = request.payment_type.unwrap_or_default();

    let mut flow = load_flow(&session).await;

    // Client-side validation: a blank field never reaches the network.
    let shipping = match flow.begin_submit(form) {
        Ok(shipping) => shipping,
        Err(kind) => {
            store_flow(&session, &flow).await;
            return error_response(&kind, locale, StatusCode::UNPROCESSABLE_ENTITY);
        }
    };
    store_flow(&session, &flow).await;

    let checkout_request = CheckoutRequest {
        shipping,
        payment_type,
    };

    match state.commerce().checkout(&user.token, &checkout_request).await {
        Ok(response) => {
            // Terminal for this flow: the cart was consumed server-side
            // and the browser leaves for the gateway.
            let _ = session
                .remove::<CheckoutState>(session_keys::CHECKOUT_STATE)
                .await;
            let _ = session
                .remove::<Vec<crate::models::CartItem>>(session_keys::CART_SNAPSHOT)
                .await;

            Json(CheckoutSubmitResponse {
                payment_url: response.payment_url,
                authority: response.authority,
            })
            .into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "checkout submission failed");
            let kind = CheckoutErrorKind::from_commerce(&e);
            flow.fail(kind.clone());
            store_flow(&session, &flow).await;

            let status = match kind {
                CheckoutErrorKind::Network | CheckoutErrorKind::Gateway => StatusCode::BAD_GATEWAY,
                CheckoutErrorKind::Unauthenticated => StatusCode::UNAUTHORIZED,
                _ => StatusCode::BAD_REQUEST,
            };
            error_response(&kind, locale, status)
        }
    }
}

fn error_response(kind: &CheckoutErrorKind, locale: Locale, status: StatusCode) -> Response {
    (
        status,
        Json(CheckoutErrorResponse {
            error: kind.clone(),
            message: kind.message(locale),
        }),
    )
        .into_response()
}
