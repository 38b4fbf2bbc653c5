//! Account route handlers: profile and order history.

use axum::{
    Json,
    extract::{Path, State},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use arta_stone_core::locale::{format_price, format_quantity, format_technical_value};
use arta_stone_core::{Locale, OrderId, OrderStatus, PaymentStatus, UserId};

use crate::commerce::types::{ProfileUpdate, RemoteOrder, RemoteUser};
use crate::error::Result;
use crate::middleware::{CurrentLocale, RequireAuth, set_current_user};
use crate::models::CurrentUser;
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Customer profile display data. Never carries the backend token.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: UserId,
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

impl UserView {
    /// Build the view of a backend profile.
    #[must_use]
    pub fn from_remote(user: &RemoteUser) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: format!("{} {}", user.first_name, user.last_name)
                .trim()
                .to_owned(),
            phone: user.phone.clone(),
            address: user.address.clone(),
        }
    }
}

/// A line on an order, localized for display.
#[derive(Debug, Clone, Serialize)]
pub struct OrderItemView {
    pub name: String,
    pub quantity: u32,
    pub quantity_display: String,
    pub unit_price: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_finish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_thickness: Option<String>,
}

/// An order, localized for display.
#[derive(Debug, Clone, Serialize)]
pub struct OrderView {
    pub id: OrderId,
    pub order_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracking_code: Option<String>,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub total: String,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub shipping_phone: String,
    pub items: Vec<OrderItemView>,
    pub created_at: DateTime<Utc>,
}

impl OrderView {
    /// Build the localized view of an order.
    #[must_use]
    pub fn from_remote(order: &RemoteOrder, locale: Locale) -> Self {
        Self {
            id: order.id,
            order_number: format_technical_value(&order.order_number, locale),
            tracking_code: order.tracking_code.clone(),
            status: order.status,
            payment_status: order.payment_status,
            total: format_price(&order.total_amount, locale),
            shipping_address: order.shipping_address.clone(),
            shipping_city: order.shipping_city.clone(),
            shipping_postal_code: order.shipping_postal_code.clone(),
            shipping_phone: order.shipping_phone.clone(),
            items: order
                .items
                .iter()
                .map(|item| OrderItemView {
                    name: match locale {
                        Locale::En => item.stone.name_en.clone(),
                        Locale::Fa => item.stone.name_fa.clone(),
                    },
                    quantity: item.quantity,
                    quantity_display: format_quantity(item.quantity, locale),
                    unit_price: format_price(&item.price, locale),
                    selected_finish: non_empty(&item.selected_finish),
                    selected_thickness: non_empty(&item.selected_thickness),
                })
                .collect(),
            created_at: order.created_at,
        }
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

/// Profile update request body. Only provided fields change.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdateRequest {
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

/// Refresh the session's profile snapshot after a fetch or update, so
/// checkout prefill sees current data.
async fn refresh_session_user(session: &Session, user: &CurrentUser, remote: &RemoteUser) {
    let updated = CurrentUser {
        id: remote.id,
        email: remote.email.clone(),
        name: format!("{} {}", remote.first_name, remote.last_name)
            .trim()
            .to_owned(),
        phone: remote.phone.clone(),
        address: remote.address.clone(),
        token: user.token.clone(),
    };
    if let Err(e) = set_current_user(session, &updated).await {
        tracing::error!(error = %e, "failed to refresh session user");
    }
}

/// Current customer profile.
#[instrument(skip(state, session, user))]
pub async fn profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
) -> Result<Json<UserView>> {
    let remote = state.commerce().get_profile(&user.token).await?;
    refresh_session_user(&session, &user, &remote).await;
    Ok(Json(UserView::from_remote(&remote)))
}

/// Update the customer profile.
#[instrument(skip(state, session, user, request))]
pub async fn update_profile(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    session: Session,
    Json(request): Json<ProfileUpdateRequest>,
) -> Result<Json<UserView>> {
    let update = ProfileUpdate {
        first_name: request.first_name,
        last_name: request.last_name,
        phone: request.phone,
        address: request.address,
    };
    let remote = state.commerce().update_profile(&user.token, &update).await?;
    refresh_session_user(&session, &user, &remote).await;
    Ok(Json(UserView::from_remote(&remote)))
}

/// Order history.
#[instrument(skip(state, user))]
pub async fn orders(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<OrderView>>> {
    let orders = state.commerce().list_orders(&user.token).await?;
    Ok(Json(
        orders
            .iter()
            .map(|order| OrderView::from_remote(order, locale))
            .collect(),
    ))
}

/// Single order detail.
#[instrument(skip(state, user))]
pub async fn order(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    RequireAuth(user): RequireAuth,
    Path(id): Path<i32>,
) -> Result<Json<OrderView>> {
    let order = state
        .commerce()
        .get_order(&user.token, OrderId::new(id))
        .await?;
    Ok(Json(OrderView::from_remote(&order, locale)))
}
