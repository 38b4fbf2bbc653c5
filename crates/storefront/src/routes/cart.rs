//! Cart route handlers.
//!
//! All responses are JSON view types with display strings already
//! localized for the visitor's language preference. Mutations respond
//! with the full updated cart so the UI can re-render in one round
//! trip.

use axum::{Json, extract::State};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use arta_stone_core::locale::{format_price, format_quantity};
use arta_stone_core::{Locale, StoneId, UnitPrice};

use crate::commerce::conversions::stone_ref_from_remote;
use crate::error::Result;
use crate::middleware::CurrentLocale;
use crate::models::{Cart, CartItem, LineOptions};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: String,
    pub stone_id: StoneId,
    pub name: String,
    pub category: String,
    pub quantity: u32,
    pub quantity_display: String,
    pub unit_price: String,
    pub line_total: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_finish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub selected_thickness: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u32,
    pub item_count_display: String,
    pub subtotal: String,
    pub shipping: String,
    pub grand_total: String,
}

impl CartView {
    /// Build the localized view of a cart.
    #[must_use]
    pub fn from_cart(cart: &Cart, locale: Locale) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|item| CartItemView::from_item(item, locale))
                .collect(),
            item_count: cart.item_count(),
            item_count_display: format_quantity(cart.item_count(), locale),
            subtotal: format_price(&cart.total().to_string(), locale),
            shipping: format_price(&cart.shipping().to_string(), locale),
            grand_total: format_price(&cart.grand_total().to_string(), locale),
        }
    }
}

impl CartItemView {
    fn from_item(item: &CartItem, locale: Locale) -> Self {
        let unit_amount = UnitPrice::parse_opt(item.stone.price.as_deref()).amount();
        let line_total = unit_amount * Decimal::from(item.quantity);

        Self {
            id: item.id.clone(),
            stone_id: item.stone.id,
            name: match locale {
                Locale::En => item.stone.name_en.clone(),
                Locale::Fa => item.stone.name_fa.clone(),
            },
            category: match locale {
                Locale::En => item.stone.category_en.clone(),
                Locale::Fa => item.stone.category_fa.clone(),
            },
            quantity: item.quantity,
            quantity_display: format_quantity(item.quantity, locale),
            unit_price: format_price(&unit_amount.to_string(), locale),
            line_total: format_price(&line_total.to_string(), locale),
            selected_finish: item.selected_finish.clone(),
            selected_thickness: item.selected_thickness.clone(),
            notes: item.notes.clone(),
            image: item.stone.image.clone(),
        }
    }
}

/// Cart count badge data.
#[derive(Debug, Clone, Serialize)]
pub struct CartCountView {
    pub count: u32,
    pub display: String,
}

// =============================================================================
// Request Types
// =============================================================================

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub stone_id: StoneId,
    pub quantity: Option<u32>,
    #[serde(default)]
    pub finish: Option<String>,
    #[serde(default)]
    pub thickness: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Update cart request body. Quantities at or below zero remove the
/// line.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub item_id: String,
    pub quantity: i64,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub item_id: String,
}

// =============================================================================
// Handlers
// =============================================================================

/// Display cart contents.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    session: Session,
) -> Json<CartView> {
    let cart = state.cart().current(&session).await;
    Json(CartView::from_cart(&cart, locale))
}

/// Add an item to the cart.
///
/// The product snapshot carried on the line comes from the catalog, so
/// an unknown stone id is a 404 before the cart is touched.
#[instrument(skip(state, session, request), fields(stone_id = %request.stone_id))]
pub async fn add(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let remote = state.commerce().get_stone(request.stone_id).await?;
    let stone = stone_ref_from_remote(&remote);

    let options = LineOptions {
        finish: request.finish,
        thickness: request.thickness,
        notes: request.notes,
    };
    let cart = state
        .cart()
        .add_item(&session, stone, request.quantity.unwrap_or(1), options)
        .await;

    Ok(Json(CartView::from_cart(&cart, locale)))
}

/// Update a cart line's quantity.
#[instrument(skip(state, session, request), fields(item_id = %request.item_id))]
pub async fn update(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Json<CartView> {
    let cart = state
        .cart()
        .update_quantity(&session, &request.item_id, request.quantity)
        .await;
    Json(CartView::from_cart(&cart, locale))
}

/// Remove a line from the cart.
#[instrument(skip(state, session, request), fields(item_id = %request.item_id))]
pub async fn remove(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartView> {
    let cart = state.cart().remove_item(&session, &request.item_id).await;
    Json(CartView::from_cart(&cart, locale))
}

/// Empty the cart.
#[instrument(skip(state, session))]
pub async fn clear(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    session: Session,
) -> Json<CartView> {
    let cart = state.cart().clear(&session).await;
    Json(CartView::from_cart(&cart, locale))
}

/// Cart count badge.
#[instrument(skip(state, session))]
pub async fn count(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    session: Session,
) -> Json<CartCountView> {
    let count = state.cart().current(&session).await.item_count();
    Json(CartCountView {
        count,
        display: format_quantity(count, locale),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoneRef;

    fn cart_with_one_line() -> Cart {
        let mut cart = Cart::default();
        cart.merge_add(
            StoneRef {
                id: StoneId::new(1),
                name_en: "Silver Travertine".to_string(),
                name_fa: "تراورتن نقره‌ای".to_string(),
                price: Some("$85".to_string()),
                image: None,
                category_en: "Travertine".to_string(),
                category_fa: "تراورتن".to_string(),
            },
            2,
            LineOptions::default(),
        );
        cart
    }

    #[test]
    fn test_cart_view_en() {
        let view = CartView::from_cart(&cart_with_one_line(), Locale::En);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.subtotal, "$170.00");
        assert_eq!(view.shipping, "$50.00");
        assert_eq!(view.grand_total, "$220.00");

        let line = view.items.first().expect("one line");
        assert_eq!(line.name, "Silver Travertine");
        assert_eq!(line.unit_price, "$85.00");
        assert_eq!(line.line_total, "$170.00");
    }

    #[test]
    fn test_cart_view_fa_uses_persian_numerals() {
        let view = CartView::from_cart(&cart_with_one_line(), Locale::Fa);
        assert_eq!(view.item_count_display, "۲");

        let line = view.items.first().expect("one line");
        assert_eq!(line.name, "تراورتن نقره‌ای");
        // 85 USD -> 3,570,000 toman
        assert_eq!(line.unit_price, "۳,۵۷۰,۰۰۰ تومان");
    }

    #[test]
    fn test_empty_cart_view() {
        let view = CartView::from_cart(&Cart::default(), Locale::En);
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.shipping, "$0.00");
    }
}
