//! Wire types for the commerce backend REST API.
//!
//! Response shapes mirror the backend's serializers; request shapes
//! mirror what its endpoints accept. Field names stay snake_case on the
//! wire, so no renames are needed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use arta_stone_core::{
    CartItemId, OrderId, OrderStatus, PaymentMethod, PaymentStatus, ProjectId, QuoteId,
    QuoteStatus, StoneId, UserId,
};

// =============================================================================
// Catalog
// =============================================================================

/// A stone category.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCategory {
    pub id: i32,
    pub name_en: String,
    pub name_fa: String,
    pub slug: String,
}

/// An image attached to a stone or project.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteImage {
    pub id: i32,
    pub image: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A stone product record.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteStone {
    pub id: StoneId,
    pub name_en: String,
    pub name_fa: String,
    pub description_en: String,
    pub description_fa: String,
    pub category: RemoteCategory,
    /// Display price string (e.g. `"$85"`); absent when quote-only.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,
    #[serde(default)]
    pub images: Vec<RemoteImage>,
    #[serde(default)]
    pub finishes: Vec<String>,
    #[serde(default)]
    pub thickness_options: Vec<String>,
    pub is_active: bool,
}

/// A completed reference project.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteProject {
    pub id: ProjectId,
    pub title_en: String,
    pub title_fa: String,
    pub description_en: String,
    pub description_fa: String,
    pub location_en: String,
    pub location_fa: String,
    pub category_en: String,
    pub category_fa: String,
    pub year: String,
    #[serde(default)]
    pub images: Vec<RemoteImage>,
    pub is_active: bool,
}

// =============================================================================
// Cart
// =============================================================================

/// A line in the account cart.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCartItem {
    pub id: CartItemId,
    pub stone: RemoteStone,
    pub quantity: u32,
    #[serde(default)]
    pub selected_finish: String,
    #[serde(default)]
    pub selected_thickness: String,
    #[serde(default)]
    pub notes: String,
}

/// The account cart.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteCart {
    pub id: i32,
    pub items: Vec<RemoteCartItem>,
    #[serde(default)]
    pub total_amount: Option<String>,
}

/// Payload for `POST /cart/add_item/`.
#[derive(Debug, Clone, Serialize)]
pub struct AddItemRequest {
    pub stone_id: StoneId,
    pub quantity: u32,
    pub selected_finish: String,
    pub selected_thickness: String,
    pub notes: String,
}

/// Payload for `POST /cart/update_item/`.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateItemRequest {
    pub item_id: CartItemId,
    pub quantity: u32,
}

/// Payload for `POST /cart/remove_item/`.
#[derive(Debug, Clone, Serialize)]
pub struct RemoveItemRequest {
    pub item_id: CartItemId,
}

// =============================================================================
// Checkout & Orders
// =============================================================================

/// Shipping fields collected at checkout; all required by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingInfo {
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub phone: String,
}

/// Payload for `POST /cart/checkout/`.
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub shipping: ShippingInfo,
    pub payment_type: PaymentMethod,
}

/// Response from `POST /cart/checkout/`: where to send the customer.
#[derive(Debug, Clone, Deserialize)]
pub struct CheckoutResponse {
    /// Gateway URL the browser must be navigated to.
    pub payment_url: String,
    /// Gateway transaction authority, when the gateway issues one.
    #[serde(default)]
    pub authority: Option<String>,
    /// The created order, when the backend includes it.
    #[serde(default)]
    pub order: Option<RemoteOrder>,
}

/// A line on a placed order.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOrderItem {
    pub id: i32,
    pub stone: RemoteStone,
    pub quantity: u32,
    /// Unit price captured at order time.
    pub price: String,
    #[serde(default)]
    pub selected_finish: String,
    #[serde(default)]
    pub selected_thickness: String,
    #[serde(default)]
    pub notes: String,
}

/// A placed order.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteOrder {
    pub id: OrderId,
    pub order_number: String,
    #[serde(default)]
    pub tracking_code: Option<String>,
    pub total_amount: String,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub shipping_address: String,
    pub shipping_city: String,
    pub shipping_postal_code: String,
    pub shipping_phone: String,
    #[serde(default)]
    pub items: Vec<RemoteOrderItem>,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Auth & Profile
// =============================================================================

/// A customer profile.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteUser {
    pub id: UserId,
    pub username: String,
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    /// Free-text postal address, used for checkout prefill.
    #[serde(default)]
    pub address: Option<String>,
}

/// Response from the login and register endpoints.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<RemoteUser>,
}

/// Payload for `POST /auth/login/`.
///
/// The backend authenticates by username; the storefront uses the email
/// address as the username.
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Payload for `POST /register/`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
    pub first_name: String,
    pub last_name: String,
}

/// Payload for `PATCH /users/profile/`. Only set fields are sent.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

// =============================================================================
// Quotes
// =============================================================================

/// A line on a quote request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteItem {
    pub stone_id: StoneId,
    pub quantity: u32,
    #[serde(default)]
    pub notes: String,
}

/// Payload for `POST /quotes/submit_quote/`.
#[derive(Debug, Clone, Serialize)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub project_type: String,
    pub project_location: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<QuoteItem>,
}

/// A submitted quote request.
#[derive(Debug, Clone, Deserialize)]
pub struct RemoteQuote {
    pub id: QuoteId,
    pub name: String,
    pub email: String,
    pub company: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub project_type: String,
    pub project_location: String,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}
