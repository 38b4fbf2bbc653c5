//! Session-stored types and the session key namespace.
//!
//! The session is the storefront's only local store: it holds the guest
//! cart, the language preference, the backend auth token and transient
//! checkout state. Everything else lives in the commerce backend.

use serde::{Deserialize, Serialize};

use arta_stone_core::UserId;

/// Session-stored identity for a logged-in customer.
///
/// Carries the backend API token plus a small profile snapshot used for
/// checkout prefill; the authoritative profile stays in the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub phone: Option<String>,
    /// Free-text postal address from the profile.
    pub address: Option<String>,
    /// Backend API token, sent as `Authorization: Token <token>`.
    pub token: String,
}

/// Session keys.
pub mod keys {
    /// Key for the current logged-in user (and backend token).
    pub const CURRENT_USER: &str = "current_user";

    /// Key for the guest cart lines (JSON array of `CartItem`).
    pub const GUEST_CART: &str = "stone_cart";

    /// Key for the snapshot of the last fetched account cart.
    pub const CART_SNAPSHOT: &str = "stone_cart_snapshot";

    /// Key for the one-shot guest-cart migration marker.
    pub const CART_SYNCED: &str = "cart_synced";

    /// Key for the persisted checkout flow state.
    pub const CHECKOUT_STATE: &str = "checkout_state";

    /// Key for the language preference.
    pub const LANGUAGE: &str = "language";
}
