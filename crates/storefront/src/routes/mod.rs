//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET   /health                  - Health check
//!
//! # Catalog
//! GET   /stones                  - Stone listing (?search= filters)
//! GET   /stones/featured         - Featured stones
//! GET   /stones/{id}             - Stone detail
//! GET   /projects                - Project gallery
//! GET   /projects/featured       - Featured projects
//! GET   /projects/{id}           - Project detail
//!
//! # Cart
//! GET   /cart                    - Cart contents
//! POST  /cart/add                - Add item
//! POST  /cart/update             - Update quantity (<= 0 removes)
//! POST  /cart/remove             - Remove item
//! POST  /cart/clear              - Empty the cart
//! GET   /cart/count              - Cart count badge
//!
//! # Checkout (requires auth)
//! GET   /checkout                - Open form, prefilled from profile
//! POST  /checkout/prefill        - Re-run the profile prefill
//! POST  /checkout                - Validate and submit; returns payment_url
//!
//! # Auth
//! POST  /auth/login              - Login (runs guest cart migration)
//! POST  /auth/register           - Register (runs guest cart migration)
//! POST  /auth/logout             - Logout
//!
//! # Account (requires auth)
//! GET   /account                 - Profile
//! PATCH /account                 - Profile update
//! GET   /account/orders          - Order history
//! GET   /account/orders/{id}     - Order detail
//!
//! # Quotes
//! POST  /quote                   - Submit a quote request (guests allowed)
//! GET   /quote                   - The customer's quotes (requires auth)
//!
//! # Language
//! GET   /language                - Current preference
//! PUT   /language                - Set preference
//! ```

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod language;
pub mod projects;
pub mod quote;
pub mod stones;

use axum::{
    Router,
    routing::{get, post, put},
};

use crate::state::AppState;

/// Create the stone catalog routes router.
pub fn stone_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(stones::index))
        .route("/featured", get(stones::featured))
        .route("/{id}", get(stones::show))
}

/// Create the project gallery routes router.
pub fn project_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(projects::index))
        .route("/featured", get(projects::featured))
        .route("/{id}", get(projects::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
        .route("/count", get(cart::count))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::open).post(checkout::submit))
        .route("/prefill", post(checkout::prefill))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create the account routes router.
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(account::profile).patch(account::update_profile))
        .route("/orders", get(account::orders))
        .route("/orders/{id}", get(account::order))
}

/// Create the quote routes router.
pub fn quote_routes() -> Router<AppState> {
    Router::new().route("/", post(quote::submit).get(quote::index))
}

/// Create the language routes router.
pub fn language_routes() -> Router<AppState> {
    Router::new().route("/", get(language::show).put(language::update))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/stones", stone_routes())
        .nest("/projects", project_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .nest("/auth", auth_routes())
        .nest("/account", account_routes())
        .nest("/quote", quote_routes())
        .nest("/language", language_routes())
}
