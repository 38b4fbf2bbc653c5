//! Authentication route handlers.
//!
//! Credentials are verified by the commerce backend, which returns an
//! API token; the storefront keeps that token in the session. The
//! guest-to-account cart migration runs exactly once per login
//! transition, here, after the session user is established.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::commerce::types::{RegisterRequest, RemoteUser};
use crate::error::{AppError, Result};
use crate::middleware::{clear_current_user, set_current_user};
use crate::models::{CartItem, CurrentUser, session_keys};
use crate::services::{CheckoutState, sync_guest_cart};
use crate::state::AppState;

use super::account::UserView;

// =============================================================================
// Request & Response Types
// =============================================================================

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginBody {
    pub email: String,
    pub password: String,
}

/// Registration request body.
#[derive(Debug, Deserialize)]
pub struct RegisterBody {
    pub email: String,
    pub password: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: Option<String>,
}

/// Successful login/registration response.
#[derive(Debug, Serialize)]
pub struct AuthView {
    pub user: UserView,
    /// Guest cart lines migrated into the account cart.
    pub migrated_items: usize,
}

/// Logout response.
#[derive(Debug, Serialize)]
pub struct LogoutView {
    pub success: bool,
}

// =============================================================================
// Handlers
// =============================================================================

/// Establish the session user, then run the one-shot guest cart
/// migration and warm the account cart snapshot.
async fn complete_login(
    state: &AppState,
    session: &Session,
    token: String,
    profile: RemoteUser,
) -> Result<AuthView> {
    let user = CurrentUser {
        id: profile.id,
        email: profile.email.clone(),
        name: format!("{} {}", profile.first_name, profile.last_name)
            .trim()
            .to_owned(),
        phone: profile.phone.clone(),
        address: profile.address.clone(),
        token: token.clone(),
    };
    set_current_user(session, &user).await?;

    // Migration failures must not fail the login: already-migrated
    // lines stay server-side, the rest stay in the guest cart.
    let migrated_items = match sync_guest_cart(session, state.commerce(), &token).await {
        Ok(count) => count,
        Err(e) => {
            tracing::warn!(error = %e, "guest cart migration incomplete");
            e.migrated
        }
    };

    // Authoritative refetch; also warms the session snapshot.
    let _ = state.cart().current(session).await;

    Ok(AuthView {
        user: UserView::from_remote(&profile),
        migrated_items,
    })
}

/// Log in with email and password.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<LoginBody>,
) -> Result<Json<AuthView>> {
    let email = body.email.trim().to_lowercase();
    let response = state.commerce().login(&email, &body.password).await?;

    let profile = match response.user {
        Some(user) => user,
        None => state.commerce().get_profile(&response.token).await?,
    };

    let view = complete_login(&state, &session, response.token, profile).await?;
    Ok(Json(view))
}

/// Register a new customer account.
#[instrument(skip(state, session, body), fields(email = %body.email))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<RegisterBody>,
) -> Result<Json<AuthView>> {
    let email = body.email.trim().to_lowercase();
    if body.first_name.trim().is_empty() {
        return Err(AppError::BadRequest("first name is required".to_string()));
    }

    let request = RegisterRequest {
        username: email.clone(),
        email: email.clone(),
        password: body.password.clone(),
        password_confirm: body.password,
        first_name: body.first_name.trim().to_owned(),
        last_name: body.last_name.unwrap_or_default().trim().to_owned(),
    };
    let response = state.commerce().register(&request).await?;

    let profile = match response.user {
        Some(user) => user,
        None => state.commerce().get_profile(&response.token).await?,
    };

    let view = complete_login(&state, &session, response.token, profile).await?;
    Ok(Json(view))
}

/// Log out: drop the user, the cart snapshot, the sync marker and any
/// checkout state. The next login transition syncs the guest cart
/// again.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Json<LogoutView>> {
    clear_current_user(&session).await?;

    let _ = session
        .remove::<Vec<CartItem>>(session_keys::CART_SNAPSHOT)
        .await;
    let _ = session.remove::<bool>(session_keys::CART_SYNCED).await;
    let _ = session
        .remove::<CheckoutState>(session_keys::CHECKOUT_STATE)
        .await;

    Ok(Json(LogoutView { success: true }))
}
