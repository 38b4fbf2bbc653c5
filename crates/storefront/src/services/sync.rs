//! One-shot migration of the guest cart into the account cart.
//!
//! Runs on the guest-to-authenticated transition. Lines are replayed
//! with sequential add-item calls - never in parallel, so the backend's
//! own merge logic cannot race against itself. A partial failure leaves
//! already-migrated lines server-side and keeps the remaining lines in
//! the guest cart; migration is a convenience, not a financial
//! operation, so there is no rollback.

use thiserror::Error;
use tower_sessions::Session;
use tracing::{info, instrument, warn};

use crate::commerce::types::AddItemRequest;
use crate::commerce::{CommerceClient, CommerceError};
use crate::models::{CartItem, session_keys};

/// A guest-cart migration that stopped partway.
#[derive(Debug, Error)]
#[error("guest cart sync stopped after {migrated} of {total} lines: {source}")]
pub struct SyncError {
    /// Lines successfully replayed before the failure.
    pub migrated: usize,
    /// Lines the guest cart held.
    pub total: usize,
    #[source]
    pub source: CommerceError,
}

/// Migrate the persisted guest cart into the account cart.
///
/// Gated twice against double-sync: the caller runs this once per login
/// transition, and a persisted session marker blocks replays across
/// rapid repeated transitions. The marker is cleared on logout.
///
/// Returns the number of migrated lines.
///
/// # Errors
///
/// Returns [`SyncError`] when a remote add fails partway; the guest
/// cart is kept so nothing is lost.
#[instrument(skip_all)]
pub async fn sync_guest_cart(
    session: &Session,
    commerce: &CommerceClient,
    token: &str,
) -> Result<usize, SyncError> {
    let already_synced = session
        .get::<bool>(session_keys::CART_SYNCED)
        .await
        .ok()
        .flatten()
        .unwrap_or(false);
    if already_synced {
        return Ok(0);
    }

    let items: Vec<CartItem> = session
        .get(session_keys::GUEST_CART)
        .await
        .ok()
        .flatten()
        .unwrap_or_default();

    let total = items.len();

    for (migrated, item) in items.iter().enumerate() {
        let request = AddItemRequest {
            stone_id: item.stone.id,
            quantity: item.quantity,
            selected_finish: item.selected_finish.clone().unwrap_or_default(),
            selected_thickness: item.selected_thickness.clone().unwrap_or_default(),
            notes: item.notes.clone().unwrap_or_default(),
        };
        if let Err(source) = commerce.add_cart_item(token, &request).await {
            warn!(
                migrated,
                total,
                error = %source,
                "guest cart sync stopped early; remaining lines stay local"
            );
            return Err(SyncError {
                migrated,
                total,
                source,
            });
        }
    }

    if let Err(e) = session.remove::<Vec<CartItem>>(session_keys::GUEST_CART).await {
        warn!(error = %e, "failed to delete guest cart after sync");
    }
    if let Err(e) = session.insert(session_keys::CART_SYNCED, true).await {
        warn!(error = %e, "failed to persist sync marker");
    }

    if total > 0 {
        info!(total, "guest cart migrated to account");
    }
    Ok(total)
}
