//! Cart store abstracting over guest and account backing.
//!
//! Guest carts live in the visitor's session under a fixed key and are
//! rewritten after every mutation. Account carts are owned by the
//! commerce backend: every mutation issues the remote call and then
//! refetches the authoritative cart - no optimistic merge. A snapshot
//! of the last fetched account cart is kept in the session so a remote
//! failure can serve stale-but-consistent state instead of an empty
//! cart.
//!
//! Remote failures are caught and logged here; cart operations never
//! propagate them. There is no automatic retry.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::Mutex as AsyncMutex;
use tower_sessions::Session;
use tracing::{error, instrument, warn};

use arta_stone_core::CartItemId;

use crate::commerce::types::{AddItemRequest, RemoveItemRequest, UpdateItemRequest};
use crate::commerce::{CommerceClient, CommerceError, conversions};
use crate::models::{Cart, CartItem, CurrentUser, LineOptions, StoneRef, session_keys};

/// Which backing store the cart uses for the current request.
///
/// Resolved from the session once per operation: a stored backend token
/// selects account mode, otherwise the visitor is a guest.
#[derive(Debug, Clone)]
pub enum CartMode {
    Guest,
    Account(String),
}

impl CartMode {
    /// Resolve the mode from the session.
    pub async fn resolve(session: &Session) -> Self {
        match session.get::<CurrentUser>(session_keys::CURRENT_USER).await {
            Ok(Some(user)) => Self::Account(user.token),
            Ok(None) => Self::Guest,
            Err(e) => {
                warn!(error = %e, "failed to read session user, treating as guest");
                Self::Guest
            }
        }
    }
}

/// Single source of truth for cart contents.
#[derive(Clone)]
pub struct CartService {
    commerce: CommerceClient,
    /// Per-session mutation locks. Serializes read-modify-write (guest)
    /// and mutate-then-refetch (account) sequences so two rapid clicks
    /// cannot lose an update.
    locks: Arc<Mutex<HashMap<String, Arc<AsyncMutex<()>>>>>,
}

impl CartService {
    /// Create a new cart service.
    #[must_use]
    pub fn new(commerce: CommerceClient) -> Self {
        Self {
            commerce,
            locks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn lock_for(&self, session: &Session) -> Arc<AsyncMutex<()>> {
        let key = session
            .id()
            .map_or_else(|| "anonymous".to_owned(), |id| id.to_string());
        let mut map = self.locks.lock().expect("cart lock map poisoned");
        map.entry(key)
            .or_insert_with(|| Arc::new(AsyncMutex::new(())))
            .clone()
    }

    /// Current cart contents.
    ///
    /// Guest: reloaded from the session (corrupt data is logged and
    /// treated as empty, never an error). Account: fetched from the
    /// backend; on failure the last snapshot is served.
    #[instrument(skip_all)]
    pub async fn current(&self, session: &Session) -> Cart {
        match CartMode::resolve(session).await {
            CartMode::Guest => load_guest_cart(session).await,
            CartMode::Account(token) => match self.fetch_account_cart(&token, session).await {
                Ok(cart) => cart,
                Err(e) => {
                    warn!(error = %e, "failed to fetch account cart, serving snapshot");
                    load_snapshot(session).await
                }
            },
        }
    }

    /// Add a stone to the cart.
    ///
    /// Guest lines with the same (stone, finish, thickness) key are
    /// merged; the account backend applies the same rule server-side.
    #[instrument(skip(self, session, stone, options), fields(stone_id = %stone.id))]
    pub async fn add_item(
        &self,
        session: &Session,
        stone: StoneRef,
        quantity: u32,
        options: LineOptions,
    ) -> Cart {
        let lock = self.lock_for(session);
        let _guard = lock.lock().await;

        match CartMode::resolve(session).await {
            CartMode::Guest => {
                let mut cart = load_guest_cart(session).await;
                cart.merge_add(stone, quantity, options);
                store_guest_cart(session, &cart).await;
                cart
            }
            CartMode::Account(token) => {
                let request = AddItemRequest {
                    stone_id: stone.id,
                    quantity: quantity.max(1),
                    selected_finish: options.finish.unwrap_or_default(),
                    selected_thickness: options.thickness.unwrap_or_default(),
                    notes: options.notes.unwrap_or_default(),
                };
                match self.commerce.add_cart_item(&token, &request).await {
                    Ok(_) => self.refetch_or_snapshot(&token, session).await,
                    Err(e) => {
                        error!(error = %e, "failed to add item to account cart");
                        load_snapshot(session).await
                    }
                }
            }
        }
    }

    /// Set a line's quantity. Zero or negative removes the line.
    #[instrument(skip(self, session))]
    pub async fn update_quantity(&self, session: &Session, item_id: &str, quantity: i64) -> Cart {
        let quantity = u32::try_from(quantity).unwrap_or(0);
        if quantity == 0 {
            return self.remove_item(session, item_id).await;
        }

        let lock = self.lock_for(session);
        let _guard = lock.lock().await;

        match CartMode::resolve(session).await {
            CartMode::Guest => {
                let mut cart = load_guest_cart(session).await;
                cart.set_quantity(item_id, quantity);
                store_guest_cart(session, &cart).await;
                cart
            }
            CartMode::Account(token) => {
                let Some(remote_id) = parse_remote_id(item_id) else {
                    return self.refetch_or_snapshot(&token, session).await;
                };
                let request = UpdateItemRequest {
                    item_id: remote_id,
                    quantity,
                };
                if let Err(e) = self.commerce.update_cart_item(&token, &request).await {
                    error!(error = %e, "failed to update account cart item");
                    return load_snapshot(session).await;
                }
                self.refetch_or_snapshot(&token, session).await
            }
        }
    }

    /// Remove a line from the cart.
    #[instrument(skip(self, session))]
    pub async fn remove_item(&self, session: &Session, item_id: &str) -> Cart {
        let lock = self.lock_for(session);
        let _guard = lock.lock().await;

        match CartMode::resolve(session).await {
            CartMode::Guest => {
                let mut cart = load_guest_cart(session).await;
                cart.remove(item_id);
                store_guest_cart(session, &cart).await;
                cart
            }
            CartMode::Account(token) => {
                let Some(remote_id) = parse_remote_id(item_id) else {
                    return self.refetch_or_snapshot(&token, session).await;
                };
                let request = RemoveItemRequest { item_id: remote_id };
                if let Err(e) = self.commerce.remove_cart_item(&token, &request).await {
                    error!(error = %e, "failed to remove account cart item");
                    return load_snapshot(session).await;
                }
                self.refetch_or_snapshot(&token, session).await
            }
        }
    }

    /// Empty the cart.
    #[instrument(skip_all)]
    pub async fn clear(&self, session: &Session) -> Cart {
        let lock = self.lock_for(session);
        let _guard = lock.lock().await;

        match CartMode::resolve(session).await {
            CartMode::Guest => {
                if let Err(e) = session.remove::<Vec<CartItem>>(session_keys::GUEST_CART).await {
                    error!(error = %e, "failed to clear guest cart from session");
                }
                Cart::default()
            }
            CartMode::Account(token) => {
                if let Err(e) = self.commerce.clear_cart(&token).await {
                    error!(error = %e, "failed to clear account cart");
                    return load_snapshot(session).await;
                }
                self.refetch_or_snapshot(&token, session).await
            }
        }
    }

    /// Fetch the account cart and refresh the session snapshot.
    async fn fetch_account_cart(
        &self,
        token: &str,
        session: &Session,
    ) -> Result<Cart, CommerceError> {
        let remote = self.commerce.get_cart(token).await?;
        let cart = conversions::cart_from_remote(remote);
        if let Err(e) = session
            .insert(session_keys::CART_SNAPSHOT, &cart.items)
            .await
        {
            error!(error = %e, "failed to store cart snapshot in session");
        }
        Ok(cart)
    }

    /// Authoritative refetch after a mutation; falls back to the
    /// snapshot when the refetch itself fails.
    async fn refetch_or_snapshot(&self, token: &str, session: &Session) -> Cart {
        match self.fetch_account_cart(token, session).await {
            Ok(cart) => cart,
            Err(e) => {
                warn!(error = %e, "failed to refetch account cart after mutation");
                load_snapshot(session).await
            }
        }
    }
}

/// Load the guest cart from the session; corrupt data is logged and
/// treated as empty.
async fn load_guest_cart(session: &Session) -> Cart {
    match session.get::<Vec<CartItem>>(session_keys::GUEST_CART).await {
        Ok(Some(items)) => Cart::new(items),
        Ok(None) => Cart::default(),
        Err(e) => {
            warn!(error = %e, "corrupt guest cart in session, starting empty");
            Cart::default()
        }
    }
}

/// Persist the guest cart after a mutation.
async fn store_guest_cart(session: &Session, cart: &Cart) {
    if let Err(e) = session.insert(session_keys::GUEST_CART, &cart.items).await {
        error!(error = %e, "failed to persist guest cart to session");
    }
}

/// Load the last account-cart snapshot; missing or corrupt data is an
/// empty cart.
async fn load_snapshot(session: &Session) -> Cart {
    match session
        .get::<Vec<CartItem>>(session_keys::CART_SNAPSHOT)
        .await
    {
        Ok(Some(items)) => Cart::new(items),
        Ok(None) => Cart::default(),
        Err(e) => {
            warn!(error = %e, "corrupt cart snapshot in session, starting empty");
            Cart::default()
        }
    }
}

/// Account line ids are backend-assigned integers; guest UUIDs (or
/// anything else) do not resolve to a remote line.
fn parse_remote_id(item_id: &str) -> Option<CartItemId> {
    match item_id.parse::<i32>() {
        Ok(id) => Some(CartItemId::new(id)),
        Err(_) => {
            warn!(item_id, "cart item id is not a backend id, skipping remote call");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_remote_id() {
        assert_eq!(parse_remote_id("12"), Some(CartItemId::new(12)));
        assert_eq!(parse_remote_id("e58ed763-928c-4155-bee9-fdbaaadc15f3"), None);
    }
}
