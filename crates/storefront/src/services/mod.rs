//! Business services: cart store, guest-cart migration, checkout flow.

pub mod cart;
pub mod checkout;
pub mod sync;

pub use cart::{CartMode, CartService};
pub use checkout::{CheckoutErrorKind, CheckoutFlow, CheckoutState, ShippingField, ShippingForm};
pub use sync::{SyncError, sync_guest_cart};
