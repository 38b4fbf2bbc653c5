//! Domain models for the storefront.

pub mod cart;
pub mod session;

pub use cart::{Cart, CartItem, LineOptions, StoneRef};
pub use session::CurrentUser;
pub use session::keys as session_keys;
