//! HTTP middleware and request extractors.

mod auth;
mod locale;
mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use locale::CurrentLocale;
pub use session::{SESSION_COOKIE_NAME, create_session_layer};
