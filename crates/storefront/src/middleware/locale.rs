//! Locale extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use tower_sessions::Session;

use arta_stone_core::Locale;

use crate::models::session_keys;

/// Extractor for the visitor's language preference.
///
/// Reads the session's language key; missing or unreadable values fall
/// back to the base locale (English).
pub struct CurrentLocale(pub Locale);

impl<S> FromRequestParts<S> for CurrentLocale
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let locale = match parts.extensions.get::<Session>() {
            Some(session) => session
                .get::<String>(session_keys::LANGUAGE)
                .await
                .ok()
                .flatten()
                .and_then(|value| value.parse().ok())
                .unwrap_or_default(),
            None => Locale::default(),
        };

        Ok(Self(locale))
    }
}
