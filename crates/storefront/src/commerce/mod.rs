//! Commerce backend REST API client.
//!
//! # Architecture
//!
//! - Plain JSON over REST against the exporter's commerce backend
//! - The backend is source of truth for catalog, account carts and
//!   orders - NO local sync, direct API calls
//! - In-memory caching via `moka` for catalog reads (5 minute TTL);
//!   cart, order and profile calls are never cached
//! - Authenticated calls carry `Authorization: Token <token>`; without
//!   a token the header is omitted and the backend treats the request
//!   as anonymous
//!
//! # Example
//!
//! ```rust,ignore
//! use arta_stone_storefront::commerce::CommerceClient;
//!
//! let client = CommerceClient::new(&config.commerce)?;
//!
//! // Browse the catalog
//! let stones = client.list_stones().await?;
//!
//! // Mutate the account cart, then refetch the authoritative state
//! client.add_cart_item(token, &request).await?;
//! let cart = client.get_cart(token).await?;
//! ```

mod client;
pub mod conversions;
pub mod types;

pub use client::CommerceClient;

use reqwest::StatusCode;
use thiserror::Error;

/// Errors that can occur when talking to the commerce backend.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP transport failed (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The response body was expected to be JSON and wasn't.
    #[error("invalid JSON response from server: {source}")]
    InvalidJson {
        #[source]
        source: serde_json::Error,
        /// Leading bytes of the offending body, for diagnostics.
        snippet: String,
    },

    /// The backend rejected the request.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        /// Machine-readable error code, when the backend provides one.
        code: Option<String>,
        /// Human-readable message extracted from the error body.
        message: String,
    },

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),
}

impl CommerceError {
    /// HTTP status of a rejected request, if this is an API error.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Machine-readable error code, if the backend sent one.
    #[must_use]
    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Api { code, .. } => code.as_deref(),
            _ => None,
        }
    }
}

/// Build a [`CommerceError::Api`] from a non-success response body.
///
/// The backend (Django REST Framework style) reports errors in several
/// shapes. The human message is extracted by precedence: `error` →
/// `detail` → `message` → first `non_field_errors` entry → first object
/// key's value (array or scalar). Non-JSON or empty bodies fall back to
/// a plain `HTTP <status>` message. The optional machine-readable
/// `code` field is captured when present.
pub(crate) fn extract_api_error(status: StatusCode, body: &str) -> CommerceError {
    let fallback = format!("HTTP {}", status.as_u16());

    let Ok(value) = serde_json::from_str::<serde_json::Value>(body) else {
        return CommerceError::Api {
            status: status.as_u16(),
            code: None,
            message: fallback,
        };
    };

    let code = value
        .get("code")
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned);

    CommerceError::Api {
        status: status.as_u16(),
        code,
        message: extract_message(&value).unwrap_or(fallback),
    }
}

/// Pull the most specific human-readable message out of an error body.
fn extract_message(value: &serde_json::Value) -> Option<String> {
    for key in ["error", "detail", "message"] {
        if let Some(message) = value.get(key).and_then(serde_json::Value::as_str) {
            return Some(message.to_owned());
        }
    }

    if let Some(errors) = value.get("non_field_errors").and_then(serde_json::Value::as_array)
        && let Some(first) = errors.first()
    {
        return Some(scalar_to_message(first));
    }

    // Field-specific errors: take the first key's value
    let object = value.as_object()?;
    let (_, first_value) = object.iter().next()?;
    match first_value {
        serde_json::Value::Array(items) => items.first().map(scalar_to_message),
        other => Some(scalar_to_message(other)),
    }
}

fn scalar_to_message(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message_of(error: &CommerceError) -> &str {
        match error {
            CommerceError::Api { message, .. } => message,
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn test_extract_error_field() {
        let err = extract_api_error(StatusCode::BAD_REQUEST, r#"{"error": "Cart is empty"}"#);
        assert_eq!(message_of(&err), "Cart is empty");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn test_extract_detail_field() {
        let err = extract_api_error(
            StatusCode::UNAUTHORIZED,
            r#"{"detail": "Authentication credentials were not provided."}"#,
        );
        assert_eq!(
            message_of(&err),
            "Authentication credentials were not provided."
        );
    }

    #[test]
    fn test_extract_non_field_errors() {
        let err = extract_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"non_field_errors": ["Unable to log in with provided credentials."]}"#,
        );
        assert_eq!(
            message_of(&err),
            "Unable to log in with provided credentials."
        );
    }

    #[test]
    fn test_extract_first_field_error() {
        let err = extract_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"email": ["This field is required."]}"#,
        );
        assert_eq!(message_of(&err), "This field is required.");
    }

    #[test]
    fn test_extract_scalar_field_error() {
        let err = extract_api_error(StatusCode::BAD_REQUEST, r#"{"quantity": "must be positive"}"#);
        assert_eq!(message_of(&err), "must be positive");
    }

    #[test]
    fn test_extract_code_field() {
        let err = extract_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"code": "cart_empty", "error": "Cart is empty"}"#,
        );
        assert_eq!(err.code(), Some("cart_empty"));
    }

    #[test]
    fn test_non_json_body_falls_back_to_status() {
        let err = extract_api_error(StatusCode::BAD_GATEWAY, "<html>upstream down</html>");
        assert_eq!(message_of(&err), "HTTP 502");
        assert_eq!(err.code(), None);
    }

    #[test]
    fn test_error_precedence() {
        // `error` wins over `detail` and field errors
        let err = extract_api_error(
            StatusCode::BAD_REQUEST,
            r#"{"detail": "secondary", "error": "primary", "email": ["tertiary"]}"#,
        );
        assert_eq!(message_of(&err), "primary");
    }
}
