//! Quote-request route handlers.
//!
//! Export orders are usually negotiated, so the quote form is open to
//! guests; a logged-in customer's token associates the quote with their
//! account.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use arta_stone_core::{QuoteId, QuoteStatus, StoneId};

use crate::commerce::types::{QuoteItem, QuoteRequest, RemoteQuote};
use crate::error::Result;
use crate::middleware::{OptionalAuth, RequireAuth};
use crate::state::AppState;

// =============================================================================
// Request & Response Types
// =============================================================================

/// A line on a quote submission.
#[derive(Debug, Deserialize)]
pub struct QuoteItemBody {
    pub stone_id: StoneId,
    pub quantity: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Quote submission body.
#[derive(Debug, Deserialize)]
pub struct QuoteBody {
    pub name: String,
    pub email: String,
    pub company: String,
    #[serde(default)]
    pub phone: Option<String>,
    pub project_type: String,
    pub project_location: String,
    #[serde(default)]
    pub timeline: Option<String>,
    #[serde(default)]
    pub additional_notes: Option<String>,
    #[serde(default)]
    pub items: Vec<QuoteItemBody>,
}

/// Response for quote submission.
#[derive(Debug, Serialize)]
pub struct QuoteResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quote_id: Option<QuoteId>,
}

/// A submitted quote, as shown in the customer's history.
#[derive(Debug, Serialize)]
pub struct QuoteView {
    pub id: QuoteId,
    pub company: String,
    pub project_type: String,
    pub project_location: String,
    pub status: QuoteStatus,
    pub created_at: DateTime<Utc>,
}

impl QuoteView {
    fn from_remote(quote: &RemoteQuote) -> Self {
        Self {
            id: quote.id,
            company: quote.company.clone(),
            project_type: quote.project_type.clone(),
            project_location: quote.project_location.clone(),
            status: quote.status,
            created_at: quote.created_at,
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Submit a quote request.
#[instrument(skip(state, auth, body), fields(email = %body.email))]
pub async fn submit(
    State(state): State<AppState>,
    OptionalAuth(auth): OptionalAuth,
    Json(body): Json<QuoteBody>,
) -> impl IntoResponse {
    let email = body.email.trim().to_lowercase();

    if !is_valid_email(&email) {
        return (
            StatusCode::BAD_REQUEST,
            Json(QuoteResponse {
                success: false,
                message: Some("Please enter a valid email address.".to_string()),
                quote_id: None,
            }),
        );
    }

    for (value, label) in [
        (&body.name, "name"),
        (&body.company, "company"),
        (&body.project_type, "project type"),
        (&body.project_location, "project location"),
    ] {
        if value.trim().is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(QuoteResponse {
                    success: false,
                    message: Some(format!("The {label} field is required.")),
                    quote_id: None,
                }),
            );
        }
    }

    let request = QuoteRequest {
        name: body.name.trim().to_owned(),
        email,
        company: body.company.trim().to_owned(),
        phone: body.phone,
        project_type: body.project_type.trim().to_owned(),
        project_location: body.project_location.trim().to_owned(),
        timeline: body.timeline,
        additional_notes: body.additional_notes,
        items: body
            .items
            .into_iter()
            .map(|item| QuoteItem {
                stone_id: item.stone_id,
                quantity: item.quantity.max(1),
                notes: item.notes.unwrap_or_default(),
            })
            .collect(),
    };

    let token = auth.map(|user| user.token);
    match state.commerce().submit_quote(token.as_deref(), &request).await {
        Ok(quote) => (
            StatusCode::OK,
            Json(QuoteResponse {
                success: true,
                message: None,
                quote_id: Some(quote.id),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "failed to submit quote");
            (
                StatusCode::BAD_GATEWAY,
                Json(QuoteResponse {
                    success: false,
                    message: Some("Something went wrong. Please try again.".to_string()),
                    quote_id: None,
                }),
            )
        }
    }
}

/// The customer's quote history.
#[instrument(skip(state, user))]
pub async fn index(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<Vec<QuoteView>>> {
    let quotes = state.commerce().list_quotes(&user.token).await?;
    Ok(Json(quotes.iter().map(QuoteView::from_remote).collect()))
}

/// Basic email validation.
fn is_valid_email(email: &str) -> bool {
    let mut parts = email.splitn(2, '@');
    let Some(local) = parts.next() else {
        return false;
    };
    let Some(domain) = parts.next() else {
        return false;
    };
    !local.is_empty() && !domain.is_empty() && domain.contains('.')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_email() {
        assert!(is_valid_email("buyer@example.com"));
        assert!(!is_valid_email("buyer"));
        assert!(!is_valid_email("buyer@"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("buyer@nodot"));
    }
}
