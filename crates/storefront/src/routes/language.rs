//! Language preference route handlers.
//!
//! The preference is a per-visitor session value; every localized view
//! in the other route modules reads it through the `CurrentLocale`
//! extractor.

use axum::Json;
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use arta_stone_core::Locale;

use crate::error::{AppError, Result};
use crate::middleware::CurrentLocale;
use crate::models::session_keys;

/// Language preference body/response.
#[derive(Debug, Serialize, Deserialize)]
pub struct LanguageBody {
    pub language: String,
}

/// Current language preference.
#[instrument(skip_all)]
pub async fn show(CurrentLocale(locale): CurrentLocale) -> Json<LanguageBody> {
    Json(LanguageBody {
        language: locale.as_str().to_owned(),
    })
}

/// Set the language preference.
#[instrument(skip(session))]
pub async fn update(session: Session, Json(body): Json<LanguageBody>) -> Result<Json<LanguageBody>> {
    let locale: Locale = body.language.parse().map_err(AppError::BadRequest)?;

    session
        .insert(session_keys::LANGUAGE, locale.as_str())
        .await?;

    Ok(Json(LanguageBody {
        language: locale.as_str().to_owned(),
    }))
}
