//! Stone catalog route handlers.
//!
//! Thin localized views over the backend catalog; responses are cached
//! upstream in the commerce client.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use arta_stone_core::locale::{format_price, format_price_with_unit, format_technical_value};
use arta_stone_core::{Locale, StoneId};

use crate::commerce::types::RemoteStone;
use crate::error::Result;
use crate::middleware::CurrentLocale;
use crate::state::AppState;

/// Localized stone display data.
#[derive(Debug, Clone, Serialize)]
pub struct StoneView {
    pub id: StoneId,
    pub name: String,
    pub description: String,
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    /// Localized display price, when the stone is priced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Localized price per square meter, when the stone is priced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<String>,
    pub images: Vec<String>,
    pub finishes: Vec<String>,
    pub thickness_options: Vec<String>,
}

impl StoneView {
    /// Build the localized view of a catalog record.
    #[must_use]
    pub fn from_remote(stone: &RemoteStone, locale: Locale) -> Self {
        Self {
            id: stone.id,
            name: match locale {
                Locale::En => stone.name_en.clone(),
                Locale::Fa => stone.name_fa.clone(),
            },
            description: match locale {
                Locale::En => stone.description_en.clone(),
                Locale::Fa => stone.description_fa.clone(),
            },
            category: match locale {
                Locale::En => stone.category.name_en.clone(),
                Locale::Fa => stone.category.name_fa.clone(),
            },
            origin: stone.origin.clone(),
            price: stone
                .price
                .as_deref()
                .map(|price| format_price(price, locale)),
            price_per_unit: stone
                .price
                .as_deref()
                .map(|price| format_price_with_unit(price, locale, "m²")),
            images: stone.images.iter().map(|image| image.image.clone()).collect(),
            finishes: stone.finishes.clone(),
            thickness_options: stone
                .thickness_options
                .iter()
                .map(|value| format_technical_value(value, locale))
                .collect(),
        }
    }
}

/// Catalog listing query parameters.
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub search: Option<String>,
}

/// List the catalog, optionally filtered by a search query.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Query(query): Query<CatalogQuery>,
) -> Result<Json<Vec<StoneView>>> {
    let stones = match query.search.as_deref().map(str::trim) {
        Some(search) if !search.is_empty() => state.commerce().search_stones(search).await?,
        _ => state.commerce().list_stones().await?,
    };

    Ok(Json(
        stones
            .iter()
            .map(|stone| StoneView::from_remote(stone, locale))
            .collect(),
    ))
}

/// Stone detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(id): Path<i32>,
) -> Result<Json<StoneView>> {
    let stone = state.commerce().get_stone(StoneId::new(id)).await?;
    Ok(Json(StoneView::from_remote(&stone, locale)))
}

/// Featured stones for the home page.
#[instrument(skip(state))]
pub async fn featured(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
) -> Result<Json<Vec<StoneView>>> {
    let stones = state.commerce().featured_stones().await?;
    Ok(Json(
        stones
            .iter()
            .map(|stone| StoneView::from_remote(stone, locale))
            .collect(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commerce::types::RemoteCategory;

    fn remote_stone() -> RemoteStone {
        RemoteStone {
            id: StoneId::new(4),
            name_en: "Silver Travertine".to_string(),
            name_fa: "تراورتن نقره‌ای".to_string(),
            description_en: "Classic silver-grey travertine.".to_string(),
            description_fa: "تراورتن نقره‌ای کلاسیک.".to_string(),
            category: RemoteCategory {
                id: 1,
                name_en: "Travertine".to_string(),
                name_fa: "تراورتن".to_string(),
                slug: "travertine".to_string(),
            },
            price: Some("$85".to_string()),
            origin: Some("Isfahan".to_string()),
            images: vec![],
            finishes: vec!["polished".to_string()],
            thickness_options: vec!["20mm".to_string(), "30mm".to_string()],
            is_active: true,
        }
    }

    #[test]
    fn test_stone_view_en() {
        let view = StoneView::from_remote(&remote_stone(), Locale::En);
        assert_eq!(view.name, "Silver Travertine");
        assert_eq!(view.price.as_deref(), Some("$85.00"));
        assert_eq!(view.price_per_unit.as_deref(), Some("$85.00/m²"));
        assert_eq!(view.thickness_options, vec!["20mm", "30mm"]);
    }

    #[test]
    fn test_stone_view_fa() {
        let view = StoneView::from_remote(&remote_stone(), Locale::Fa);
        assert_eq!(view.name, "تراورتن نقره‌ای");
        assert_eq!(view.price.as_deref(), Some("۳,۵۷۰,۰۰۰ تومان"));
        assert_eq!(
            view.price_per_unit.as_deref(),
            Some("۳,۵۷۰,۰۰۰ تومان/متر مربع")
        );
        assert_eq!(view.thickness_options, vec!["۲۰mm", "۳۰mm"]);
    }
}
