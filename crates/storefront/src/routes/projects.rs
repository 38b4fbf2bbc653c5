//! Reference project gallery route handlers.

use axum::{
    Json,
    extract::{Path, State},
};
use serde::Serialize;
use tracing::instrument;

use arta_stone_core::locale::format_technical_value;
use arta_stone_core::{Locale, ProjectId};

use crate::commerce::types::RemoteProject;
use crate::error::Result;
use crate::middleware::CurrentLocale;
use crate::state::AppState;

/// Localized project display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectView {
    pub id: ProjectId,
    pub title: String,
    pub description: String,
    pub location: String,
    pub category: String,
    pub year: String,
    pub images: Vec<String>,
}

impl ProjectView {
    /// Build the localized view of a project record.
    #[must_use]
    pub fn from_remote(project: &RemoteProject, locale: Locale) -> Self {
        Self {
            id: project.id,
            title: match locale {
                Locale::En => project.title_en.clone(),
                Locale::Fa => project.title_fa.clone(),
            },
            description: match locale {
                Locale::En => project.description_en.clone(),
                Locale::Fa => project.description_fa.clone(),
            },
            location: match locale {
                Locale::En => project.location_en.clone(),
                Locale::Fa => project.location_fa.clone(),
            },
            category: match locale {
                Locale::En => project.category_en.clone(),
                Locale::Fa => project.category_fa.clone(),
            },
            year: format_technical_value(&project.year, locale),
            images: project
                .images
                .iter()
                .map(|image| image.image.clone())
                .collect(),
        }
    }
}

/// List the project gallery.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
) -> Result<Json<Vec<ProjectView>>> {
    let projects = state.commerce().list_projects().await?;
    Ok(Json(
        projects
            .iter()
            .map(|project| ProjectView::from_remote(project, locale))
            .collect(),
    ))
}

/// Project detail.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
    Path(id): Path<i32>,
) -> Result<Json<ProjectView>> {
    let project = state.commerce().get_project(ProjectId::new(id)).await?;
    Ok(Json(ProjectView::from_remote(&project, locale)))
}

/// Featured projects for the home page.
#[instrument(skip(state))]
pub async fn featured(
    State(state): State<AppState>,
    CurrentLocale(locale): CurrentLocale,
) -> Result<Json<Vec<ProjectView>>> {
    let projects = state.commerce().featured_projects().await?;
    Ok(Json(
        projects
            .iter()
            .map(|project| ProjectView::from_remote(project, locale))
            .collect(),
    ))
}
