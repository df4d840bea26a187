use axum::{extract::State, response::IntoResponse};
use serde::Deserialize;

use crate::{
    error::AppError,
    extract::{Path, Query},
    routes::AppState,
};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct IngredientQuery {
    pub name: Option<String>,
    pub search: Option<String>,
}

pub async fn tags(State(state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    Ok(axum::Json(state.recipe_query.tags().await?))
}

pub async fn tag(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    match state.recipe_query.find_tag(id).await? {
        Some(tag) => Ok(axum::Json(tag)),
        None => Err(AppError::NotFound),
    }
}

/// `name` is the documented filter; `search` is kept for older clients.
pub async fn ingredients(
    State(state): State<AppState>,
    Query(input): Query<IngredientQuery>,
) -> Result<impl IntoResponse, AppError> {
    let prefix = input
        .name
        .as_deref()
        .or(input.search.as_deref())
        .map(str::trim)
        .filter(|p| !p.is_empty());

    Ok(axum::Json(state.recipe_query.ingredients(prefix).await?))
}

pub async fn ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    match state.recipe_query.find_ingredient(id).await? {
        Some(ingredient) => Ok(axum::Json(ingredient)),
        None => Err(AppError::NotFound),
    }
}
