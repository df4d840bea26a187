use axum::{
    extract::{RawQuery, State},
    http::{
        StatusCode,
        header::{CONTENT_DISPOSITION, CONTENT_TYPE},
    },
    response::IntoResponse,
};
use foodgram_recipe::{RecipeFilter, RecipeInput, RecipeView, ShortRecipeView};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthUser, Viewer},
    error::AppError,
    extract::{self, Json, Path, Query},
    pagination::{PageResponse, page_args},
    routes::{AppState, recipe_image_url},
};

const SHOPPING_CART_FILENAME: &str = "shopping_cart.txt";

#[derive(Serialize)]
pub struct RecipeResponse {
    #[serde(flatten)]
    pub recipe: RecipeView,
    pub image: String,
}

impl RecipeResponse {
    fn new(recipe: RecipeView, base_url: &str) -> Self {
        Self {
            image: recipe_image_url(base_url, recipe.id),
            recipe,
        }
    }
}

#[derive(Serialize)]
pub struct ShortRecipeResponse {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

impl ShortRecipeResponse {
    fn new(recipe: ShortRecipeView, base_url: &str) -> Self {
        Self {
            image: recipe_image_url(base_url, recipe.id),
            id: recipe.id,
            name: recipe.name,
            cooking_time: recipe.cooking_time,
        }
    }
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RecipeListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub author: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "extract::flag")]
    pub is_favorited: Option<bool>,
    #[serde(default, deserialize_with = "extract::flag")]
    pub is_in_shopping_cart: Option<bool>,
}

impl From<RecipeListQuery> for RecipeFilter {
    fn from(value: RecipeListQuery) -> Self {
        Self {
            author: value.author,
            tags: value.tags,
            is_favorited: value.is_favorited,
            is_in_shopping_cart: value.is_in_shopping_cart,
        }
    }
}

pub async fn list(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(input): Query<RecipeListQuery>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    let args = page_args(input.page, input.limit, &state.config.pagination);
    let page = state
        .recipe_query
        .filter(viewer.id(), input.into(), args)
        .await?;

    let base_url = &state.config.server.base_url;
    let page = page.map(|recipe| RecipeResponse::new(recipe, base_url));

    Ok(axum::Json(PageResponse::new(
        page,
        base_url,
        "/api/recipes/",
        query.as_deref(),
    )))
}

pub async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let Some(recipe) = state.recipe_query.find(viewer.id(), id).await? else {
        return Err(AppError::NotFound);
    };

    Ok(axum::Json(RecipeResponse::new(
        recipe,
        &state.config.server.base_url,
    )))
}

#[tracing::instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.recipe_command.create(session.user_id, input).await?;

    let Some(recipe) = state.recipe_query.find(Some(session.user_id), id).await? else {
        return Err(AppError::NotFound);
    };

    Ok((
        StatusCode::CREATED,
        axum::Json(RecipeResponse::new(
            recipe,
            &state.config.server.base_url,
        )),
    ))
}

#[tracing::instrument(skip_all)]
pub async fn update(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(id): Path<i64>,
    Json(input): Json<RecipeInput>,
) -> Result<impl IntoResponse, AppError> {
    state
        .recipe_command
        .update(session.actor(), id, input)
        .await?;

    let Some(recipe) = state.recipe_query.find(Some(session.user_id), id).await? else {
        return Err(AppError::NotFound);
    };

    Ok(axum::Json(RecipeResponse::new(
        recipe,
        &state.config.server.base_url,
    )))
}

#[tracing::instrument(skip_all)]
pub async fn delete(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.recipe_command.delete(session.actor(), id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn short_recipe(state: &AppState, id: i64) -> Result<ShortRecipeResponse, AppError> {
    let Some(recipe) = state.recipe_query.find_short(id).await? else {
        return Err(AppError::NotFound);
    };

    Ok(ShortRecipeResponse::new(
        recipe,
        &state.config.server.base_url,
    ))
}

#[tracing::instrument(skip_all)]
pub async fn favorite(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .recipe_command
        .favorite
        .save(session.user_id, id)
        .await?;

    Ok((StatusCode::CREATED, axum::Json(short_recipe(&state, id).await?)))
}

#[tracing::instrument(skip_all)]
pub async fn unfavorite(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .recipe_command
        .favorite
        .unsave(session.user_id, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

#[tracing::instrument(skip_all)]
pub async fn add_to_cart(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.shopping_command.add(session.user_id, id).await?;

    Ok((StatusCode::CREATED, axum::Json(short_recipe(&state, id).await?)))
}

#[tracing::instrument(skip_all)]
pub async fn remove_from_cart(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state.shopping_command.remove(session.user_id, id).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Plain-text shopping list of every recipe in the cart, summed per ingredient.
#[tracing::instrument(skip_all)]
pub async fn download_shopping_cart(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let body = state.shopping_query.export(session.user_id).await?;

    Ok((
        [
            (CONTENT_TYPE, "text/plain; charset=UTF-8".to_owned()),
            (
                CONTENT_DISPOSITION,
                format!("attachment; filename=\"{SHOPPING_CART_FILENAME}\""),
            ),
        ],
        body,
    ))
}

#[cfg(test)]
mod tests {
    use axum::{body::Body, extract::FromRequestParts, http::Request};

    use super::*;

    async fn extract(uri: &str) -> RecipeListQuery {
        let (mut parts, _) = Request::builder()
            .uri(uri)
            .body(Body::empty())
            .unwrap()
            .into_parts();

        let Query(input) = Query::<RecipeListQuery>::from_request_parts(&mut parts, &())
            .await
            .unwrap();

        input
    }

    #[tokio::test]
    async fn test_recipe_filter() {
        let input = extract(
            "/api/recipes/?page=2&author=3&tags=breakfast&tags=lunch&is_favorited=1&is_in_shopping_cart=0",
        )
        .await;
        assert_eq!(input.page, Some(2));

        let filter = RecipeFilter::from(input);
        assert_eq!(filter.author, Some(3));
        assert_eq!(filter.tags, vec!["breakfast", "lunch"]);
        assert_eq!(filter.is_favorited, Some(true));
        assert_eq!(filter.is_in_shopping_cart, Some(false));

        let filter = RecipeFilter::from(extract("/api/recipes/").await);
        assert!(filter.author.is_none());
        assert!(filter.tags.is_empty());
        assert!(filter.is_favorited.is_none());
    }
}
