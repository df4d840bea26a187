use axum::{
    extract::{RawQuery, State},
    http::StatusCode,
    response::IntoResponse,
};
use foodgram_user::{AuthorRecipe, RegisterInput, SetPasswordInput, SubscriptionView, UserView};
use serde::{Deserialize, Serialize};

use crate::{
    auth::{AuthUser, Viewer},
    error::AppError,
    extract::{Json, Path, Query},
    pagination::{PageQuery, PageResponse, page_args},
    routes::{AppState, recipe_image_url},
};

#[derive(Deserialize, Debug, Default, Clone)]
pub struct SubscriptionsQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub recipes_limit: Option<u32>,
}

#[derive(Deserialize, Debug, Default, Clone)]
pub struct RecipesLimitQuery {
    pub recipes_limit: Option<u32>,
}

#[derive(Serialize)]
pub struct RegisteredUser {
    pub email: String,
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
}

impl From<UserView> for RegisteredUser {
    fn from(user: UserView) -> Self {
        Self {
            email: user.email,
            id: user.id,
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[derive(Serialize)]
pub struct RecipePreview {
    pub id: i64,
    pub name: String,
    pub image: String,
    pub cooking_time: i64,
}

#[derive(Serialize)]
pub struct SubscriptionResponse {
    #[serde(flatten)]
    pub user: UserView,
    pub recipes: Vec<RecipePreview>,
    pub recipes_count: i64,
}

impl SubscriptionResponse {
    fn new(view: SubscriptionView, base_url: &str) -> Self {
        Self {
            user: view.user,
            recipes: view
                .recipes
                .into_iter()
                .map(|AuthorRecipe { id, name, cooking_time }| RecipePreview {
                    id,
                    name,
                    image: recipe_image_url(base_url, id),
                    cooking_time,
                })
                .collect(),
            recipes_count: view.recipes_count,
        }
    }
}

#[tracing::instrument(skip_all)]
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterInput>,
) -> Result<impl IntoResponse, AppError> {
    let id = state.user_command.register(input).await?;

    let Some(user) = state.user_query.find(None, id).await? else {
        return Err(AppError::NotFound);
    };

    Ok((StatusCode::CREATED, axum::Json(RegisteredUser::from(user))))
}

pub async fn list(
    State(state): State<AppState>,
    viewer: Viewer,
    Query(input): Query<PageQuery>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    let args = page_args(input.page, input.limit, &state.config.pagination);
    let page = state.user_query.list(viewer.id(), args).await?;

    Ok(axum::Json(PageResponse::new(
        page,
        &state.config.server.base_url,
        "/api/users/",
        query.as_deref(),
    )))
}

pub async fn detail(
    State(state): State<AppState>,
    viewer: Viewer,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    match state.user_query.find(viewer.id(), id).await? {
        Some(user) => Ok(axum::Json(user)),
        None => Err(AppError::NotFound),
    }
}

pub async fn me(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    match state
        .user_query
        .find(Some(session.user_id), session.user_id)
        .await?
    {
        Some(user) => Ok(axum::Json(user)),
        None => Err(AppError::NotFound),
    }
}

#[tracing::instrument(skip_all)]
pub async fn set_password(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Json(input): Json<SetPasswordInput>,
) -> Result<impl IntoResponse, AppError> {
    state
        .user_command
        .set_password(session.user_id, &session.access_id, input)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn subscriptions(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Query(input): Query<SubscriptionsQuery>,
    RawQuery(query): RawQuery,
) -> Result<impl IntoResponse, AppError> {
    let args = page_args(input.page, input.limit, &state.config.pagination);
    let page = state
        .user_query
        .subscriptions(session.user_id, args, input.recipes_limit)
        .await?;

    let base_url = &state.config.server.base_url;
    let page = page.map(|view| SubscriptionResponse::new(view, base_url));

    Ok(axum::Json(PageResponse::new(
        page,
        base_url,
        "/api/users/subscriptions/",
        query.as_deref(),
    )))
}

#[tracing::instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(author_id): Path<i64>,
    Query(input): Query<RecipesLimitQuery>,
) -> Result<impl IntoResponse, AppError> {
    state
        .user_command
        .subscription
        .subscribe(session.user_id, author_id)
        .await?;

    let Some(view) = state
        .user_query
        .subscription(session.user_id, author_id, input.recipes_limit)
        .await?
    else {
        return Err(AppError::NotFound);
    };

    Ok((
        StatusCode::CREATED,
        axum::Json(SubscriptionResponse::new(
            view,
            &state.config.server.base_url,
        )),
    ))
}

#[tracing::instrument(skip_all)]
pub async fn unsubscribe(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
    Path(author_id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    state
        .user_command
        .subscription
        .unsubscribe(session.user_id, author_id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
