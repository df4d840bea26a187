use axum::{extract::State, http::StatusCode, response::IntoResponse};
use foodgram_user::LoginInput;
use serde_json::json;

use crate::{
    auth::{AuthUser, issue_token},
    error::AppError,
    extract::Json,
    routes::AppState,
};

#[tracing::instrument(skip_all)]
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginInput>,
) -> Result<impl IntoResponse, AppError> {
    let (user_id, access_id) = state.user_command.login(input).await?;
    let token = issue_token(&state, user_id, &access_id).map_err(foodgram_shared::Error::from)?;

    Ok((StatusCode::CREATED, axum::Json(json!({ "auth_token": token }))))
}

#[tracing::instrument(skip_all)]
pub async fn logout(
    State(state): State<AppState>,
    AuthUser(session): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    state.user_command.logout(&session.access_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
