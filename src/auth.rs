use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use foodgram_user::Session;

use crate::{
    error::{AppError, INVALID_TOKEN, NOT_AUTHENTICATED},
    routes::AppState,
};

/// Issues a token for a freshly opened session.
pub fn issue_token(state: &AppState, user_id: i64, access_id: &str) -> anyhow::Result<String> {
    foodgram_user::token::encode_token(
        user_id,
        access_id,
        &state.config.jwt.secret,
        state.config.jwt.lifetime_seconds(),
    )
}

/// The token presented in `Authorization: Token <t>` (or `Bearer <t>`).
///
/// `None` when the header is absent, `Some(Err)` when it is unreadable.
fn presented_token(parts: &Parts) -> Option<Result<&str, ()>> {
    let value = parts.headers.get(AUTHORIZATION)?;

    let token = value.to_str().ok().and_then(|value| {
        let (scheme, token) = value.trim().split_once(' ')?;
        let token = token.trim();

        (scheme.eq_ignore_ascii_case("token") || scheme.eq_ignore_ascii_case("bearer"))
            .then_some(token)
            .filter(|t| !t.is_empty())
    });

    Some(token.ok_or(()))
}

async fn resolve(state: &AppState, token: &str) -> Result<Session, AppError> {
    let invalid = || AppError::from(foodgram_shared::Error::Unauthorized(INVALID_TOKEN.to_owned()));

    let claims = foodgram_user::token::decode_token(token, &state.config.jwt.secret).map_err(|e| {
        tracing::debug!("rejected token: {e}");
        invalid()
    })?;

    let Some(session) = state.user_query.session(&claims.jti).await? else {
        return Err(invalid());
    };

    if session.user_id.to_string() != claims.sub {
        return Err(invalid());
    }

    Ok(session)
}

/// Requires an authenticated user.
pub struct AuthUser(pub Session);

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match presented_token(parts) {
            None => Err(foodgram_shared::Error::Unauthorized(NOT_AUTHENTICATED.to_owned()).into()),
            Some(Err(())) => {
                Err(foodgram_shared::Error::Unauthorized(INVALID_TOKEN.to_owned()).into())
            }
            Some(Ok(token)) => Ok(AuthUser(resolve(state, token).await?)),
        }
    }
}

/// The viewer of a public endpoint: anonymous without a header, rejected with
/// a bad one.
pub struct Viewer(pub Option<Session>);

impl Viewer {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|s| s.user_id)
    }
}

impl FromRequestParts<AppState> for Viewer {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match presented_token(parts) {
            None => Ok(Viewer(None)),
            Some(Err(())) => {
                Err(foodgram_shared::Error::Unauthorized(INVALID_TOKEN.to_owned()).into())
            }
            Some(Ok(token)) => Ok(Viewer(Some(resolve(state, token).await?))),
        }
    }
}
