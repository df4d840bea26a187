use axum::{
    Router,
    response::IntoResponse,
    routing::{get, post},
};
use sqlx::SqlitePool;

use crate::error::AppError;

mod catalog;
mod health;
mod media;
mod recipes;
mod token;
mod users;

pub use media::recipe_image_url;

#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    pub user_command: foodgram_user::Command,
    pub user_query: foodgram_user::Query,
    pub recipe_command: foodgram_recipe::Command,
    pub recipe_query: foodgram_recipe::Query,
    pub shopping_command: foodgram_shopping::Command,
    pub shopping_query: foodgram_shopping::Query,
    pub pool: SqlitePool,
}

impl AppState {
    pub fn new(config: crate::config::Config, state: foodgram_shared::State) -> Self {
        Self {
            config,
            user_command: foodgram_user::Command::new(state.clone()),
            user_query: foodgram_user::Query(state.clone()),
            recipe_command: foodgram_recipe::Command::new(state.clone()),
            recipe_query: foodgram_recipe::Query(state.clone()),
            shopping_command: foodgram_shopping::Command(state.clone()),
            shopping_query: foodgram_shopping::Query(state.clone()),
            pool: state.read_db,
        }
    }
}

pub async fn fallback() -> impl IntoResponse {
    AppError::NotFound
}

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/ready", get(health::ready))
        .with_state(app_state.pool.clone())
        .route("/api/users/", get(users::list).post(users::register))
        .route("/api/users/me/", get(users::me))
        .route("/api/users/set_password/", post(users::set_password))
        .route("/api/users/subscriptions/", get(users::subscriptions))
        .route("/api/users/{id}/", get(users::detail))
        .route(
            "/api/users/{id}/subscribe/",
            post(users::subscribe).delete(users::unsubscribe),
        )
        .route("/api/auth/token/login/", post(token::login))
        .route("/api/auth/token/logout/", post(token::logout))
        .route("/api/tags/", get(catalog::tags))
        .route("/api/tags/{id}/", get(catalog::tag))
        .route("/api/ingredients/", get(catalog::ingredients))
        .route("/api/ingredients/{id}/", get(catalog::ingredient))
        .route("/api/recipes/", get(recipes::list).post(recipes::create))
        .route(
            "/api/recipes/download_shopping_cart/",
            get(recipes::download_shopping_cart),
        )
        .route(
            "/api/recipes/{id}/",
            get(recipes::detail)
                .patch(recipes::update)
                .delete(recipes::delete),
        )
        .route(
            "/api/recipes/{id}/favorite/",
            post(recipes::favorite).delete(recipes::unfavorite),
        )
        .route(
            "/api/recipes/{id}/shopping_cart/",
            post(recipes::add_to_cart).delete(recipes::remove_from_cart),
        )
        .route("/media/recipes/{id}", get(media::recipe_image))
        .fallback(fallback)
        .with_state(app_state)
}
