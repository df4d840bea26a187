use axum::{
    extract::State,
    http::header::{CACHE_CONTROL, CONTENT_TYPE},
    response::IntoResponse,
};

use crate::{error::AppError, extract::Path, routes::AppState};

/// Absolute URL under which a recipe image is served.
pub fn recipe_image_url(base_url: &str, recipe_id: i64) -> String {
    format!("{}/media/recipes/{recipe_id}", base_url.trim_end_matches('/'))
}

pub async fn recipe_image(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<impl IntoResponse, AppError> {
    let Some(image) = state.recipe_query.image(id).await? else {
        return Err(AppError::NotFound);
    };

    Ok((
        [
            (CONTENT_TYPE, image.image_type),
            (CACHE_CONTROL, "public, max-age=3600".to_owned()),
        ],
        image.image,
    ))
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_recipe_image_url() {
        assert_eq!(
            super::recipe_image_url("http://localhost:8000/", 7),
            "http://localhost:8000/media/recipes/7"
        );
    }
}
