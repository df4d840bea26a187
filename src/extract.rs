//! Request extractors whose rejections use the API error bodies.

use axum::extract::FromRequest;
use axum::extract::FromRequestParts;
use serde::{Deserialize, Deserializer, de::Error as _};

use crate::error::AppError;

#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct Json<T>(pub T);

#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);

/// Query string decoding with repeated keys collected into `Vec` fields.
#[derive(FromRequestParts)]
#[from_request(via(axum_extra::extract::Query), rejection(AppError))]
pub struct Query<T>(pub T);

/// `1`/`true` and `0`/`false`; an empty value is absent.
pub fn flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(value) = Option::<String>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match value.trim() {
        "" => Ok(None),
        "1" | "true" | "True" => Ok(Some(true)),
        "0" | "false" | "False" => Ok(Some(false)),
        other => Err(D::Error::custom(format!("invalid flag `{other}`"))),
    }
}
