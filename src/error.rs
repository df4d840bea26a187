use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::QueryRejection;
use serde_json::{Map, Value, json};
use validator::{ValidationErrors, ValidationErrorsKind};

pub const NOT_AUTHENTICATED: &str = "Authentication credentials were not provided.";
pub const INVALID_TOKEN: &str = "Invalid token.";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Domain(#[from] foodgram_shared::Error),

    #[error("{0}")]
    BadRequest(String),

    #[error("not found")]
    NotFound,
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.to_string())
    }
}

impl From<PathRejection> for AppError {
    fn from(_: PathRejection) -> Self {
        AppError::NotFound
    }
}

impl From<foodgram_shopping::EmptyCart> for AppError {
    fn from(value: foodgram_shopping::EmptyCart) -> Self {
        AppError::Domain(value.into())
    }
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        use foodgram_shared::Error;

        let error = match self {
            AppError::BadRequest(msg) => return detail(StatusCode::BAD_REQUEST, &msg),
            AppError::NotFound => return detail(StatusCode::NOT_FOUND, "Not found."),
            AppError::Domain(error) => error,
        };

        match error {
            Error::Validate(errors) => {
                (StatusCode::BAD_REQUEST, Json(validation_body(&errors))).into_response()
            }
            Error::Field(field, msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ field: [msg] }))).into_response()
            }
            Error::User(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "errors": msg }))).into_response()
            }
            Error::NotFound(_) => detail(StatusCode::NOT_FOUND, "Not found."),
            Error::Forbidden => detail(
                StatusCode::FORBIDDEN,
                "You do not have permission to perform this action.",
            ),
            Error::Unauthorized(msg) => detail(StatusCode::UNAUTHORIZED, &msg),
            Error::Unknown(e) => {
                tracing::error!("Internal error: {:?}", e);
                detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error.")
            }
        }
    }
}

/// Renders validator output as `{field: [messages]}`, nesting for structs and
/// lists the way the fields nest in the request body.
pub fn validation_body(errors: &ValidationErrors) -> Value {
    let mut body = Map::new();

    for (field, kind) in errors.errors() {
        let value = match kind {
            ValidationErrorsKind::Field(errors) => Value::Array(
                errors
                    .iter()
                    .map(|e| {
                        Value::String(
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| default_message(&e.code)),
                        )
                    })
                    .collect(),
            ),
            ValidationErrorsKind::Struct(errors) => validation_body(errors),
            ValidationErrorsKind::List(items) => {
                let len = items.keys().max().map(|i| i + 1).unwrap_or(0);
                let mut list = vec![Value::Object(Map::new()); len];
                for (index, errors) in items {
                    list[*index] = validation_body(errors);
                }
                Value::Array(list)
            }
        };

        body.insert(field.to_string(), value);
    }

    Value::Object(body)
}

fn default_message(code: &str) -> String {
    match code {
        "email" => "Enter a valid email address.".to_owned(),
        "length" => "Ensure this field has a valid length.".to_owned(),
        "range" => "Ensure this value is within the allowed range.".to_owned(),
        "regex" => "Enter a valid value.".to_owned(),
        "required" => "This field is required.".to_owned(),
        code => format!("Invalid value ({code})."),
    }
}
