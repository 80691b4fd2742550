use axum::{Json, http::StatusCode, response::IntoResponse};

use crate::axum_http::error_responses::ErrorResponse;

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            code: StatusCode::NOT_FOUND.as_u16(),
            message: "No route matches this path".to_string(),
        }),
    )
}

pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "All right, healthy!").into_response()
}
