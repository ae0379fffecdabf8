use axum::{http::StatusCode, response::IntoResponse};

pub const HEALTH_ENDPOINT: &str = "/health";

pub async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
