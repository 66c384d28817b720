//! Liveness endpoint for the hosting platform.

use axum::{http::StatusCode, response::IntoResponse};

pub fn greeting() -> String {
    format!("Hello from budget-email {}.", env!("CARGO_PKG_VERSION"))
}

/// GET /health
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, greeting())
}
