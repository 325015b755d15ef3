mod categories;
mod health;
mod products;

use axum::{Router, routing::get};

use crate::{AppState, error::AppError};

pub fn create_router() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::list_products))
        .route("/categories", get(categories::list_categories))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .fallback(route_not_found)
}

async fn route_not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}
