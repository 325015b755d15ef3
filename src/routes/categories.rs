use axum::{Json, extract::State};

use crate::{AppState, error::Result, models::CategoryListResponse};

pub async fn list_categories(State(state): State<AppState>) -> Result<Json<CategoryListResponse>> {
    let categories = state.store.list_categories().await?;

    Ok(Json(CategoryListResponse { data: categories }))
}
