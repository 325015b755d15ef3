use axum::{
    Json,
    extract::{Query, State},
};

use crate::{
    AppState,
    error::Result,
    models::{ProductListResponse, ProductQuery},
    services::product_listing,
};

pub async fn list_products(
    State(state): State<AppState>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<ProductListResponse>> {
    // Repeated keys must not fail extraction.
    let params = ProductQuery::from_pairs(pairs);
    let response = product_listing::list_products(state.store.as_ref(), &params).await?;

    Ok(Json(response))
}
