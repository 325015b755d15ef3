use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;

use super::CatalogStore;
use crate::{
    database,
    error::Result,
    models::{CategorySummary, PageRequest, Product, ProductFilter, SortDirection, SortField},
    queries::{category_queries, product_queries},
};

#[derive(Clone)]
pub struct PgCatalogStore {
    pool: PgPool,
}

impl PgCatalogStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl CatalogStore for PgCatalogStore {
    fn backend_tag(&self) -> &'static str {
        "postgres"
    }

    async fn ping(&self) -> Result<()> {
        database::check_health(&self.pool).await
    }

    async fn list_categories(&self) -> Result<Vec<CategorySummary>> {
        category_queries::list_summaries(&self.pool).await
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<i64> {
        product_queries::count_active(&self.pool, filter).await
    }

    async fn fetch_products(
        &self,
        filter: &ProductFilter,
        sort: SortField,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<Vec<Product>> {
        product_queries::list_active(&self.pool, filter, sort, direction, page).await
    }

    async fn find_categories(&self, category_ids: &[i32]) -> Result<HashMap<i32, CategorySummary>> {
        category_queries::find_summaries_by_ids(&self.pool, category_ids).await
    }
}
