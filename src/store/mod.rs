//! Storage access for the catalog.
//!
//! Handlers and the listing service only see [`CatalogStore`]; the Postgres
//! and in-memory backends both honour the same filter, ordering and paging rules.

mod memory;
mod postgres;

use std::collections::HashMap;

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{CategorySummary, PageRequest, Product, ProductFilter, SortDirection, SortField},
};

pub use memory::MemoryCatalogStore;
pub use postgres::PgCatalogStore;

#[async_trait]
pub trait CatalogStore: Send + Sync {
    fn backend_tag(&self) -> &'static str;

    async fn ping(&self) -> Result<()>;

    /// Every category, ordered by id.
    async fn list_categories(&self) -> Result<Vec<CategorySummary>>;

    /// Number of active products matching `filter`, ignoring paging.
    async fn count_products(&self, filter: &ProductFilter) -> Result<i64>;

    async fn fetch_products(
        &self,
        filter: &ProductFilter,
        sort: SortField,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<Vec<Product>>;

    async fn find_categories(&self, category_ids: &[i32]) -> Result<HashMap<i32, CategorySummary>>;
}
