//! Turns a raw `/products` query string into a bounded catalog lookup.
//!
//! Bad input is never rejected: unknown sort fields, directions and page
//! numbers fall back to their defaults, and a category that cannot exist
//! simply filters everything out.

use crate::{
    error::Result,
    models::{
        CategoryFilter, PageMeta, PageRequest, Product, ProductFilter, ProductListItem,
        ProductListResponse, ProductQuery, SortDirection, SortField,
    },
    store::CatalogStore,
};

/// The normalized form of a [`ProductQuery`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedProductQuery {
    pub filter: ProductFilter,
    pub sort: SortField,
    pub direction: SortDirection,
    pub page: PageRequest,
}

impl ResolvedProductQuery {
    pub fn from_params(params: &ProductQuery) -> Self {
        Self {
            filter: ProductFilter {
                category: present(&params.category).map(parse_category),
                search: present(&params.search).map(str::to_string),
            },
            sort: SortField::parse(params.sort.as_deref()),
            direction: SortDirection::parse(params.direction.as_deref()),
            page: PageRequest::new(parse_page(params.page.as_deref())),
        }
    }
}

/// Blank values and a bare `0` count as not given.
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .filter(|v| !matches!(v.trim(), "" | "0"))
}

fn parse_category(raw: &str) -> CategoryFilter {
    raw.trim()
        .parse::<i32>()
        .map(CategoryFilter::Id)
        .unwrap_or(CategoryFilter::Unmatchable)
}

fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|p| p.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .unwrap_or(1)
}

pub async fn list_products(
    store: &dyn CatalogStore,
    params: &ProductQuery,
) -> Result<ProductListResponse> {
    let query = ResolvedProductQuery::from_params(params);

    tracing::debug!(
        backend = store.backend_tag(),
        sort = query.sort.column(),
        direction = query.direction.keyword(),
        category = ?query.filter.category,
        search = ?query.filter.search,
        page = query.page.page,
        "Listing products"
    );

    let total = store.count_products(&query.filter).await?;

    let products = store
        .fetch_products(&query.filter, query.sort, query.direction, query.page)
        .await?;

    let data = attach_categories(store, products).await?;

    Ok(ProductListResponse {
        data,
        meta: PageMeta {
            current_page: query.page.page,
            total,
            per_page: query.page.per_page,
        },
    })
}

async fn attach_categories(
    store: &dyn CatalogStore,
    products: Vec<Product>,
) -> Result<Vec<ProductListItem>> {
    if products.is_empty() {
        return Ok(Vec::new());
    }

    let mut category_ids: Vec<i32> = products.iter().map(|p| p.category_id).collect();
    category_ids.sort_unstable();
    category_ids.dedup();

    let categories = store.find_categories(&category_ids).await?;

    // The foreign key guarantees a match; a miss means the row vanished mid-request.
    let items = products
        .into_iter()
        .filter_map(|product| {
            let category = categories.get(&product.category_id)?.clone();
            Some(ProductListItem {
                id: product.id,
                name: product.name,
                description: product.description,
                price: product.price,
                stock: product.stock,
                category,
            })
        })
        .collect();

    Ok(items)
}
