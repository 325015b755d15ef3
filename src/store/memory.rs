use std::{cmp::Ordering, collections::HashMap};

use async_trait::async_trait;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tokio::sync::RwLock;

use super::CatalogStore;
use crate::{
    error::{AppError, Result},
    models::{
        Category, CategoryFilter, CategorySummary, NewCategory, NewProduct, PageRequest, Product,
        ProductFilter, SortDirection, SortField,
    },
};

#[derive(Default)]
struct Tables {
    categories: Vec<Category>,
    products: Vec<Product>,
    next_category_id: i32,
    next_product_id: i32,
}

/// Catalog held in process memory. Rows get sequential ids and one-second-apart
/// `created_at` stamps so that insertion order is also creation order.
#[derive(Default)]
pub struct MemoryCatalogStore {
    tables: RwLock<Tables>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_category(&self, category: NewCategory) -> Result<Category> {
        let mut tables = self.tables.write().await;

        if tables.categories.iter().any(|c| c.slug == category.slug) {
            return Err(AppError::Conflict(format!(
                "Category slug {} already exists",
                category.slug
            )));
        }

        tables.next_category_id += 1;
        let id = tables.next_category_id;
        let stamp = timestamp(id);
        let category = Category {
            id,
            name: category.name,
            slug: category.slug,
            description: category.description,
            created_at: stamp,
            updated_at: stamp,
        };
        tables.categories.push(category.clone());

        Ok(category)
    }

    pub async fn insert_product(&self, product: NewProduct) -> Result<Product> {
        let mut tables = self.tables.write().await;

        if !tables.categories.iter().any(|c| c.id == product.category_id) {
            return Err(AppError::NotFound(format!(
                "Category {} does not exist",
                product.category_id
            )));
        }

        tables.next_product_id += 1;
        let id = tables.next_product_id;
        let stamp = timestamp(id);
        let product = Product {
            id,
            category_id: product.category_id,
            name: product.name,
            description: product.description,
            price: product.price,
            stock: product.stock,
            is_active: product.is_active,
            created_at: stamp,
            updated_at: stamp,
        };
        tables.products.push(product.clone());

        Ok(product)
    }

    pub async fn category_by_slug(&self, slug: &str) -> Option<Category> {
        let tables = self.tables.read().await;
        tables.categories.iter().find(|c| c.slug == slug).cloned()
    }
}

fn timestamp(sequence: i32) -> DateTime<Utc> {
    let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).single().unwrap_or_default();
    epoch + Duration::seconds(i64::from(sequence))
}

fn matches_filter(product: &Product, filter: &ProductFilter) -> bool {
    if !product.is_active {
        return false;
    }

    match filter.category {
        Some(CategoryFilter::Id(category_id)) if product.category_id != category_id => {
            return false;
        }
        Some(CategoryFilter::Unmatchable) => return false,
        _ => {}
    }

    match filter.search {
        Some(ref search) => like_contains(&product.name, search),
        None => true,
    }
}

fn compare(a: &Product, b: &Product, sort: SortField) -> Ordering {
    match sort {
        SortField::Name => a.name.cmp(&b.name),
        SortField::Price => a.price.cmp(&b.price),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
    }
}

/// `haystack LIKE '%' || term || '%'` with Postgres' default escape character.
fn like_contains(haystack: &str, term: &str) -> bool {
    let mut pattern = vec![LikeToken::AnyRun];
    let mut chars = term.chars();
    while let Some(c) = chars.next() {
        let token = match c {
            '%' => LikeToken::AnyRun,
            '_' => LikeToken::AnyOne,
            '\\' => LikeToken::Literal(chars.next().unwrap_or('\\')),
            other => LikeToken::Literal(other),
        };
        pattern.push(token);
    }
    pattern.push(LikeToken::AnyRun);

    let text: Vec<char> = haystack.chars().collect();
    like_match(&text, &pattern)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LikeToken {
    Literal(char),
    AnyOne,
    AnyRun,
}

fn like_match(text: &[char], pattern: &[LikeToken]) -> bool {
    // reachable[j]: pattern[..j] can match the text consumed so far
    let mut reachable = vec![false; pattern.len() + 1];
    reachable[0] = true;
    for (j, token) in pattern.iter().enumerate() {
        if *token == LikeToken::AnyRun && reachable[j] {
            reachable[j + 1] = true;
        }
    }

    for &c in text {
        let mut next = vec![false; pattern.len() + 1];
        for (j, token) in pattern.iter().enumerate() {
            match token {
                LikeToken::AnyRun => {
                    if reachable[j + 1] || next[j] {
                        next[j + 1] = true;
                    }
                }
                LikeToken::AnyOne => next[j + 1] = reachable[j],
                LikeToken::Literal(l) => next[j + 1] = reachable[j] && *l == c,
            }
        }
        reachable = next;
    }

    reachable[pattern.len()]
}

#[async_trait]
impl CatalogStore for MemoryCatalogStore {
    fn backend_tag(&self) -> &'static str {
        "memory"
    }

    async fn ping(&self) -> Result<()> {
        Ok(())
    }

    async fn list_categories(&self) -> Result<Vec<CategorySummary>> {
        let tables = self.tables.read().await;
        let mut categories: Vec<CategorySummary> =
            tables.categories.iter().map(CategorySummary::from).collect();
        categories.sort_by_key(|c| c.id);
        Ok(categories)
    }

    async fn count_products(&self, filter: &ProductFilter) -> Result<i64> {
        let tables = self.tables.read().await;
        let total = tables
            .products
            .iter()
            .filter(|p| matches_filter(p, filter))
            .count();
        Ok(total as i64)
    }

    async fn fetch_products(
        &self,
        filter: &ProductFilter,
        sort: SortField,
        direction: SortDirection,
        page: PageRequest,
    ) -> Result<Vec<Product>> {
        let tables = self.tables.read().await;
        let mut rows: Vec<Product> = tables
            .products
            .iter()
            .filter(|p| matches_filter(p, filter))
            .cloned()
            .collect();

        rows.sort_by(|a, b| match direction {
            SortDirection::Asc => compare(a, b, sort),
            SortDirection::Desc => compare(b, a, sort),
        });

        let offset = usize::try_from(page.offset()).unwrap_or(usize::MAX);
        let limit = usize::try_from(page.per_page).unwrap_or(0);

        Ok(rows.into_iter().skip(offset).take(limit).collect())
    }

    async fn find_categories(&self, category_ids: &[i32]) -> Result<HashMap<i32, CategorySummary>> {
        let tables = self.tables.read().await;
        let category_map = tables
            .categories
            .iter()
            .filter(|c| category_ids.contains(&c.id))
            .map(|c| (c.id, CategorySummary::from(c)))
            .collect();
        Ok(category_map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_category(name: &str, slug: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
            slug: slug.to_string(),
            description: String::new(),
        }
    }

    fn new_product(category_id: i32, name: &str, price: i64, is_active: bool) -> NewProduct {
        NewProduct {
            category_id,
            name: name.to_string(),
            description: String::new(),
            price,
            stock: 1,
            is_active,
        }
    }

    #[test]
    fn like_wildcards_follow_postgres() {
        assert!(like_contains("Audífonos Bluetooth NoiseCancel", "Bluetooth"));
        assert!(!like_contains("Audífonos Bluetooth NoiseCancel", "bluetooth"));
        assert!(like_contains("Laptop ProBook 15\"", "Pro%15"));
        assert!(like_contains("Jeans", "J_ans"));
        assert!(!like_contains("Jeans", "J\\_ans"));
        assert!(like_contains("100% cotton", "0\\% c"));
        assert!(like_contains("anything", ""));
        assert!(like_contains("", "%"));
    }

    #[tokio::test]
    async fn products_require_an_existing_category() {
        let store = MemoryCatalogStore::new();
        let err = store
            .insert_product(new_product(42, "Orphan", 100, true))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn slugs_are_unique() {
        let store = MemoryCatalogStore::new();
        store.insert_category(new_category("Ropa", "ropa")).await.unwrap();
        let err = store
            .insert_category(new_category("Ropa 2", "ropa"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[tokio::test]
    async fn inactive_products_never_match() {
        let store = MemoryCatalogStore::new();
        let category = store.insert_category(new_category("Hogar", "hogar")).await.unwrap();
        store
            .insert_product(new_product(category.id, "Visible", 100, true))
            .await
            .unwrap();
        store
            .insert_product(new_product(category.id, "Hidden", 200, false))
            .await
            .unwrap();

        let filter = ProductFilter::default();
        assert_eq!(store.count_products(&filter).await.unwrap(), 1);

        let rows = store
            .fetch_products(&filter, SortField::Price, SortDirection::Desc, PageRequest::default())
            .await
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].name, "Visible");
    }

    #[tokio::test]
    async fn fetch_sorts_then_pages() {
        let store = MemoryCatalogStore::new();
        let category = store.insert_category(new_category("Deportes", "deportes")).await.unwrap();
        for price in 1..=20 {
            store
                .insert_product(new_product(category.id, &format!("P{price:02}"), price, true))
                .await
                .unwrap();
        }

        let filter = ProductFilter::default();
        let second = store
            .fetch_products(&filter, SortField::Price, SortDirection::Asc, PageRequest::new(2))
            .await
            .unwrap();
        let prices: Vec<i64> = second.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![16, 17, 18, 19, 20]);

        let newest = store
            .fetch_products(&filter, SortField::CreatedAt, SortDirection::Desc, PageRequest::new(1))
            .await
            .unwrap();
        assert_eq!(newest[0].name, "P20");
        assert_eq!(newest.len(), 15);
    }
}
