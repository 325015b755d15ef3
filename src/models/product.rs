use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::CategorySummary;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Product {
    pub id: i32,
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub category_id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub is_active: bool,
}

/// Raw `/products` parameters. Every field stays a string so that bad
/// values can be normalized instead of rejected.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct ProductQuery {
    pub sort: Option<String>,
    pub direction: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<String>,
}

impl ProductQuery {
    /// Folds decoded query pairs in order, so a repeated key keeps its last value.
    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_str() {
                "sort" => &mut query.sort,
                "direction" => &mut query.direction,
                "category" => &mut query.category,
                "search" => &mut query.search,
                "page" => &mut query.page,
                _ => continue,
            };
            *slot = Some(value);
        }
        query
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductListItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: i64,
    pub stock: i32,
    pub category: CategorySummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMeta {
    pub current_page: i64,
    pub total: i64,
    pub per_page: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub data: Vec<ProductListItem>,
    pub meta: PageMeta,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(raw: &[(&str, &str)]) -> Vec<(String, String)> {
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn repeated_keys_keep_the_last_value() {
        let query = ProductQuery::from_pairs(pairs(&[
            ("sort", "name"),
            ("sort", "price"),
            ("page", "2"),
            ("page", "3"),
            ("direction", "asc"),
            ("direction", "zzz"),
        ]));
        assert_eq!(query.sort.as_deref(), Some("price"));
        assert_eq!(query.page.as_deref(), Some("3"));
        assert_eq!(query.direction.as_deref(), Some("zzz"));
        assert_eq!(query.category, None);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let query = ProductQuery::from_pairs(pairs(&[("limit", "500"), ("search", "Set")]));
        assert_eq!(query.search.as_deref(), Some("Set"));
        assert_eq!(query.sort, None);
    }
}
