use std::collections::HashMap;

use sqlx::{PgConnection, PgPool};

use crate::{
    error::Result,
    models::{Category, CategorySummary, NewCategory},
};

pub async fn list_summaries(pool: &PgPool) -> Result<Vec<CategorySummary>> {
    let categories = sqlx::query_as::<_, CategorySummary>(
        "SELECT id, name, slug FROM categories ORDER BY id ASC",
    )
    .fetch_all(pool)
    .await?;

    Ok(categories)
}

/// One round-trip for every category referenced by a page of products.
pub async fn find_summaries_by_ids(
    pool: &PgPool,
    category_ids: &[i32],
) -> Result<HashMap<i32, CategorySummary>> {
    if category_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let categories = sqlx::query_as::<_, CategorySummary>(
        "SELECT id, name, slug FROM categories WHERE id = ANY($1)",
    )
    .bind(category_ids)
    .fetch_all(pool)
    .await?;

    let category_map = categories
        .into_iter()
        .map(|category| (category.id, category))
        .collect();

    Ok(category_map)
}

pub async fn count(conn: &mut PgConnection) -> Result<i64> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM categories")
        .fetch_one(conn)
        .await?;

    Ok(total)
}

pub async fn insert_category(conn: &mut PgConnection, category: &NewCategory) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        "INSERT INTO categories (name, slug, description)
         VALUES ($1, $2, $3)
         RETURNING *",
    )
    .bind(&category.name)
    .bind(&category.slug)
    .bind(&category.description)
    .fetch_one(conn)
    .await?;

    Ok(category)
}
