use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};

use crate::{
    error::Result,
    models::{
        CategoryFilter, NewProduct, PageRequest, Product, ProductFilter, SortDirection, SortField,
    },
};

/// Appends the listing predicates. The builder must already end in a `FROM products` clause.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    query.push(" WHERE is_active = TRUE");

    match filter.category {
        Some(CategoryFilter::Id(category_id)) => {
            query.push(" AND category_id = ");
            query.push_bind(category_id);
        }
        Some(CategoryFilter::Unmatchable) => {
            query.push(" AND FALSE");
        }
        None => {}
    }

    // % and _ inside the term are passed through as LIKE wildcards
    if let Some(ref search) = filter.search {
        query.push(" AND name LIKE ");
        query.push_bind(format!("%{}%", search));
    }
}

pub async fn count_active(pool: &PgPool, filter: &ProductFilter) -> Result<i64> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_filter(&mut query, filter);

    let total = query.build_query_scalar::<i64>().fetch_one(pool).await?;

    Ok(total)
}

fn listing_query(
    filter: &ProductFilter,
    sort: SortField,
    direction: SortDirection,
    page: PageRequest,
) -> QueryBuilder<'static, Postgres> {
    let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM products");
    push_filter(&mut query, filter);

    // Both fragments come from closed enums, never from request text.
    query.push(" ORDER BY ");
    query.push(sort.column());
    query.push(" ");
    query.push(direction.keyword());

    query.push(" LIMIT ");
    query.push_bind(page.per_page);
    query.push(" OFFSET ");
    query.push_bind(page.offset());

    query
}

pub async fn list_active(
    pool: &PgPool,
    filter: &ProductFilter,
    sort: SortField,
    direction: SortDirection,
    page: PageRequest,
) -> Result<Vec<Product>> {
    let mut query = listing_query(filter, sort, direction, page);
    let products = query.build_query_as::<Product>().fetch_all(pool).await?;

    Ok(products)
}

pub async fn insert_product(conn: &mut PgConnection, product: &NewProduct) -> Result<Product> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (category_id, name, description, price, stock, is_active)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(product.category_id)
    .bind(&product.name)
    .bind(&product.description)
    .bind(product.price)
    .bind(product.stock)
    .bind(product.is_active)
    .fetch_one(conn)
    .await?;

    Ok(product)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn where_clause(filter: &ProductFilter) -> String {
        let mut query: QueryBuilder<Postgres> = QueryBuilder::new("SELECT * FROM products");
        push_filter(&mut query, filter);
        query.sql().to_string()
    }

    #[test]
    fn active_predicate_is_always_present() {
        assert_eq!(
            where_clause(&ProductFilter::default()),
            "SELECT * FROM products WHERE is_active = TRUE"
        );
    }

    #[test]
    fn filters_are_bound_not_interpolated() {
        let filter = ProductFilter {
            category: Some(CategoryFilter::Id(3)),
            search: Some("'; DROP TABLE products; --".to_string()),
        };
        assert_eq!(
            where_clause(&filter),
            "SELECT * FROM products WHERE is_active = TRUE AND category_id = $1 AND name LIKE $2"
        );
    }

    #[test]
    fn unmatchable_category_short_circuits() {
        let filter = ProductFilter {
            category: Some(CategoryFilter::Unmatchable),
            search: None,
        };
        assert!(where_clause(&filter).ends_with("AND FALSE"));
    }

    #[test]
    fn ordering_and_paging_tail() {
        let filter = ProductFilter {
            category: Some(CategoryFilter::Id(1)),
            search: None,
        };
        let query = listing_query(
            &filter,
            SortField::Price,
            SortDirection::Asc,
            PageRequest::new(2),
        );
        assert_eq!(
            query.sql(),
            "SELECT * FROM products WHERE is_active = TRUE AND category_id = $1 \
             ORDER BY price ASC LIMIT $2 OFFSET $3"
        );

        let query = listing_query(
            &ProductFilter::default(),
            SortField::default(),
            SortDirection::default(),
            PageRequest::default(),
        );
        assert!(query.sql().ends_with(" ORDER BY created_at DESC LIMIT $1 OFFSET $2"));
    }
}
