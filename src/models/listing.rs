pub const PRODUCTS_PER_PAGE: i64 = 15;

/// Columns products may be ordered by. Nothing outside this enum ever reaches an ORDER BY.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortField {
    Name,
    Price,
    #[default]
    CreatedAt,
}

impl SortField {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("name") => SortField::Name,
            Some("price") => SortField::Price,
            Some("created_at") => SortField::CreatedAt,
            _ => SortField::default(),
        }
    }

    pub fn column(self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
            SortField::CreatedAt => "created_at",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("asc") => SortDirection::Asc,
            Some("desc") => SortDirection::Desc,
            _ => SortDirection::default(),
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    Id(i32),
    /// The caller sent something that can never equal a category id.
    Unmatchable,
}

/// Predicates for a product listing. `is_active = true` is implied and not optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub category: Option<CategoryFilter>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub per_page: i64,
}

impl PageRequest {
    pub fn new(page: i64) -> Self {
        Self {
            page: page.max(1),
            per_page: PRODUCTS_PER_PAGE,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.per_page)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_falls_back_to_created_at() {
        assert_eq!(SortField::parse(Some("price")), SortField::Price);
        assert_eq!(SortField::parse(Some("name")), SortField::Name);
        for raw in [None, Some(""), Some("id"), Some("PRICE"), Some("price; DROP TABLE products")] {
            assert_eq!(SortField::parse(raw), SortField::CreatedAt, "{raw:?}");
        }
    }

    #[test]
    fn direction_falls_back_to_desc() {
        assert_eq!(SortDirection::parse(Some("asc")), SortDirection::Asc);
        for raw in [None, Some(""), Some("ASC"), Some("up")] {
            assert_eq!(SortDirection::parse(raw), SortDirection::Desc, "{raw:?}");
        }
    }

    #[test]
    fn page_offsets() {
        assert_eq!(PageRequest::new(1).offset(), 0);
        assert_eq!(PageRequest::new(3).offset(), 30);
        assert_eq!(PageRequest::new(0).page, 1);
        assert_eq!(PageRequest::default().per_page, 15);
    }
}
