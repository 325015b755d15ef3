pub mod product_listing;
