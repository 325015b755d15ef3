mod connection;
pub mod seed;

pub use connection::{check_health, create_pool};
