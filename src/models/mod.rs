mod category;
mod listing;
mod product;

pub use category::*;
pub use listing::*;
pub use product::*;
