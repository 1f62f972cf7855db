//! `selectshop-products` — tracked products, folders, and their invariants.

pub mod folder;
pub mod product;

pub use folder::{Folder, ProductFolder};
pub use product::{MIN_MY_PRICE, Product, ProductSortField};
