//! `selectshop-app` — the product-tracking business-rule layer.
//!
//! Services compose the stores, the message resolver and the search seam into
//! the operations the surrounding transport layer exposes: register a
//! product, set a target price, list with role-scoped pagination, file a
//! product into a folder, refresh from search data. All rule violations are
//! raised here as [`selectshop_core::DomainError`] and translated for clients
//! by [`errors::ErrorResponse`].

pub mod dto;
pub mod errors;
pub mod folder_service;
pub mod product_service;
pub mod refresh;

pub use dto::{FolderResponse, ProductRequest, ProductResponse};
pub use errors::ErrorResponse;
pub use folder_service::FolderService;
pub use product_service::ProductService;
pub use refresh::{PriceRefresher, RefreshReport};
