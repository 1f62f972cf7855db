//! Store traits: the persistence seam of the rule layer.
//!
//! Traits are synchronous; listing queries apply scoping, sorting and offset
//! pagination inside the store so callers never post-filter a full result
//! set. Sorting is driven by the domain's allow-list enum, which is also what
//! makes column interpolation safe on the SQL side.

pub mod memory;
pub mod postgres;

use std::sync::Arc;

use thiserror::Error;

use selectshop_core::{FolderId, Page, PageRequest, ProductId, UserId};
use selectshop_products::{Folder, Product, ProductFolder, ProductSortField};

pub use memory::InMemoryStore;
pub use postgres::PostgresStore;

/// Failure of the backing store itself; never a rule violation.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store state poisoned: {0}")]
    Poisoned(String),

    #[error("database failure: {0}")]
    Database(String),
}

impl From<StoreError> for selectshop_core::DomainError {
    fn from(err: StoreError) -> Self {
        selectshop_core::DomainError::store(err.to_string())
    }
}

/// Persistence access for tracked products.
pub trait ProductStore: Send + Sync {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Insert-or-replace by id.
    fn save(&self, product: Product) -> Result<Product, StoreError>;

    /// Every product system-wide (elevated-role listing).
    fn find_all(&self, page: &PageRequest<ProductSortField>) -> Result<Page<Product>, StoreError>;

    /// Products owned by one user (plain-role listing).
    fn find_all_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError>;

    /// Products owned by the user AND filed under the folder; the query
    /// applies both constraints together.
    fn find_all_by_user_and_folder(
        &self,
        user_id: UserId,
        folder_id: FolderId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError>;

    /// Ids of every stored product, for the refresh sweep.
    fn all_ids(&self) -> Result<Vec<ProductId>, StoreError>;
}

/// Persistence access for folders.
pub trait FolderStore: Send + Sync {
    fn find_by_id(&self, id: FolderId) -> Result<Option<Folder>, StoreError>;

    fn save(&self, folder: Folder) -> Result<Folder, StoreError>;

    /// The user's folders, id order.
    fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Folder>, StoreError>;

    /// The user's folders whose names appear in `names` (duplicate probe for
    /// batch creation).
    fn find_by_user_and_names(
        &self,
        user_id: UserId,
        names: &[String],
    ) -> Result<Vec<Folder>, StoreError>;
}

/// Persistence access for product/folder associations.
pub trait ProductFolderStore: Send + Sync {
    fn find_by_product_and_folder(
        &self,
        product_id: ProductId,
        folder_id: FolderId,
    ) -> Result<Option<ProductFolder>, StoreError>;

    fn save(&self, association: ProductFolder) -> Result<ProductFolder, StoreError>;

    fn find_all_by_product(&self, product_id: ProductId) -> Result<Vec<ProductFolder>, StoreError>;
}

impl<S> ProductStore for Arc<S>
where
    S: ProductStore + ?Sized,
{
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        (**self).find_by_id(id)
    }

    fn save(&self, product: Product) -> Result<Product, StoreError> {
        (**self).save(product)
    }

    fn find_all(&self, page: &PageRequest<ProductSortField>) -> Result<Page<Product>, StoreError> {
        (**self).find_all(page)
    }

    fn find_all_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError> {
        (**self).find_all_by_user(user_id, page)
    }

    fn find_all_by_user_and_folder(
        &self,
        user_id: UserId,
        folder_id: FolderId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError> {
        (**self).find_all_by_user_and_folder(user_id, folder_id, page)
    }

    fn all_ids(&self) -> Result<Vec<ProductId>, StoreError> {
        (**self).all_ids()
    }
}

impl<S> FolderStore for Arc<S>
where
    S: FolderStore + ?Sized,
{
    fn find_by_id(&self, id: FolderId) -> Result<Option<Folder>, StoreError> {
        (**self).find_by_id(id)
    }

    fn save(&self, folder: Folder) -> Result<Folder, StoreError> {
        (**self).save(folder)
    }

    fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Folder>, StoreError> {
        (**self).find_all_by_user(user_id)
    }

    fn find_by_user_and_names(
        &self,
        user_id: UserId,
        names: &[String],
    ) -> Result<Vec<Folder>, StoreError> {
        (**self).find_by_user_and_names(user_id, names)
    }
}

impl<S> ProductFolderStore for Arc<S>
where
    S: ProductFolderStore + ?Sized,
{
    fn find_by_product_and_folder(
        &self,
        product_id: ProductId,
        folder_id: FolderId,
    ) -> Result<Option<ProductFolder>, StoreError> {
        (**self).find_by_product_and_folder(product_id, folder_id)
    }

    fn save(&self, association: ProductFolder) -> Result<ProductFolder, StoreError> {
        (**self).save(association)
    }

    fn find_all_by_product(&self, product_id: ProductId) -> Result<Vec<ProductFolder>, StoreError> {
        (**self).find_all_by_product(product_id)
    }
}
