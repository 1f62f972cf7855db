//! In-memory store for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use selectshop_core::{AssociationId, FolderId, Page, PageRequest, ProductId, UserId};
use selectshop_products::{Folder, Product, ProductFolder, ProductSortField};

use super::{FolderStore, ProductFolderStore, ProductStore, StoreError};

/// One in-memory backing for all three stores.
///
/// Interior `RwLock`s give the same last-writer-wins semantics the relational
/// store has under its default isolation; there is no cross-store
/// transaction, mirroring the single-call-per-operation model of the rule
/// layer.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    products: RwLock<HashMap<ProductId, Product>>,
    folders: RwLock<HashMap<FolderId, Folder>>,
    associations: RwLock<HashMap<AssociationId, ProductFolder>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn poisoned(which: &str) -> StoreError {
    StoreError::Poisoned(format!("{which} lock"))
}

/// Sort + slice a filtered result set, keeping the full match count.
fn paginate(mut items: Vec<Product>, page: &PageRequest<ProductSortField>) -> Page<Product> {
    let total = items.len() as u64;
    items.sort_by(|a, b| {
        let ord = page.sort_by.compare(a, b);
        if page.ascending { ord } else { ord.reverse() }
    });
    let items = items
        .into_iter()
        .skip(page.offset())
        .take(page.limit())
        .collect();
    Page::new(items, page.page, page.size, total)
}

impl ProductStore for InMemoryStore {
    fn find_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let map = self.products.read().map_err(|_| poisoned("products"))?;
        Ok(map.get(&id).cloned())
    }

    fn save(&self, product: Product) -> Result<Product, StoreError> {
        let mut map = self.products.write().map_err(|_| poisoned("products"))?;
        map.insert(product.id, product.clone());
        Ok(product)
    }

    fn find_all(&self, page: &PageRequest<ProductSortField>) -> Result<Page<Product>, StoreError> {
        let map = self.products.read().map_err(|_| poisoned("products"))?;
        Ok(paginate(map.values().cloned().collect(), page))
    }

    fn find_all_by_user(
        &self,
        user_id: UserId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError> {
        let map = self.products.read().map_err(|_| poisoned("products"))?;
        let matches = map
            .values()
            .filter(|p| p.is_owned_by(user_id))
            .cloned()
            .collect();
        Ok(paginate(matches, page))
    }

    fn find_all_by_user_and_folder(
        &self,
        user_id: UserId,
        folder_id: FolderId,
        page: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>, StoreError> {
        let in_folder: std::collections::HashSet<ProductId> = {
            let assocs = self
                .associations
                .read()
                .map_err(|_| poisoned("associations"))?;
            assocs
                .values()
                .filter(|a| a.folder_id == folder_id)
                .map(|a| a.product_id)
                .collect()
        };

        let map = self.products.read().map_err(|_| poisoned("products"))?;
        let matches = map
            .values()
            .filter(|p| p.is_owned_by(user_id) && in_folder.contains(&p.id))
            .cloned()
            .collect();
        Ok(paginate(matches, page))
    }

    fn all_ids(&self) -> Result<Vec<ProductId>, StoreError> {
        let map = self.products.read().map_err(|_| poisoned("products"))?;
        let mut ids: Vec<ProductId> = map.keys().copied().collect();
        ids.sort_by(|a, b| a.as_uuid().cmp(b.as_uuid()));
        Ok(ids)
    }
}

impl FolderStore for InMemoryStore {
    fn find_by_id(&self, id: FolderId) -> Result<Option<Folder>, StoreError> {
        let map = self.folders.read().map_err(|_| poisoned("folders"))?;
        Ok(map.get(&id).cloned())
    }

    fn save(&self, folder: Folder) -> Result<Folder, StoreError> {
        let mut map = self.folders.write().map_err(|_| poisoned("folders"))?;
        map.insert(folder.id, folder.clone());
        Ok(folder)
    }

    fn find_all_by_user(&self, user_id: UserId) -> Result<Vec<Folder>, StoreError> {
        let map = self.folders.read().map_err(|_| poisoned("folders"))?;
        let mut folders: Vec<Folder> = map
            .values()
            .filter(|f| f.is_owned_by(user_id))
            .cloned()
            .collect();
        folders.sort_by(|a, b| a.id.as_uuid().cmp(b.id.as_uuid()));
        Ok(folders)
    }

    fn find_by_user_and_names(
        &self,
        user_id: UserId,
        names: &[String],
    ) -> Result<Vec<Folder>, StoreError> {
        let map = self.folders.read().map_err(|_| poisoned("folders"))?;
        Ok(map
            .values()
            .filter(|f| f.is_owned_by(user_id) && names.contains(&f.name))
            .cloned()
            .collect())
    }
}

impl ProductFolderStore for InMemoryStore {
    fn find_by_product_and_folder(
        &self,
        product_id: ProductId,
        folder_id: FolderId,
    ) -> Result<Option<ProductFolder>, StoreError> {
        let map = self
            .associations
            .read()
            .map_err(|_| poisoned("associations"))?;
        Ok(map
            .values()
            .find(|a| a.product_id == product_id && a.folder_id == folder_id)
            .cloned())
    }

    fn save(&self, association: ProductFolder) -> Result<ProductFolder, StoreError> {
        let mut map = self
            .associations
            .write()
            .map_err(|_| poisoned("associations"))?;
        map.insert(association.id, association.clone());
        Ok(association)
    }

    fn find_all_by_product(&self, product_id: ProductId) -> Result<Vec<ProductFolder>, StoreError> {
        let map = self
            .associations
            .read()
            .map_err(|_| poisoned("associations"))?;
        Ok(map
            .values()
            .filter(|a| a.product_id == product_id)
            .cloned()
            .collect())
    }
}
