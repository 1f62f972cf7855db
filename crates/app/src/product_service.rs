//! Product rules: registration, target price, listing, folder filing,
//! search-driven refresh.

use selectshop_auth::{Role, User};
use selectshop_core::message::keys;
use selectshop_core::{
    DomainError, DomainResult, FolderId, Locale, MessageResolver, Page, PageRequest, ProductId,
};
use selectshop_infra::{FolderStore, ProductFolderStore, ProductStore};
use selectshop_products::{MIN_MY_PRICE, Product, ProductFolder, ProductSortField};
use selectshop_search::SearchItem;

use crate::dto::{ProductRequest, ProductResponse};

/// The product-side rule layer.
///
/// Holds the stores it reads and writes, plus the locale it answers in.
/// Each operation runs to completion within one request; violations are
/// raised at the point of detection and nothing is partially applied.
pub struct ProductService<P, F, A> {
    products: P,
    folders: F,
    links: A,
    messages: MessageResolver,
    locale: Locale,
}

impl<P, F, A> ProductService<P, F, A>
where
    P: ProductStore,
    F: FolderStore,
    A: ProductFolderStore,
{
    pub fn new(products: P, folders: F, links: A, locale: Locale) -> Self {
        Self {
            products,
            folders,
            links,
            messages: MessageResolver::new(),
            locale,
        }
    }

    /// Register a product of interest for `user`.
    pub fn create_product(
        &self,
        request: ProductRequest,
        user: &User,
    ) -> DomainResult<ProductResponse> {
        let product = Product::new(
            request.title,
            request.link,
            request.image,
            request.lprice,
            user.id,
        );
        let product = self.products.save(product)?;
        tracing::info!(product_id = %product.id, user_id = %user.id, "product registered");
        Ok(ProductResponse::from(product))
    }

    /// Set the owner's target price.
    ///
    /// The floor check runs before the lookup, so a bad price never costs a
    /// query. Only the target price is touched on success.
    pub fn update_my_price(&self, id: ProductId, my_price: i64) -> DomainResult<ProductResponse> {
        if my_price < MIN_MY_PRICE {
            let floor = MIN_MY_PRICE.to_string();
            let msg = self.messages.resolve(
                keys::BELOW_MIN_MY_PRICE,
                &[floor.as_str()],
                "Wrong Price",
                self.locale,
            );
            return Err(DomainError::validation(msg));
        }

        let mut product = self
            .products
            .find_by_id(id)?
            .ok_or_else(|| self.product_not_found())?;

        product.update_my_price(my_price);
        let product = self.products.save(product)?;
        Ok(ProductResponse::from(product))
    }

    /// Role-scoped paged listing. The scope is decided here and applied by
    /// the store's query, never by filtering a full result set.
    pub fn products(
        &self,
        user: &User,
        page: &PageRequest<ProductSortField>,
    ) -> DomainResult<Page<ProductResponse>> {
        let page = match user.role {
            Role::User => self.products.find_all_by_user(user.id, page)?,
            Role::Admin => self.products.find_all(page)?,
        };
        Ok(page.map(ProductResponse::from))
    }

    /// Paged listing scoped to one folder AND the requesting user; the query
    /// applies both constraints together.
    pub fn products_in_folder(
        &self,
        folder_id: FolderId,
        user: &User,
        page: &PageRequest<ProductSortField>,
    ) -> DomainResult<Page<ProductResponse>> {
        let page = self
            .products
            .find_all_by_user_and_folder(user.id, folder_id, page)?;
        Ok(page.map(ProductResponse::from))
    }

    /// File a product under a folder.
    ///
    /// The requester must own both sides; the folder check compares the
    /// folder's owner to the requester. A (product, folder) pair is filed at
    /// most once.
    pub fn add_folder(
        &self,
        product_id: ProductId,
        folder_id: FolderId,
        user: &User,
    ) -> DomainResult<()> {
        let product = self
            .products
            .find_by_id(product_id)?
            .ok_or_else(|| self.product_not_found())?;
        let folder = self
            .folders
            .find_by_id(folder_id)?
            .ok_or_else(|| self.folder_not_found())?;

        if !product.is_owned_by(user.id) || !folder.is_owned_by(user.id) {
            let msg = self.messages.resolve(
                keys::NOT_YOUR_PRODUCT_OR_FOLDER,
                &[],
                "Not your product or folder",
                self.locale,
            );
            return Err(DomainError::validation(msg));
        }

        if self
            .links
            .find_by_product_and_folder(product_id, folder_id)?
            .is_some()
        {
            let msg = self.messages.resolve(
                keys::DUPLICATED_FOLDER,
                &[],
                "Duplicated folder",
                self.locale,
            );
            return Err(DomainError::validation(msg));
        }

        self.links.save(ProductFolder::new(product_id, folder_id))?;
        tracing::info!(%product_id, %folder_id, "product filed into folder");
        Ok(())
    }

    /// Full-field refresh from an external search snapshot.
    pub fn update_by_search(&self, id: ProductId, item: &SearchItem) -> DomainResult<()> {
        let mut product = self
            .products
            .find_by_id(id)?
            .ok_or_else(|| self.product_not_found())?;
        product.apply_search(item);
        self.products.save(product)?;
        Ok(())
    }

    fn product_not_found(&self) -> DomainError {
        DomainError::not_found(self.messages.resolve(
            keys::NOT_FOUND_PRODUCT,
            &[],
            "Not Found Product",
            self.locale,
        ))
    }

    fn folder_not_found(&self) -> DomainError {
        DomainError::not_found(self.messages.resolve(
            keys::NOT_FOUND_FOLDER,
            &[],
            "Not Found Folder",
            self.locale,
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use selectshop_infra::InMemoryStore;
    use selectshop_products::Folder;

    use super::*;

    type MemService = ProductService<Arc<InMemoryStore>, Arc<InMemoryStore>, Arc<InMemoryStore>>;

    fn service() -> (Arc<InMemoryStore>, MemService) {
        let store = Arc::new(InMemoryStore::new());
        let service =
            ProductService::new(store.clone(), store.clone(), store.clone(), Locale::En);
        (store, service)
    }

    fn plain_user() -> User {
        User::new(selectshop_core::UserId::new(), "alice", Role::User)
    }

    fn request(title: &str, lprice: i64) -> ProductRequest {
        ProductRequest {
            title: title.to_string(),
            link: "https://shop.example/item".to_string(),
            image: "https://img.example/item.png".to_string(),
            lprice,
        }
    }

    fn page_by_id() -> PageRequest<ProductSortField> {
        PageRequest::new(0, 10, ProductSortField::Id, true)
    }

    #[test]
    fn price_below_floor_is_rejected_and_nothing_changes() {
        let (store, service) = service();
        let user = plain_user();
        let created = service.create_product(request("mouse", 20_000), &user).unwrap();

        let err = service.update_my_price(created.id, 99).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "validation failed: The target price must be at least 100."
        );

        let products: &dyn ProductStore = store.as_ref();
        let stored = products.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(stored.my_price, 0);
    }

    #[test]
    fn price_at_floor_is_accepted() {
        let (store, service) = service();
        let user = plain_user();
        let created = service.create_product(request("mouse", 20_000), &user).unwrap();

        let updated = service.update_my_price(created.id, MIN_MY_PRICE).unwrap();
        assert_eq!(updated.my_price, MIN_MY_PRICE);

        // Nothing but the target price moved.
        let products: &dyn ProductStore = store.as_ref();
        let stored = products.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(stored.title, "mouse");
        assert_eq!(stored.lowest_price, 20_000);
        assert_eq!(stored.my_price, MIN_MY_PRICE);
    }

    #[test]
    fn price_update_on_unknown_id_is_not_found() {
        let (_store, service) = service();
        let err = service.update_my_price(ProductId::new(), 500).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn rejection_message_is_locale_resolved() {
        let store = Arc::new(InMemoryStore::new());
        let service: MemService =
            ProductService::new(store.clone(), store.clone(), store, Locale::Ko);
        let user = plain_user();
        let created = service.create_product(request("키보드", 50_000), &user).unwrap();

        let err = service.update_my_price(created.id, 1).unwrap_err();
        let DomainError::Validation(msg) = err else {
            panic!("expected validation error");
        };
        assert_eq!(msg, "최소 100원 이상으로 설정해 주세요.");
    }

    #[test]
    fn filing_twice_is_rejected_without_a_second_row() {
        let (store, service) = service();
        let user = plain_user();
        let created = service.create_product(request("mouse", 20_000), &user).unwrap();

        let folders: &dyn FolderStore = store.as_ref();
        let folder = folders.save(Folder::new("gadgets", user.id)).unwrap();

        service.add_folder(created.id, folder.id, &user).unwrap();
        let err = service.add_folder(created.id, folder.id, &user).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let links: &dyn ProductFolderStore = store.as_ref();
        assert_eq!(links.find_all_by_product(created.id).unwrap().len(), 1);
    }

    #[test]
    fn filing_requires_owning_the_product() {
        let (store, service) = service();
        let owner = plain_user();
        let requester = plain_user();
        let created = service.create_product(request("mouse", 20_000), &owner).unwrap();

        // The requester owns the folder but not the product.
        let folders: &dyn FolderStore = store.as_ref();
        let folder = folders.save(Folder::new("mine", requester.id)).unwrap();

        let err = service.add_folder(created.id, folder.id, &requester).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));

        let links: &dyn ProductFolderStore = store.as_ref();
        assert!(links.find_all_by_product(created.id).unwrap().is_empty());
    }

    #[test]
    fn filing_requires_owning_the_folder() {
        let (store, service) = service();
        let owner = plain_user();
        let other = plain_user();
        let created = service.create_product(request("mouse", 20_000), &owner).unwrap();

        // The requester owns the product but the folder belongs to somebody
        // else; the check compares the folder's owner, not the folder id.
        let folders: &dyn FolderStore = store.as_ref();
        let folder = folders.save(Folder::new("theirs", other.id)).unwrap();

        let err = service.add_folder(created.id, folder.id, &owner).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn filing_into_missing_folder_is_not_found() {
        let (_store, service) = service();
        let user = plain_user();
        let created = service.create_product(request("mouse", 20_000), &user).unwrap();

        let err = service
            .add_folder(created.id, FolderId::new(), &user)
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    #[test]
    fn plain_user_sees_only_their_products() {
        let (_store, service) = service();
        let u = plain_user();
        let other = plain_user();

        let a = service.create_product(request("A", 50), &u).unwrap();
        let b = service.create_product(request("B", 200), &u).unwrap();
        let _c = service.create_product(request("C", 75), &other).unwrap();

        let page = service.products(&u, &page_by_id()).unwrap();
        assert_eq!(page.total_elements, 2);
        let mut ids: Vec<ProductId> = page.items.iter().map(|p| p.id).collect();
        ids.sort_by(|x, y| x.as_uuid().cmp(y.as_uuid()));
        let mut expected = vec![a.id, b.id];
        expected.sort_by(|x, y| x.as_uuid().cmp(y.as_uuid()));
        assert_eq!(ids, expected);
    }

    #[test]
    fn admin_sees_every_product() {
        let (_store, service) = service();
        let u = plain_user();
        let other = plain_user();
        let admin = User::new(selectshop_core::UserId::new(), "root", Role::Admin);

        service.create_product(request("A", 50), &u).unwrap();
        service.create_product(request("B", 200), &u).unwrap();
        service.create_product(request("C", 75), &other).unwrap();

        let page = service.products(&admin, &page_by_id()).unwrap();
        assert_eq!(page.total_elements, 3);

        // The admin's own empty catalog plays no part in the scope.
        let own = service.products(&u, &page_by_id()).unwrap();
        assert_eq!(own.total_elements, 2);
    }

    #[test]
    fn folder_listing_combines_folder_and_owner() {
        let (store, service) = service();
        let u = plain_user();

        let filed = service.create_product(request("filed", 100), &u).unwrap();
        let _loose = service.create_product(request("loose", 200), &u).unwrap();

        let folders: &dyn FolderStore = store.as_ref();
        let folder = folders.save(Folder::new("picks", u.id)).unwrap();
        service.add_folder(filed.id, folder.id, &u).unwrap();

        let page = service
            .products_in_folder(folder.id, &u, &page_by_id())
            .unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(page.items[0].id, filed.id);

        // Somebody else looking at the same folder sees nothing.
        let stranger = plain_user();
        let empty = service
            .products_in_folder(folder.id, &stranger, &page_by_id())
            .unwrap();
        assert_eq!(empty.total_elements, 0);
    }

    #[test]
    fn search_update_replaces_tracked_fields_exactly() {
        let (store, service) = service();
        let user = plain_user();
        let created = service.create_product(request("SSD 1TB", 120_000), &user).unwrap();
        service.update_my_price(created.id, 100_000).unwrap();

        let item = SearchItem::new(
            "SSD 1TB NVMe",
            "https://shop.example/ssd-new",
            "https://img.example/ssd-new.png",
            99_000,
        );
        service.update_by_search(created.id, &item).unwrap();

        let products: &dyn ProductStore = store.as_ref();
        let stored = products.find_by_id(created.id).unwrap().unwrap();
        assert_eq!(stored.title, item.title);
        assert_eq!(stored.link, item.link);
        assert_eq!(stored.image, item.image);
        assert_eq!(stored.lowest_price, item.lprice);
        // The owner's target survives a refresh.
        assert_eq!(stored.my_price, 100_000);
    }

    #[test]
    fn search_update_on_unknown_id_is_not_found() {
        let (_store, service) = service();
        let item = SearchItem::new("x", "https://l", "https://i", 1);
        let err = service.update_by_search(ProductId::new(), &item).unwrap_err();
        assert!(matches!(err, DomainError::NotFound(_)));
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: every price below the floor is rejected and the
            /// stored product keeps its previous target.
            #[test]
            fn prices_below_floor_never_stick(p in i64::MIN..MIN_MY_PRICE) {
                let (store, service) = service();
                let user = plain_user();
                let created = service.create_product(request("m", 1_000), &user).unwrap();

                let err = service.update_my_price(created.id, p).unwrap_err();
                prop_assert!(matches!(err, DomainError::Validation(_)));

                let products: &dyn ProductStore = store.as_ref();
                let stored = products.find_by_id(created.id).unwrap().unwrap();
                prop_assert_eq!(stored.my_price, 0);
            }

            /// Property: every price at or above the floor is applied as-is.
            #[test]
            fn prices_at_or_above_floor_apply(p in MIN_MY_PRICE..10_000_000i64) {
                let (_store, service) = service();
                let user = plain_user();
                let created = service.create_product(request("m", 1_000), &user).unwrap();

                let updated = service.update_my_price(created.id, p).unwrap();
                prop_assert_eq!(updated.my_price, p);
            }
        }
    }
}
