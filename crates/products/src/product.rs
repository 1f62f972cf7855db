use core::cmp::Ordering;
use core::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use selectshop_core::{DomainError, Entity, ProductId, UserId};
use selectshop_search::SearchItem;

/// Floor for a user-set target price, in the source's currency unit.
pub const MIN_MY_PRICE: i64 = 100;

/// A product a user tracks.
///
/// Exclusively owned by one user. `lowest_price` is the last observed market
/// price; `my_price` is the owner's target. Created on registration, mutated
/// by owner price updates or search refreshes, never deleted in scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    pub link: String,
    pub image: String,
    pub lowest_price: i64,
    pub my_price: i64,
    pub user_id: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Register a new tracked product for `user_id`. The target price starts
    /// at 0 until the owner sets one.
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        image: impl Into<String>,
        lowest_price: i64,
        user_id: UserId,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ProductId::new(),
            title: title.into(),
            link: link.into(),
            image: image.into(),
            lowest_price,
            my_price: 0,
            user_id,
            created_at: now,
            updated_at: now,
        }
    }

    /// Ownership predicate; the rule layer never reaches through nested
    /// fields to compare ids.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }

    /// Set the owner's target price. Only `my_price` (and `updated_at`)
    /// changes; validation against [`MIN_MY_PRICE`] is the rule layer's job
    /// so the rejection message can be localized there.
    pub fn update_my_price(&mut self, my_price: i64) {
        self.my_price = my_price;
        self.updated_at = Utc::now();
    }

    /// Full-field refresh from an external search snapshot. Every refreshable
    /// field is replaced unconditionally; this is not a merge.
    pub fn apply_search(&mut self, item: &SearchItem) {
        self.title = item.title.clone();
        self.link = item.link.clone();
        self.image = item.image.clone();
        self.lowest_price = item.lprice;
        self.updated_at = Utc::now();
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Sortable fields
// ─────────────────────────────────────────────────────────────────────────────

/// Allow-list of product fields a caller may sort by.
///
/// Caller-supplied field names are parsed against this list and rejected with
/// a validation error, so an unknown or hostile name never reaches a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortField {
    Id,
    Title,
    LowestPrice,
    MyPrice,
    CreatedAt,
}

impl ProductSortField {
    /// Column name for SQL `ORDER BY`; interpolation is safe because the
    /// variant set is closed.
    pub fn column(&self) -> &'static str {
        match self {
            ProductSortField::Id => "id",
            ProductSortField::Title => "title",
            ProductSortField::LowestPrice => "lowest_price",
            ProductSortField::MyPrice => "my_price",
            ProductSortField::CreatedAt => "created_at",
        }
    }

    /// Ascending comparison of two products on this field, for stores that
    /// sort in process. Ties fall back to id so ordering is total.
    pub fn compare(&self, a: &Product, b: &Product) -> Ordering {
        let primary = match self {
            ProductSortField::Id => a.id.as_uuid().cmp(b.id.as_uuid()),
            ProductSortField::Title => a.title.cmp(&b.title),
            ProductSortField::LowestPrice => a.lowest_price.cmp(&b.lowest_price),
            ProductSortField::MyPrice => a.my_price.cmp(&b.my_price),
            ProductSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        };
        primary.then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
    }
}

impl FromStr for ProductSortField {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" => Ok(ProductSortField::Id),
            "title" => Ok(ProductSortField::Title),
            "lprice" | "lowest_price" => Ok(ProductSortField::LowestPrice),
            "myprice" | "my_price" => Ok(ProductSortField::MyPrice),
            "created_at" => Ok(ProductSortField::CreatedAt),
            other => Err(DomainError::validation(format!(
                "unsupported sort field: {other}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(user_id: UserId) -> Product {
        Product::new(
            "Apple AirPods Pro",
            "https://shop.example/airpods",
            "https://img.example/airpods.png",
            359_000,
            user_id,
        )
    }

    #[test]
    fn new_product_starts_without_target_price() {
        let product = sample(UserId::new());
        assert_eq!(product.my_price, 0);
        assert_eq!(product.lowest_price, 359_000);
    }

    #[test]
    fn ownership_compares_owner_to_actor() {
        let owner = UserId::new();
        let product = sample(owner);
        assert!(product.is_owned_by(owner));
        assert!(!product.is_owned_by(UserId::new()));
    }

    #[test]
    fn update_my_price_touches_only_the_target_price() {
        let mut product = sample(UserId::new());
        let before = product.clone();

        product.update_my_price(300_000);

        assert_eq!(product.my_price, 300_000);
        assert_eq!(product.title, before.title);
        assert_eq!(product.link, before.link);
        assert_eq!(product.image, before.image);
        assert_eq!(product.lowest_price, before.lowest_price);
        assert_eq!(product.user_id, before.user_id);
        assert_eq!(product.created_at, before.created_at);
    }

    #[test]
    fn apply_search_replaces_every_refreshable_field() {
        let mut product = sample(UserId::new());
        let item = SearchItem::new(
            "Apple AirPods Pro 2",
            "https://shop.example/airpods2",
            "https://img.example/airpods2.png",
            329_000,
        );

        product.apply_search(&item);

        assert_eq!(product.title, item.title);
        assert_eq!(product.link, item.link);
        assert_eq!(product.image, item.image);
        assert_eq!(product.lowest_price, item.lprice);
    }

    #[test]
    fn apply_search_does_not_merge_old_values() {
        let mut product = sample(UserId::new());
        product.update_my_price(300_000);
        let item = SearchItem::new("X", "", "", 0);

        product.apply_search(&item);

        // Refresh overwrites even with "worse" values; only my_price survives.
        assert_eq!(product.title, "X");
        assert_eq!(product.link, "");
        assert_eq!(product.lowest_price, 0);
        assert_eq!(product.my_price, 300_000);
    }

    #[test]
    fn sort_field_parses_known_names_only() {
        assert_eq!("id".parse::<ProductSortField>().unwrap(), ProductSortField::Id);
        assert_eq!(
            "lprice".parse::<ProductSortField>().unwrap(),
            ProductSortField::LowestPrice
        );
        assert_eq!(
            "my_price".parse::<ProductSortField>().unwrap(),
            ProductSortField::MyPrice
        );
        assert!(matches!(
            "title; DROP TABLE product".parse::<ProductSortField>(),
            Err(DomainError::Validation(_))
        ));
    }

    #[test]
    fn compare_orders_by_field_then_id() {
        let user = UserId::new();
        let mut a = sample(user);
        let mut b = sample(user);
        a.id = ProductId::from_uuid(uuid::Uuid::from_u128(1));
        b.id = ProductId::from_uuid(uuid::Uuid::from_u128(2));
        a.lowest_price = 100;
        b.lowest_price = 100;

        // Equal on the field: id decides.
        assert_eq!(
            ProductSortField::LowestPrice.compare(&a, &b),
            Ordering::Less
        );

        b.lowest_price = 50;
        assert_eq!(
            ProductSortField::LowestPrice.compare(&a, &b),
            Ordering::Greater
        );
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            /// Property: a refresh always leaves the product equal to the
            /// snapshot on every refreshable field, whatever the prior state.
            #[test]
            fn refresh_is_snapshot_not_merge(
                title in "[A-Za-z0-9 ]{1,40}",
                lprice in 0i64..10_000_000,
                prior_my_price in 0i64..10_000_000,
            ) {
                let mut product = sample(UserId::new());
                product.update_my_price(prior_my_price);

                let item = SearchItem::new(title.clone(), "https://l", "https://i", lprice);
                product.apply_search(&item);

                prop_assert_eq!(product.title, title);
                prop_assert_eq!(product.lowest_price, lprice);
                prop_assert_eq!(product.my_price, prior_my_price);
            }

            /// Property: sorting comparison is a total order (antisymmetric
            /// on distinct products thanks to the id tiebreak).
            #[test]
            fn compare_is_total(lp_a in 0i64..1000, lp_b in 0i64..1000) {
                let user = UserId::new();
                let mut a = sample(user);
                let mut b = sample(user);
                a.lowest_price = lp_a;
                b.lowest_price = lp_b;

                let ab = ProductSortField::LowestPrice.compare(&a, &b);
                let ba = ProductSortField::LowestPrice.compare(&b, &a);
                prop_assert_eq!(ab, ba.reverse());
            }
        }
    }
}
