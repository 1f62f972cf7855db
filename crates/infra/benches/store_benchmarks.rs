use criterion::{Criterion, black_box, criterion_group, criterion_main};

use selectshop_core::{PageRequest, UserId};
use selectshop_infra::{InMemoryStore, ProductStore};
use selectshop_products::{Product, ProductSortField};

fn seeded_store(owner: UserId, owned: usize, foreign: usize) -> InMemoryStore {
    let store = InMemoryStore::new();
    let products: &dyn ProductStore = &store;
    let stranger = UserId::new();
    for n in 0..owned {
        products
            .save(Product::new(
                format!("product {n}"),
                "https://shop.example/p",
                "https://img.example/p.png",
                n as i64,
                owner,
            ))
            .unwrap();
    }
    for n in 0..foreign {
        products
            .save(Product::new(
                format!("other {n}"),
                "https://shop.example/o",
                "https://img.example/o.png",
                n as i64,
                stranger,
            ))
            .unwrap();
    }
    store
}

fn bench_paged_listing(c: &mut Criterion) {
    let owner = UserId::new();
    let store = seeded_store(owner, 1_000, 1_000);
    let products: &dyn ProductStore = &store;

    c.bench_function("find_all_by_user/page_50_of_1000", |b| {
        let page = PageRequest::new(3, 50, ProductSortField::LowestPrice, true);
        b.iter(|| black_box(products.find_all_by_user(owner, &page).unwrap()))
    });

    c.bench_function("find_all/page_50_of_2000", |b| {
        let page = PageRequest::new(3, 50, ProductSortField::Id, false);
        b.iter(|| black_box(products.find_all(&page).unwrap()))
    });
}

criterion_group!(benches, bench_paged_listing);
criterion_main!(benches);
