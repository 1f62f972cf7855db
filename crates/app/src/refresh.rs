//! Price refresh sweep over the search seam.
//!
//! The surrounding infrastructure decides *when* to sweep (cron, worker,
//! admin action); this module only knows how: walk every stored product,
//! ask the provider for its title, apply the best-match snapshot. One
//! product's search failure never aborts the rest of the sweep.

use serde::Serialize;

use selectshop_core::DomainResult;
use selectshop_infra::ProductStore;
use selectshop_search::SearchClient;

/// Outcome counts of one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RefreshReport {
    /// Products updated from a snapshot.
    pub refreshed: usize,
    /// Products with no search hits (or deleted mid-sweep); left untouched.
    pub missed: usize,
    /// Products whose search failed; left untouched.
    pub failed: usize,
}

pub struct PriceRefresher<P, C> {
    products: P,
    client: C,
}

impl<P, C> PriceRefresher<P, C>
where
    P: ProductStore,
    C: SearchClient,
{
    pub fn new(products: P, client: C) -> Self {
        Self { products, client }
    }

    /// Refresh every stored product from the provider's best match.
    ///
    /// A store failure aborts the sweep (nothing sensible can continue
    /// without the store); a search failure only counts against the report.
    pub fn refresh_all(&self) -> DomainResult<RefreshReport> {
        let ids = self.products.all_ids()?;
        let mut report = RefreshReport::default();

        for id in ids {
            let Some(mut product) = self.products.find_by_id(id)? else {
                report.missed += 1;
                continue;
            };

            match self.client.search(&product.title) {
                Ok(items) => match items.first() {
                    Some(snapshot) => {
                        product.apply_search(snapshot);
                        self.products.save(product)?;
                        report.refreshed += 1;
                    }
                    None => report.missed += 1,
                },
                Err(err) => {
                    tracing::warn!(product_id = %id, error = %err, "search failed; sweep continues");
                    report.failed += 1;
                }
            }
        }

        tracing::info!(
            refreshed = report.refreshed,
            missed = report.missed,
            failed = report.failed,
            "price refresh sweep finished"
        );
        Ok(report)
    }
}
