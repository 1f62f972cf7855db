//! Search client trait + canned implementation.

use std::collections::HashMap;
use std::sync::RwLock;

use thiserror::Error;

use crate::item::SearchItem;

#[derive(Debug, Error)]
pub enum SearchError {
    /// The provider rejected or failed the query.
    #[error("search provider failure: {0}")]
    Provider(String),

    /// The provider could not be reached.
    #[error("search provider unreachable: {0}")]
    Unreachable(String),
}

/// Shopping-search provider seam.
///
/// `search` returns the provider's item snapshots for a free-text query,
/// best match first. Implementations decide paging/limits themselves; the
/// rule layer never sees more than it asked for.
pub trait SearchClient: Send + Sync {
    fn search(&self, query: &str) -> Result<Vec<SearchItem>, SearchError>;
}

impl<S> SearchClient for std::sync::Arc<S>
where
    S: SearchClient + ?Sized,
{
    fn search(&self, query: &str) -> Result<Vec<SearchItem>, SearchError> {
        (**self).search(query)
    }
}

/// Canned in-memory client for tests/dev.
///
/// Returns the items registered for an exact query string, an empty list for
/// unknown queries, and an injected failure if one was armed.
#[derive(Debug, Default)]
pub struct FixedSearchClient {
    responses: RwLock<HashMap<String, Vec<SearchItem>>>,
    failures: RwLock<HashMap<String, String>>,
}

impl FixedSearchClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_response(self, query: impl Into<String>, items: Vec<SearchItem>) -> Self {
        if let Ok(mut map) = self.responses.write() {
            map.insert(query.into(), items);
        }
        self
    }

    /// Make `search` fail with a provider error for this exact query.
    pub fn with_failure(self, query: impl Into<String>, reason: impl Into<String>) -> Self {
        if let Ok(mut map) = self.failures.write() {
            map.insert(query.into(), reason.into());
        }
        self
    }
}

impl SearchClient for FixedSearchClient {
    fn search(&self, query: &str) -> Result<Vec<SearchItem>, SearchError> {
        if let Ok(map) = self.failures.read() {
            if let Some(reason) = map.get(query) {
                return Err(SearchError::Provider(reason.clone()));
            }
        }
        let map = self
            .responses
            .read()
            .map_err(|_| SearchError::Provider("poisoned response table".to_string()))?;
        Ok(map.get(query).cloned().unwrap_or_default())
    }
}
