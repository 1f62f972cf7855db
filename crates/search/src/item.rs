//! Search-result snapshot record.

use serde::{Deserialize, Serialize};

/// One externally sourced snapshot of a product's current market data.
///
/// The provider guarantees well-formed data; no shape validation happens on
/// this side of the seam. `lprice` is the lowest listed price, in the
/// provider's currency unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchItem {
    pub title: String,
    pub link: String,
    pub image: String,
    pub lprice: i64,
}

impl SearchItem {
    pub fn new(
        title: impl Into<String>,
        link: impl Into<String>,
        image: impl Into<String>,
        lprice: i64,
    ) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
            image: image.into(),
            lprice,
        }
    }
}
