//! Request/response DTOs for the surrounding transport layer.

use serde::{Deserialize, Serialize};

use selectshop_core::{FolderId, ProductId};
use selectshop_products::{Folder, Product};

/// Registration payload: the market snapshot the user picked from search.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub title: String,
    pub link: String,
    pub image: String,
    pub lprice: i64,
}

/// Client-facing view of a tracked product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductResponse {
    pub id: ProductId,
    pub title: String,
    pub link: String,
    pub image: String,
    pub lowest_price: i64,
    pub my_price: i64,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            title: product.title,
            link: product.link,
            image: product.image,
            lowest_price: product.lowest_price,
            my_price: product.my_price,
        }
    }
}

/// Client-facing view of a folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FolderResponse {
    pub id: FolderId,
    pub name: String,
}

impl From<Folder> for FolderResponse {
    fn from(folder: Folder) -> Self {
        Self {
            id: folder.id,
            name: folder.name,
        }
    }
}
