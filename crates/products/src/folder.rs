use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use selectshop_core::{AssociationId, Entity, FolderId, ProductId, UserId};

/// A user-defined named grouping of tracked products.
///
/// Folder names are unique per owning user; the folder-creation rule enforces
/// this before insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    pub user_id: UserId,
}

impl Folder {
    pub fn new(name: impl Into<String>, user_id: UserId) -> Self {
        Self {
            id: FolderId::new(),
            name: name.into(),
            user_id,
        }
    }

    /// Ownership predicate. The check compares the folder's **owner** to the
    /// actor; comparing the folder's own id to a user id is meaningless.
    pub fn is_owned_by(&self, user_id: UserId) -> bool {
        self.user_id == user_id
    }
}

impl Entity for Folder {
    type Id = FolderId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

/// Association of one product with one folder.
///
/// Created only through the association rule, never updated; a given
/// (product, folder) pair exists at most once, which the rule layer checks
/// before insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductFolder {
    pub id: AssociationId,
    pub product_id: ProductId,
    pub folder_id: FolderId,
    pub created_at: DateTime<Utc>,
}

impl ProductFolder {
    pub fn new(product_id: ProductId, folder_id: FolderId) -> Self {
        Self {
            id: AssociationId::new(),
            product_id,
            folder_id,
            created_at: Utc::now(),
        }
    }
}

impl Entity for ProductFolder {
    type Id = AssociationId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_ownership_compares_owner_not_folder_id() {
        let owner = UserId::new();
        let folder = Folder::new("electronics", owner);

        assert!(folder.is_owned_by(owner));
        assert!(!folder.is_owned_by(UserId::new()));
        // The folder's own id never enters the comparison.
        assert_ne!(folder.id.as_uuid(), owner.as_uuid());
    }

    #[test]
    fn association_links_one_product_to_one_folder() {
        let product_id = ProductId::new();
        let folder_id = FolderId::new();
        let link = ProductFolder::new(product_id, folder_id);

        assert_eq!(link.product_id, product_id);
        assert_eq!(link.folder_id, folder_id);
    }
}
