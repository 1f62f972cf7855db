//! Folder rules: batch creation with per-user name uniqueness, listing.

use std::collections::HashSet;

use selectshop_auth::User;
use selectshop_core::message::keys;
use selectshop_core::{DomainError, DomainResult, Locale, MessageResolver};
use selectshop_infra::FolderStore;
use selectshop_products::Folder;

use crate::dto::FolderResponse;

pub struct FolderService<F> {
    folders: F,
    messages: MessageResolver,
    locale: Locale,
}

impl<F> FolderService<F>
where
    F: FolderStore,
{
    pub fn new(folders: F, locale: Locale) -> Self {
        Self {
            folders,
            messages: MessageResolver::new(),
            locale,
        }
    }

    /// Create one folder per name for `user`.
    ///
    /// A name the user already has, or a name repeated within the request,
    /// rejects the whole batch before anything is persisted.
    pub fn add_folders(
        &self,
        names: Vec<String>,
        user: &User,
    ) -> DomainResult<Vec<FolderResponse>> {
        let existing = self.folders.find_by_user_and_names(user.id, &names)?;

        let mut seen = HashSet::new();
        let mut pending = Vec::with_capacity(names.len());
        for name in names {
            let taken = existing.iter().any(|f| f.name == name);
            if taken || !seen.insert(name.clone()) {
                let msg = self.messages.resolve(
                    keys::DUPLICATED_FOLDER_NAME,
                    &[],
                    "Duplicated folder name",
                    self.locale,
                );
                return Err(DomainError::validation(msg));
            }
            pending.push(Folder::new(name, user.id));
        }

        let mut created = Vec::with_capacity(pending.len());
        for folder in pending {
            created.push(FolderResponse::from(self.folders.save(folder)?));
        }
        tracing::info!(user_id = %user.id, count = created.len(), "folders created");
        Ok(created)
    }

    /// The user's folders, id order.
    pub fn folders(&self, user: &User) -> DomainResult<Vec<FolderResponse>> {
        let folders = self.folders.find_all_by_user(user.id)?;
        Ok(folders.into_iter().map(FolderResponse::from).collect())
    }
}
