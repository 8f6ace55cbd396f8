//! Global library operations.
//!
//! The library is decoupled from any character: creating an item copies the
//! bundle into the library store, and importing from the library copies
//! entries into a character through the same merge engine as a file import.
//! Deleting an item never touches collections that previously imported
//! from it.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::core::merge::merge;
use crate::domain::{AssetBundle, AssetKind, ImportReport};
use crate::error::ImportError;
use crate::store::{CharacterStore, LibraryStore};

use super::item::LibraryItem;

/// Manages the cross-character library of reusable bundles
pub struct LibraryManager {
    library: Arc<dyn LibraryStore>,
    characters: Arc<dyn CharacterStore>,
}

impl LibraryManager {
    /// Create a manager over the injected stores
    pub fn new(library: Arc<dyn LibraryStore>, characters: Arc<dyn CharacterStore>) -> Self {
        Self {
            library,
            characters,
        }
    }

    /// Store a bundle as a new named library item.
    ///
    /// Fails with `Validation` when the name is empty after trimming.
    #[instrument(skip(self, bundle), fields(kind = %bundle.kind))]
    pub async fn create(
        &self,
        bundle: &AssetBundle,
        name: &str,
        description: Option<&str>,
        source_character: Option<&str>,
    ) -> Result<LibraryItem, ImportError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ImportError::Validation {
                detail: "library item name must not be empty".to_string(),
            });
        }

        let mut item = LibraryItem::new(name, bundle.kind, bundle.len());
        if let Some(description) = description {
            item = item.with_description(description);
        }
        if let Some(source) = source_character {
            item = item.with_source_character(source);
        }

        self.library.put(&item, bundle).await?;
        info!(id = %item.id, name, entries = item.item_count, "Created library item");

        Ok(item)
    }

    /// List library items, most recent first.
    ///
    /// Ties on creation time break by id so the order is deterministic.
    pub async fn list(&self, kind: Option<AssetKind>) -> Result<Vec<LibraryItem>, ImportError> {
        let mut items = self.library.list().await?;

        if let Some(kind) = kind {
            items.retain(|i| i.kind == kind);
        }

        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    /// Fetch one item's metadata
    pub async fn get(&self, id: &str) -> Result<LibraryItem, ImportError> {
        self.library
            .get_item(id)
            .await?
            .ok_or_else(|| ImportError::NotFound { id: id.to_string() })
    }

    /// Fetch one item's stored bundle
    pub async fn bundle(&self, id: &str) -> Result<AssetBundle, ImportError> {
        self.library
            .get_bundle(id)
            .await?
            .ok_or_else(|| ImportError::NotFound { id: id.to_string() })
    }

    /// Import a stored bundle into a character's collection.
    ///
    /// Runs the same dedup merge as a file import; the report carries no
    /// per-file breakdown since there is exactly one logical source.
    #[instrument(skip(self), fields(library_item = %id, character = %character_id))]
    pub async fn import_into(
        &self,
        id: &str,
        character_id: &str,
    ) -> Result<ImportReport, ImportError> {
        let bundle = self
            .library
            .get_bundle(id)
            .await?
            .ok_or_else(|| ImportError::NotFound { id: id.to_string() })?;

        let existing = self.characters.load(character_id, bundle.kind).await?;
        let outcome = merge(&existing, &bundle);
        self.characters
            .save(character_id, bundle.kind, &outcome.updated)
            .await?;

        info!(
            imported = outcome.imported,
            skipped = outcome.skipped,
            "Imported from library"
        );

        Ok(ImportReport::single(outcome.imported, outcome.skipped))
    }

    /// Delete an item and its stored bundle.
    ///
    /// Never cascades: entries already merged into characters are copies.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: &str) -> Result<bool, ImportError> {
        if !self.library.remove(id).await? {
            return Err(ImportError::NotFound { id: id.to_string() });
        }

        info!(id, "Deleted library item");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FileCharacterStore, FileLibraryStore};
    use tempfile::TempDir;

    fn manager(temp: &TempDir) -> LibraryManager {
        LibraryManager::new(
            Arc::new(FileLibraryStore::new(temp.path().join("library"))),
            Arc::new(FileCharacterStore::new(temp.path())),
        )
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);
        let bundle = AssetBundle::empty(AssetKind::Worldbook);

        let err = manager.create(&bundle, "   ", None, None).await.unwrap_err();
        assert!(matches!(err, ImportError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_create_trims_name_and_records_provenance() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);
        let bundle = AssetBundle::empty(AssetKind::Worldbook);

        let item = manager
            .create(&bundle, "  Village lore  ", Some("desc"), Some("Mira"))
            .await
            .unwrap();

        assert_eq!(item.name, "Village lore");
        assert_eq!(item.description, "desc");
        assert_eq!(item.source_character.as_deref(), Some("Mira"));
    }

    #[tokio::test]
    async fn test_get_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        let err = manager.get("nope").await.unwrap_err();
        assert!(matches!(err, ImportError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        let err = manager.delete("nope").await.unwrap_err();
        assert!(matches!(err, ImportError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_list_filters_by_kind() {
        let temp = TempDir::new().unwrap();
        let manager = manager(&temp);

        manager
            .create(&AssetBundle::empty(AssetKind::Worldbook), "w", None, None)
            .await
            .unwrap();
        manager
            .create(&AssetBundle::empty(AssetKind::RegexScript), "r", None, None)
            .await
            .unwrap();

        let all = manager.list(None).await.unwrap();
        assert_eq!(all.len(), 2);

        let worldbooks = manager.list(Some(AssetKind::Worldbook)).await.unwrap();
        assert_eq!(worldbooks.len(), 1);
        assert_eq!(worldbooks[0].name, "w");
    }
}
