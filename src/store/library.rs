//! File-backed library store.
//!
//! Each library item occupies one directory keyed by its generated id:
//!
//! ```text
//! <library_dir>/<id>/item.json     # metadata record
//! <library_dir>/<id>/bundle.json   # stored bundle content
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::AssetBundle;
use crate::error::ImportError;
use crate::library::LibraryItem;

use super::LibraryStore;

const ITEM_FILE: &str = "item.json";
const BUNDLE_FILE: &str = "bundle.json";

/// JSON-on-disk implementation of [`LibraryStore`]
pub struct FileLibraryStore {
    root: PathBuf,
}

impl FileLibraryStore {
    /// Create a store rooted at the given library directory
    pub fn new(library_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: library_dir.into(),
        }
    }

    fn item_dir(&self, id: &str) -> PathBuf {
        self.root.join(id)
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        path: &Path,
    ) -> Result<Option<T>, ImportError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(path)
            .await
            .map_err(|e| ImportError::persistence(format!("failed to read {}: {}", path.display(), e)))?;

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| {
                ImportError::persistence(format!("stored record is corrupt: {}: {}", path.display(), e))
            })
    }

    async fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), ImportError> {
        let content = serde_json::to_string_pretty(value)
            .map_err(|e| ImportError::persistence(format!("failed to encode record: {}", e)))?;

        fs::write(path, content)
            .await
            .map_err(|e| ImportError::persistence(format!("failed to write {}: {}", path.display(), e)))
    }
}

#[async_trait]
impl LibraryStore for FileLibraryStore {
    async fn put(&self, item: &LibraryItem, bundle: &AssetBundle) -> Result<(), ImportError> {
        let dir = self.item_dir(&item.id);
        fs::create_dir_all(&dir).await?;

        Self::write_json(&dir.join(ITEM_FILE), item).await?;
        Self::write_json(&dir.join(BUNDLE_FILE), bundle).await
    }

    async fn get_item(&self, id: &str) -> Result<Option<LibraryItem>, ImportError> {
        Self::read_json(&self.item_dir(id).join(ITEM_FILE)).await
    }

    async fn get_bundle(&self, id: &str) -> Result<Option<AssetBundle>, ImportError> {
        Self::read_json(&self.item_dir(id).join(BUNDLE_FILE)).await
    }

    async fn list(&self) -> Result<Vec<LibraryItem>, ImportError> {
        if !self.root.exists() {
            return Ok(Vec::new());
        }

        let mut items = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;

        while let Some(entry) = entries.next_entry().await? {
            let item_path = entry.path().join(ITEM_FILE);
            if let Some(item) = Self::read_json::<LibraryItem>(&item_path).await? {
                items.push(item);
            }
        }

        Ok(items)
    }

    async fn remove(&self, id: &str) -> Result<bool, ImportError> {
        let dir = self.item_dir(id);

        if !dir.join(ITEM_FILE).exists() {
            return Ok(false);
        }

        fs::remove_dir_all(&dir)
            .await
            .map_err(|e| ImportError::persistence(format!("failed to remove {}: {}", dir.display(), e)))?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::AssetKind;
    use tempfile::TempDir;

    fn item_and_bundle(name: &str) -> (LibraryItem, AssetBundle) {
        let bundle = AssetBundle::empty(AssetKind::Worldbook).with_name(name);
        let item = LibraryItem::new(name, AssetKind::Worldbook, bundle.len());
        (item, bundle)
    }

    #[tokio::test]
    async fn test_put_get_round_trip() {
        let temp = TempDir::new().unwrap();
        let store = FileLibraryStore::new(temp.path());

        let (item, bundle) = item_and_bundle("Village lore");
        store.put(&item, &bundle).await.unwrap();

        let loaded = store.get_item(&item.id).await.unwrap().unwrap();
        assert_eq!(loaded.name, "Village lore");

        let loaded_bundle = store.get_bundle(&item.id).await.unwrap().unwrap();
        assert_eq!(loaded_bundle.name.as_deref(), Some("Village lore"));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let temp = TempDir::new().unwrap();
        let store = FileLibraryStore::new(temp.path());

        assert!(store.get_item("missing").await.unwrap().is_none());
        assert!(store.get_bundle("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_and_remove() {
        let temp = TempDir::new().unwrap();
        let store = FileLibraryStore::new(temp.path());

        let (a, bundle_a) = item_and_bundle("a");
        let (b, bundle_b) = item_and_bundle("b");
        store.put(&a, &bundle_a).await.unwrap();
        store.put(&b, &bundle_b).await.unwrap();

        assert_eq!(store.list().await.unwrap().len(), 2);

        assert!(store.remove(&a.id).await.unwrap());
        assert!(!store.remove(&a.id).await.unwrap());
        assert_eq!(store.list().await.unwrap().len(), 1);
    }
}
