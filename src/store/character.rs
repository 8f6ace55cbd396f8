//! File-backed character collection store.
//!
//! One JSON document per character per asset kind:
//!
//! ```text
//! <data_dir>/characters/<character_id>/worldbook.json
//! <data_dir>/characters/<character_id>/regex.json
//! ```

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;

use crate::domain::{AssetEntry, AssetKind};
use crate::error::ImportError;

use super::CharacterStore;

/// JSON-on-disk implementation of [`CharacterStore`]
pub struct FileCharacterStore {
    root: PathBuf,
}

impl FileCharacterStore {
    /// Create a store rooted at the given data directory
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            root: data_dir.into().join("characters"),
        }
    }

    fn collection_path(&self, character_id: &str, kind: AssetKind) -> PathBuf {
        self.root.join(character_id).join(format!("{}.json", kind))
    }
}

#[async_trait]
impl CharacterStore for FileCharacterStore {
    async fn load(
        &self,
        character_id: &str,
        kind: AssetKind,
    ) -> Result<Vec<AssetEntry>, ImportError> {
        let path = self.collection_path(character_id, kind);

        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path)
            .await
            .map_err(|e| read_error(&path, e))?;

        serde_json::from_str(&content).map_err(|e| {
            ImportError::persistence(format!(
                "stored collection is corrupt: {}: {}",
                path.display(),
                e
            ))
        })
    }

    async fn save(
        &self,
        character_id: &str,
        kind: AssetKind,
        entries: &[AssetEntry],
    ) -> Result<(), ImportError> {
        let path = self.collection_path(character_id, kind);

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| ImportError::persistence(format!("failed to encode collection: {}", e)))?;

        fs::write(&path, content)
            .await
            .map_err(|e| write_error(&path, e))
    }
}

fn read_error(path: &Path, e: std::io::Error) -> ImportError {
    ImportError::persistence(format!("failed to read {}: {}", path.display(), e))
}

fn write_error(path: &Path, e: std::io::Error) -> ImportError {
    ImportError::persistence(format!("failed to write {}: {}", path.display(), e))
}
