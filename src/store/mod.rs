//! Persistence collaborator interfaces.
//!
//! The engine reads and mutates character collections and library records
//! only through these seams. File-backed implementations persist JSON
//! documents under explicitly injected directories; tests root them in a
//! tempdir.

pub mod character;
pub mod library;

use async_trait::async_trait;

use crate::domain::{AssetBundle, AssetEntry, AssetKind};
use crate::error::ImportError;
use crate::library::LibraryItem;

pub use character::FileCharacterStore;
pub use library::FileLibraryStore;

/// Persistence for a character's per-kind entry collections
#[async_trait]
pub trait CharacterStore: Send + Sync {
    /// Load a character's collection of one kind (empty if none stored)
    async fn load(
        &self,
        character_id: &str,
        kind: AssetKind,
    ) -> Result<Vec<AssetEntry>, ImportError>;

    /// Replace a character's collection of one kind
    async fn save(
        &self,
        character_id: &str,
        kind: AssetKind,
        entries: &[AssetEntry],
    ) -> Result<(), ImportError>;
}

/// Key-value persistence for library items and their bundles
#[async_trait]
pub trait LibraryStore: Send + Sync {
    /// Store a library item's metadata and bundle content
    async fn put(&self, item: &LibraryItem, bundle: &AssetBundle) -> Result<(), ImportError>;

    /// Fetch a library item's metadata by id
    async fn get_item(&self, id: &str) -> Result<Option<LibraryItem>, ImportError>;

    /// Fetch a library item's stored bundle by id
    async fn get_bundle(&self, id: &str) -> Result<Option<AssetBundle>, ImportError>;

    /// List all stored library items
    async fn list(&self) -> Result<Vec<LibraryItem>, ImportError>;

    /// Remove an item and its bundle; returns false when absent
    async fn remove(&self, id: &str) -> Result<bool, ImportError>;
}
