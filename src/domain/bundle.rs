//! Bundles of entries extracted from one payload.

use serde::{Deserialize, Serialize};

use super::entry::{AssetEntry, AssetKind};

/// An ordered sequence of entries of one asset kind
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetBundle {
    /// Kind of every entry in this bundle
    pub kind: AssetKind,

    /// Entries in payload order
    pub entries: Vec<AssetEntry>,

    /// Bundle name, supplied only when promoting to the library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Bundle description, supplied only when promoting to the library
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AssetBundle {
    /// Create a bundle from parsed entries
    pub fn new(kind: AssetKind, entries: Vec<AssetEntry>) -> Self {
        Self {
            kind,
            entries,
            name: None,
            description: None,
        }
    }

    /// Create an empty bundle of a kind
    pub fn empty(kind: AssetKind) -> Self {
        Self::new(kind, Vec::new())
    }

    /// Attach a bundle name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Attach a bundle description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Number of entries in the bundle
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the bundle has no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
