//! Library item metadata.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::AssetKind;

/// A named, reusable bundle stored independently of any character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryItem {
    /// Generated unique id
    pub id: String,

    /// Display name
    pub name: String,

    /// Optional description
    #[serde(default)]
    pub description: String,

    /// Asset kind of the stored bundle
    pub kind: AssetKind,

    /// Number of entries in the stored bundle
    pub item_count: usize,

    /// Name of the character the bundle was originally imported into
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_character: Option<String>,

    /// When the item was created
    pub created_at: DateTime<Utc>,
}

impl LibraryItem {
    /// Create a new item with a generated id and current timestamp
    pub fn new(name: impl Into<String>, kind: AssetKind, item_count: usize) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            description: String::new(),
            kind,
            item_count,
            source_character: None,
            created_at: Utc::now(),
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Record the originating character
    pub fn with_source_character(mut self, character: impl Into<String>) -> Self {
        self.source_character = Some(character.into());
        self
    }
}
