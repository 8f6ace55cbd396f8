//! Importable asset entries.
//!
//! Two asset kinds share one import/merge/library pattern: worldbook lore
//! entries and text-transformation ("regex") scripts. Within one character's
//! collection of one kind, identity keys are unique; a colliding re-import is
//! a skip, never an overwrite.

use serde::{Deserialize, Serialize};

/// The two asset kinds the engine handles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetKind {
    /// Worldbook lore entry
    Worldbook,

    /// Text-transformation script
    RegexScript,
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssetKind::Worldbook => write!(f, "worldbook"),
            AssetKind::RegexScript => write!(f, "regex"),
        }
    }
}

impl std::str::FromStr for AssetKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> anyhow::Result<Self> {
        match s.to_lowercase().as_str() {
            "worldbook" | "lore" | "lorebook" => Ok(AssetKind::Worldbook),
            "regex" | "script" | "regex_script" => Ok(AssetKind::RegexScript),
            _ => anyhow::bail!("Unknown asset kind: {}", s),
        }
    }
}

/// A single worldbook lore entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoreEntry {
    /// Identity key, stable within one character's collection
    pub name: String,

    /// Trigger terms that activate this entry
    pub keys: Vec<String>,

    /// Body content injected when triggered
    pub content: String,

    /// Whether the entry is active
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Insertion ordering among activated entries
    #[serde(default)]
    pub order: i64,

    /// Always-active entries ignore trigger terms
    #[serde(default)]
    pub constant: bool,

    /// Optional placement hint (e.g. "before_char", "after_char")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<String>,
}

/// A single text-transformation script
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformScript {
    /// Identity key, stable within one character's collection
    pub name: String,

    /// Pattern to match
    pub find: String,

    /// Replacement text
    pub replace: String,

    /// Apply to user input
    #[serde(default)]
    pub affects_input: bool,

    /// Apply to model output
    #[serde(default)]
    pub affects_output: bool,

    /// Whether the script is active
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Execution ordering among scripts
    #[serde(default)]
    pub order: i64,
}

fn default_enabled() -> bool {
    true
}

/// A single importable unit, polymorphic over asset kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AssetEntry {
    Lore(LoreEntry),
    Script(TransformScript),
}

impl AssetEntry {
    /// The identity key used for dedup decisions
    pub fn identity_key(&self) -> &str {
        match self {
            AssetEntry::Lore(e) => &e.name,
            AssetEntry::Script(s) => &s.name,
        }
    }

    /// The asset kind of this entry
    pub fn kind(&self) -> AssetKind {
        match self {
            AssetEntry::Lore(_) => AssetKind::Worldbook,
            AssetEntry::Script(_) => AssetKind::RegexScript,
        }
    }

    /// Whether the entry is currently enabled
    pub fn is_enabled(&self) -> bool {
        match self {
            AssetEntry::Lore(e) => e.enabled,
            AssetEntry::Script(s) => s.enabled,
        }
    }
}
