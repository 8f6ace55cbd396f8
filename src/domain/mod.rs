//! Domain types for the loreweave engine.
//!
//! This module contains the core data structures:
//! - Entries: the two importable asset kinds (lore entries, transform scripts)
//! - Bundle: an ordered collection of entries parsed from one payload
//! - Report: the transient result shape returned by import operations

pub mod bundle;
pub mod entry;
pub mod report;

// Re-export commonly used types
pub use bundle::AssetBundle;
pub use entry::{AssetEntry, AssetKind, LoreEntry, TransformScript};
pub use report::ImportReport;
