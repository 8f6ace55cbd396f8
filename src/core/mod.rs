//! Core import engine.
//!
//! This module contains:
//! - Merge: append-only dedup merge of a bundle into a collection
//! - Importer: batch orchestration with per-source failure isolation

pub mod importer;
pub mod merge;

// Re-export commonly used types
pub use importer::{ImportOptions, ImportSource, Importer};
pub use merge::{merge, MergeOutcome};
