//! Append-only dedup merge of an incoming bundle into a collection.
//!
//! The merge never reorders or overwrites: pre-existing entries keep their
//! positions, newly imported entries are appended in incoming order, and a
//! colliding identity key is a silent skip reflected only in the counts.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::{AssetBundle, AssetEntry};

/// Outcome of one merge pass
#[derive(Debug, Clone)]
pub struct MergeOutcome {
    /// The collection after the merge (existing entries + appended imports)
    pub updated: Vec<AssetEntry>,

    /// Entries appended this pass
    pub imported: usize,

    /// Entries skipped as duplicates this pass
    pub skipped: usize,

    /// Per-entry errors (duplicates are not errors; this stays empty for
    /// well-formed bundles and exists for future per-entry checks)
    pub errors: Vec<String>,
}

/// Merge an incoming bundle into an existing collection.
///
/// A key already present in `existing`, or accepted earlier in this same
/// pass, classifies the entry as skipped. First occurrence of a duplicated
/// key within one bundle wins.
pub fn merge(existing: &[AssetEntry], incoming: &AssetBundle) -> MergeOutcome {
    let mut seen: HashSet<String> = existing
        .iter()
        .map(|e| e.identity_key().to_string())
        .collect();

    let mut updated = existing.to_vec();
    let mut imported = 0;
    let mut skipped = 0;

    for entry in &incoming.entries {
        let key = entry.identity_key();
        if seen.contains(key) {
            debug!(key, "Skipping duplicate entry");
            skipped += 1;
            continue;
        }

        seen.insert(key.to_string());
        updated.push(entry.clone());
        imported += 1;
    }

    MergeOutcome {
        updated,
        imported,
        skipped,
        errors: Vec::new(),
    }
}
