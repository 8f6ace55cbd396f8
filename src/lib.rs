//! loreweave - Import/merge/library engine for character assets
//!
//! Attaches reusable structured content to roleplay characters: "worldbook"
//! lore entries and text-transformation ("regex") scripts. Untrusted JSON
//! payloads are validated into typed bundles, deduplicated against the
//! target character's existing collection, and optionally promoted into a
//! shared cross-character library.
//!
//! # Architecture
//!
//! - Validation and merge are pure; persistence happens only through the
//!   injected store seams
//! - Batch sources are processed strictly sequentially, each as one
//!   read-modify-write of the character's collection
//! - A failing source is isolated and reported; it never aborts the batch
//!
//! # Modules
//!
//! - `domain`: Data structures (entries, bundles, reports)
//! - `schema`: Payload validation
//! - `core`: Merge engine and batch orchestration
//! - `library`: Cross-character library of reusable bundles
//! - `store`: Persistence collaborator interfaces
//! - `cli`: Command-line interface
//!
//! # Usage
//!
//! ```bash
//! # Import worldbook payloads into a character
//! loreweave import mira --kind worldbook village.json ruins.json
//!
//! # Promote an import to the global library
//! loreweave import mira --kind worldbook village.json --promote --name "Village lore"
//!
//! # Reuse a library item on another character
//! loreweave apply <item-id> tamsin
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod error;
pub mod library;
pub mod schema;
pub mod store;

// Re-export main types at crate root for convenience
pub use crate::core::{ImportOptions, ImportSource, Importer, MergeOutcome};
pub use domain::{AssetBundle, AssetEntry, AssetKind, ImportReport, LoreEntry, TransformScript};
pub use error::ImportError;
pub use library::{LibraryItem, LibraryManager};
pub use store::{CharacterStore, FileCharacterStore, FileLibraryStore, LibraryStore};
