//! Cross-character library of reusable bundles.
//!
//! A library item is a named bundle stored independently of any character,
//! with provenance metadata (originating character, creation time, entry
//! count).
//!
//! # Storage Layout
//!
//! ```text
//! <library_dir>/
//! └── <item_id>/          # generated UUID
//!     ├── item.json       # name, description, kind, provenance
//!     └── bundle.json     # stored bundle content
//! ```

pub mod item;
pub mod manager;

pub use item::LibraryItem;
pub use manager::LibraryManager;
