//! Batch import orchestration.
//!
//! Drives the schema validator and merge engine across one or more source
//! payloads. Sources are processed strictly sequentially, each as one
//! read-modify-write of the target character's collection, and a failure in
//! one source never aborts the batch: it is recorded in the report and
//! processing continues with the next source.

use std::path::Path;
use std::sync::Arc;

use tracing::{info, instrument, warn};

use crate::domain::{AssetBundle, AssetKind, ImportReport};
use crate::error::ImportError;
use crate::library::LibraryManager;
use crate::schema;
use crate::store::CharacterStore;

use super::merge::merge;

/// One unit of batch input: a labeled raw payload
#[derive(Debug, Clone)]
pub struct ImportSource {
    /// Label used in reports and error prefixes (usually a file name)
    pub label: String,

    /// Raw payload text
    pub payload: String,
}

impl ImportSource {
    /// Create a labeled source
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Batch options, all independent and default-off
#[derive(Debug, Clone, Default)]
pub struct ImportOptions {
    /// Promote each successful source to the global library
    pub promote_to_library: bool,

    /// Library item name (derived from the source label when absent)
    pub library_name: Option<String>,

    /// Library item description
    pub library_description: Option<String>,
}

/// Drives validate → merge → persist for each source of a batch
pub struct Importer {
    characters: Arc<dyn CharacterStore>,
    library: Arc<LibraryManager>,
}

impl Importer {
    /// Create an importer over the injected collaborators
    pub fn new(characters: Arc<dyn CharacterStore>, library: Arc<LibraryManager>) -> Self {
        Self {
            characters,
            library,
        }
    }

    /// Import a batch of sources into one character's collection.
    ///
    /// Always completes with a best-effort report; per-source errors are
    /// converted into report entries, never propagated.
    #[instrument(skip(self, sources, options), fields(character = %character_id, kind = %kind, sources = sources.len()))]
    pub async fn import_batch(
        &self,
        character_id: &str,
        kind: AssetKind,
        sources: &[ImportSource],
        options: &ImportOptions,
    ) -> ImportReport {
        let mut imported_count = 0;
        let mut skipped_count = 0;
        let mut errors = Vec::new();
        let mut successful_files = Vec::new();
        let mut failed_files = Vec::new();

        for source in sources {
            match self.process_source(character_id, kind, source).await {
                Ok((imported, skipped, merge_errors, bundle)) => {
                    imported_count += imported;
                    skipped_count += skipped;
                    errors.extend(
                        merge_errors
                            .into_iter()
                            .map(|e| format!("{}: {}", source.label, e)),
                    );
                    successful_files.push(source.label.clone());

                    if options.promote_to_library {
                        if let Err(e) = self
                            .promote(character_id, &source.label, bundle, sources.len(), options)
                            .await
                        {
                            warn!(source = %source.label, error = %e, "Promotion failed");
                            errors.push(format!("{}: promotion failed: {}", source.label, e));
                        }
                    }
                }
                Err(e) => {
                    warn!(source = %source.label, error = %e, "Source failed");
                    errors.push(format!("{}: {}", source.label, e));
                    failed_files.push(source.label.clone());
                }
            }
        }

        let success = !successful_files.is_empty();
        let message = format!(
            "Processed {} source(s): {} succeeded, {} failed; imported {}, skipped {}",
            sources.len(),
            successful_files.len(),
            failed_files.len(),
            imported_count,
            skipped_count
        );

        info!(
            imported = imported_count,
            skipped = skipped_count,
            failed = failed_files.len(),
            "Batch finished"
        );

        ImportReport {
            success,
            message,
            imported_count,
            skipped_count,
            errors,
            successful_files: Some(successful_files),
            failed_files: Some(failed_files),
        }
    }

    /// Process one source as a single read-modify-write step.
    ///
    /// Returns the merge counts plus the validated bundle for promotion.
    async fn process_source(
        &self,
        character_id: &str,
        kind: AssetKind,
        source: &ImportSource,
    ) -> Result<(usize, usize, Vec<String>, AssetBundle), ImportError> {
        let bundle = schema::validate(&source.payload, kind)?;

        let existing = self.characters.load(character_id, kind).await?;
        let outcome = merge(&existing, &bundle);
        self.characters
            .save(character_id, kind, &outcome.updated)
            .await?;

        info!(
            source = %source.label,
            imported = outcome.imported,
            skipped = outcome.skipped,
            "Source merged"
        );

        Ok((outcome.imported, outcome.skipped, outcome.errors, bundle))
    }

    /// Promote one successful source's bundle to the global library.
    ///
    /// One library item per successful source; a batch-supplied name gets the
    /// source label appended when the batch has several sources, so promoted
    /// items stay distinguishable.
    async fn promote(
        &self,
        character_id: &str,
        label: &str,
        bundle: AssetBundle,
        source_count: usize,
        options: &ImportOptions,
    ) -> Result<(), ImportError> {
        let name = match (&options.library_name, source_count) {
            (Some(name), 1) => name.clone(),
            (Some(name), _) => format!("{} ({})", name, label),
            (None, _) => derive_name(label),
        };

        self.library
            .create(
                &bundle,
                &name,
                options.library_description.as_deref(),
                Some(character_id),
            )
            .await?;

        Ok(())
    }
}

/// Derive a library item name from a source label (file stem when possible)
fn derive_name(label: &str) -> String {
    Path::new(label)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(label)
        .to_string()
}
