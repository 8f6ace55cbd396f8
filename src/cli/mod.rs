//! Command-line interface for loreweave.
//!
//! Provides commands for importing asset payloads into a character,
//! inspecting a character's collections, and managing the global library.

use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::config::{load_config, ResolvedConfig};
use crate::core::{ImportOptions, ImportSource, Importer};
use crate::domain::{AssetKind, ImportReport};
use crate::library::LibraryManager;
use crate::store::{CharacterStore, FileCharacterStore, FileLibraryStore};

/// loreweave - Import/merge/library engine for character worldbooks and regex scripts
#[derive(Parser, Debug)]
#[command(name = "loreweave")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Import one or more payload files into a character
    Import {
        /// Target character id
        character: String,

        /// Asset kind of the payloads
        #[arg(short, long, value_enum)]
        kind: KindArg,

        /// Payload files (reads one payload from stdin if none given)
        files: Vec<PathBuf>,

        /// Promote each successful source to the global library
        #[arg(long)]
        promote: bool,

        /// Library item name when promoting (derived from file name if absent)
        #[arg(long)]
        name: Option<String>,

        /// Library item description when promoting
        #[arg(long)]
        description: Option<String>,
    },

    /// List a character's entries of one kind
    List {
        /// Character id
        character: String,

        /// Asset kind
        #[arg(short, long, value_enum)]
        kind: KindArg,
    },

    /// List items in the global library
    Library {
        /// Filter by asset kind
        #[arg(short, long, value_enum)]
        kind: Option<KindArg>,

        /// Maximum number of items to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show details of a library item
    Show {
        /// Library item id (prefix match)
        item_id: String,

        /// Show stored entries as well
        #[arg(short, long)]
        full: bool,
    },

    /// Import a library item into a character
    Apply {
        /// Library item id (prefix match)
        item_id: String,

        /// Target character id
        character: String,
    },

    /// Delete a library item
    Delete {
        /// Library item id (prefix match)
        item_id: String,
    },

    /// Show resolved configuration (debug)
    Config,
}

/// Asset kind for CLI (maps to AssetKind)
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    /// Worldbook lore entries
    Worldbook,

    /// Text-transformation scripts
    Regex,
}

impl From<KindArg> for AssetKind {
    fn from(k: KindArg) -> Self {
        match k {
            KindArg::Worldbook => AssetKind::Worldbook,
            KindArg::Regex => AssetKind::RegexScript,
        }
    }
}

/// Engine collaborators constructed once per invocation
struct Engine {
    characters: Arc<dyn CharacterStore>,
    library: Arc<LibraryManager>,
    importer: Importer,
}

impl Engine {
    fn new(config: &ResolvedConfig) -> Self {
        let characters: Arc<dyn CharacterStore> = Arc::new(FileCharacterStore::new(&config.home));
        let library = Arc::new(LibraryManager::new(
            Arc::new(FileLibraryStore::new(&config.library)),
            characters.clone(),
        ));
        let importer = Importer::new(characters.clone(), library.clone());

        Self {
            characters,
            library,
            importer,
        }
    }
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(self) -> Result<()> {
        let config = load_config()?;
        let engine = Engine::new(&config);

        match self.command {
            Commands::Import {
                character,
                kind,
                files,
                promote,
                name,
                description,
            } => {
                import_files(
                    &engine,
                    &character,
                    kind.into(),
                    files,
                    promote,
                    name,
                    description,
                )
                .await
            }
            Commands::List { character, kind } => {
                list_entries(&engine, &character, kind.into()).await
            }
            Commands::Library { kind, limit } => {
                list_library(&engine, kind.map(Into::into), limit).await
            }
            Commands::Show { item_id, full } => show_item(&engine, &item_id, full).await,
            Commands::Apply { item_id, character } => {
                apply_item(&engine, &item_id, &character).await
            }
            Commands::Delete { item_id } => delete_item(&engine, &item_id).await,
            Commands::Config => show_config(&config),
        }
    }
}

/// Read payload sources from files, or one payload from stdin
fn gather_sources(files: Vec<PathBuf>) -> Result<Vec<ImportSource>> {
    if files.is_empty() {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;

        if buffer.trim().is_empty() {
            anyhow::bail!("No input provided. Pass payload files or pipe to stdin");
        }

        return Ok(vec![ImportSource::new("stdin", buffer)]);
    }

    let mut sources = Vec::with_capacity(files.len());
    for path in files {
        let label = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("unnamed")
            .to_string();

        let payload = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read payload file: {}", path.display()))?;
        sources.push(ImportSource::new(label, payload));
    }

    Ok(sources)
}

/// Import payload files into a character
async fn import_files(
    engine: &Engine,
    character: &str,
    kind: AssetKind,
    files: Vec<PathBuf>,
    promote: bool,
    name: Option<String>,
    description: Option<String>,
) -> Result<()> {
    let sources = gather_sources(files)?;

    let options = ImportOptions {
        promote_to_library: promote,
        library_name: name,
        library_description: description,
    };

    let report = engine
        .importer
        .import_batch(character, kind, &sources, &options)
        .await;

    print_report(&report);

    if !report.success {
        std::process::exit(1);
    }

    Ok(())
}

/// Print an import report in a terminal-friendly form
fn print_report(report: &ImportReport) {
    println!("{}", report.message);

    if let Some(successful) = &report.successful_files {
        for label in successful {
            println!("  ok      {}", label);
        }
    }
    if let Some(failed) = &report.failed_files {
        for label in failed {
            println!("  failed  {}", label);
        }
    }

    if !report.errors.is_empty() {
        eprintln!("\nErrors:");
        for error in &report.errors {
            eprintln!("  {}", error);
        }
    }
}

/// List a character's entries of one kind
async fn list_entries(engine: &Engine, character: &str, kind: AssetKind) -> Result<()> {
    let entries = engine.characters.load(character, kind).await?;

    if entries.is_empty() {
        println!("No {} entries for character '{}'", kind, character);
        return Ok(());
    }

    println!("{:<30} {:<8} {:<10}", "NAME", "ENABLED", "KIND");
    println!("{}", "-".repeat(50));

    for entry in &entries {
        println!(
            "{:<30} {:<8} {:<10}",
            truncate(entry.identity_key(), 28),
            entry.is_enabled(),
            entry.kind().to_string()
        );
    }

    println!("\nTotal: {} entries", entries.len());
    Ok(())
}

/// List items in the global library
async fn list_library(engine: &Engine, kind: Option<AssetKind>, limit: usize) -> Result<()> {
    let items = engine.library.list(kind).await?;

    if items.is_empty() {
        println!("Library is empty. Use 'loreweave import --promote' to add items.");
        return Ok(());
    }

    println!(
        "{:<38} {:<10} {:<6} {:<30}",
        "ID", "KIND", "COUNT", "NAME"
    );
    println!("{}", "-".repeat(86));

    for item in items.iter().take(limit) {
        println!(
            "{:<38} {:<10} {:<6} {:<30}",
            item.id,
            item.kind.to_string(),
            item.item_count,
            truncate(&item.name, 28)
        );
    }

    println!("\nTotal: {} items", items.len());
    Ok(())
}

/// Resolve an item id by prefix match against the library listing
async fn resolve_item_id(engine: &Engine, prefix: &str) -> Result<String> {
    let items = engine.library.list(None).await?;

    let matches: Vec<_> = items.iter().filter(|i| i.id.starts_with(prefix)).collect();

    match matches.as_slice() {
        [item] => Ok(item.id.clone()),
        [] => anyhow::bail!("No library item matches id '{}'", prefix),
        _ => anyhow::bail!("Id '{}' is ambiguous ({} matches)", prefix, matches.len()),
    }
}

/// Show details of a library item
async fn show_item(engine: &Engine, item_id: &str, full: bool) -> Result<()> {
    let id = resolve_item_id(engine, item_id).await?;
    let item = engine.library.get(&id).await?;

    println!("Id:          {}", item.id);
    println!("Name:        {}", item.name);
    if !item.description.is_empty() {
        println!("Description: {}", item.description);
    }
    println!("Kind:        {}", item.kind);
    println!("Entries:     {}", item.item_count);
    if let Some(source) = &item.source_character {
        println!("From:        {}", source);
    }
    println!("Created:     {}", item.created_at);

    if full {
        let bundle = engine.library.bundle(&item.id).await?;
        println!("\n{:<30} {:<8}", "ENTRY", "ENABLED");
        println!("{}", "-".repeat(40));
        for entry in &bundle.entries {
            println!(
                "{:<30} {:<8}",
                truncate(entry.identity_key(), 28),
                entry.is_enabled()
            );
        }
    }

    Ok(())
}

/// Import a library item into a character
async fn apply_item(engine: &Engine, item_id: &str, character: &str) -> Result<()> {
    let id = resolve_item_id(engine, item_id).await?;
    let report = engine.library.import_into(&id, character).await?;

    print_report(&report);
    Ok(())
}

/// Delete a library item
async fn delete_item(engine: &Engine, item_id: &str) -> Result<()> {
    let id = resolve_item_id(engine, item_id).await?;
    engine.library.delete(&id).await?;

    println!("Deleted library item {}", id);
    Ok(())
}

/// Show the resolved configuration (for debugging)
fn show_config(config: &ResolvedConfig) -> Result<()> {
    println!("loreweave configuration");
    println!();
    println!(
        "Config file: {}",
        config
            .config_file
            .as_ref()
            .map(|p| p.display().to_string())
            .unwrap_or_else(|| "(none - using defaults)".to_string())
    );
    println!();
    println!("Paths:");
    println!("  Home (character data): {}", config.home.display());
    println!("  Library:               {}", config.library.display());

    Ok(())
}

/// Truncate a display string to at most `max` bytes on a char boundary
fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        return s.to_string();
    }

    let cut = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= max)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);

    format!("{}...", &s[..cut])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_string_unchanged() {
        assert_eq!(truncate("Village lore", 28), "Village lore");
    }

    #[test]
    fn test_truncate_long_ascii() {
        let name = "a".repeat(40);
        let out = truncate(&name, 28);
        assert_eq!(out, format!("{}...", "a".repeat(28)));
    }

    #[test]
    fn test_truncate_multibyte_respects_char_boundary() {
        // 3 bytes per char; byte 28 falls mid-character
        let name = "古き水車小屋の伝承記録その一";
        let out = truncate(name, 28);
        assert_eq!(out, "古き水車小屋の伝承...");
    }

    #[test]
    fn test_truncate_tiny_max() {
        assert_eq!(truncate("古い", 2), "...");
    }
}
