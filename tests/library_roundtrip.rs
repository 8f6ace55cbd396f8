//! Global Library Integration Tests
//!
//! Promotion of imports into the library, reuse across characters, and
//! delete non-cascade behavior.

use std::sync::Arc;

use tempfile::TempDir;

use loreweave::core::{ImportOptions, ImportSource, Importer};
use loreweave::domain::{AssetEntry, AssetKind};
use loreweave::error::ImportError;
use loreweave::library::LibraryManager;
use loreweave::store::{CharacterStore, FileCharacterStore, FileLibraryStore};

struct Harness {
    _temp: TempDir,
    characters: Arc<FileCharacterStore>,
    library: Arc<LibraryManager>,
    importer: Importer,
}

impl Harness {
    fn new() -> Self {
        let temp = TempDir::new().unwrap();
        let characters = Arc::new(FileCharacterStore::new(temp.path()));
        let library = Arc::new(LibraryManager::new(
            Arc::new(FileLibraryStore::new(temp.path().join("library"))),
            characters.clone(),
        ));
        let importer = Importer::new(characters.clone(), library.clone());

        Self {
            _temp: temp,
            characters,
            library,
            importer,
        }
    }

    async fn collection(&self, character: &str) -> Vec<AssetEntry> {
        self.characters
            .load(character, AssetKind::Worldbook)
            .await
            .unwrap()
    }
}

fn worldbook_payload(names: &[&str]) -> String {
    let entries: Vec<String> = names
        .iter()
        .map(|n| {
            format!(
                r#"{{"name": "{}", "keys": ["{}"], "content": "About {}"}}"#,
                n,
                n.to_lowercase(),
                n
            )
        })
        .collect();
    format!("[{}]", entries.join(","))
}

fn promote_options(name: &str) -> ImportOptions {
    ImportOptions {
        promote_to_library: true,
        library_name: Some(name.to_string()),
        library_description: Some("test bundle".to_string()),
    }
}

#[tokio::test]
async fn test_promote_creates_item_with_provenance() {
    let harness = Harness::new();
    let sources = vec![ImportSource::new(
        "village.json",
        worldbook_payload(&["Gate", "Mill"]),
    )];

    let report = harness
        .importer
        .import_batch(
            "mira",
            AssetKind::Worldbook,
            &sources,
            &promote_options("Village lore"),
        )
        .await;
    assert!(report.success);

    let items = harness.library.list(None).await.unwrap();
    assert_eq!(items.len(), 1);

    let item = &items[0];
    assert_eq!(item.name, "Village lore");
    assert_eq!(item.kind, AssetKind::Worldbook);
    assert_eq!(item.item_count, 2);
    assert_eq!(item.source_character.as_deref(), Some("mira"));
    assert_eq!(item.description, "test bundle");
}

#[tokio::test]
async fn test_promotion_derives_name_from_source_label() {
    let harness = Harness::new();
    let sources = vec![ImportSource::new(
        "ancient_ruins.json",
        worldbook_payload(&["Gate"]),
    )];

    let options = ImportOptions {
        promote_to_library: true,
        ..Default::default()
    };
    harness
        .importer
        .import_batch("mira", AssetKind::Worldbook, &sources, &options)
        .await;

    let items = harness.library.list(None).await.unwrap();
    assert_eq!(items[0].name, "ancient_ruins");
}

#[tokio::test]
async fn test_multi_source_promotion_creates_one_item_per_source() {
    let harness = Harness::new();
    let sources = vec![
        ImportSource::new("a.json", worldbook_payload(&["Gate"])),
        ImportSource::new("b.json", worldbook_payload(&["Mill"])),
        ImportSource::new("broken.json", "not json".to_string()),
    ];

    harness
        .importer
        .import_batch(
            "mira",
            AssetKind::Worldbook,
            &sources,
            &promote_options("Pack"),
        )
        .await;

    // Only successful sources are promoted, each as its own item
    let items = harness.library.list(None).await.unwrap();
    let mut names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    names.sort_unstable();
    assert_eq!(names, vec!["Pack (a.json)", "Pack (b.json)"]);
}

#[tokio::test]
async fn test_round_trip_into_second_character() {
    let harness = Harness::new();
    let sources = vec![ImportSource::new(
        "village.json",
        worldbook_payload(&["Gate", "Mill"]),
    )];

    harness
        .importer
        .import_batch(
            "mira",
            AssetKind::Worldbook,
            &sources,
            &promote_options("Village lore"),
        )
        .await;

    let item_id = harness.library.list(None).await.unwrap()[0].id.clone();

    // Second character already knows about the Gate
    let pre = vec![ImportSource::new("own.json", worldbook_payload(&["Gate"]))];
    harness
        .importer
        .import_batch("tamsin", AssetKind::Worldbook, &pre, &Default::default())
        .await;

    let report = harness
        .library
        .import_into(&item_id, "tamsin")
        .await
        .unwrap();

    assert!(report.success);
    assert_eq!(report.imported_count, 1);
    assert_eq!(report.skipped_count, 1);
    assert!(report.successful_files.is_none());
    assert!(report.failed_files.is_none());

    // Same entries by identity key and content as the original import,
    // modulo dedup against tamsin's pre-existing collection
    let mira = harness.collection("mira").await;
    let tamsin = harness.collection("tamsin").await;
    assert_eq!(tamsin.len(), 2);

    let mill_mira = mira.iter().find(|e| e.identity_key() == "Mill").unwrap();
    let mill_tamsin = tamsin.iter().find(|e| e.identity_key() == "Mill").unwrap();
    assert_eq!(mill_mira, mill_tamsin);
}

#[tokio::test]
async fn test_delete_does_not_cascade_into_characters() {
    let harness = Harness::new();
    let sources = vec![ImportSource::new(
        "village.json",
        worldbook_payload(&["Gate", "Mill"]),
    )];

    harness
        .importer
        .import_batch(
            "mira",
            AssetKind::Worldbook,
            &sources,
            &promote_options("Village lore"),
        )
        .await;

    let item_id = harness.library.list(None).await.unwrap()[0].id.clone();
    harness.library.import_into(&item_id, "tamsin").await.unwrap();

    let before = harness.collection("tamsin").await;
    assert!(harness.library.delete(&item_id).await.unwrap());
    let after = harness.collection("tamsin").await;

    assert_eq!(before, after);

    // And the item is really gone
    let err = harness.library.get(&item_id).await.unwrap_err();
    assert!(matches!(err, ImportError::NotFound { .. }));
}

#[tokio::test]
async fn test_import_from_missing_item_is_not_found() {
    let harness = Harness::new();

    let err = harness
        .library
        .import_into("no-such-id", "mira")
        .await
        .unwrap_err();
    assert!(matches!(err, ImportError::NotFound { .. }));
}

#[tokio::test]
async fn test_list_is_most_recent_first() {
    let harness = Harness::new();

    for label in ["first.json", "second.json", "third.json"] {
        let sources = vec![ImportSource::new(label, worldbook_payload(&["Gate"]))];
        let options = ImportOptions {
            promote_to_library: true,
            ..Default::default()
        };
        harness
            .importer
            .import_batch("mira", AssetKind::Worldbook, &sources, &options)
            .await;
        // Distinct creation instants keep the ordering assertion meaningful
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }

    let items = harness.library.list(None).await.unwrap();
    let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(names, vec!["third", "second", "first"]);
}

#[tokio::test]
async fn test_promotion_failure_does_not_retract_merge() {
    let harness = Harness::new();
    let sources = vec![ImportSource::new("a.json", worldbook_payload(&["Gate"]))];

    // Blank name after trimming fails validation during promotion
    let options = ImportOptions {
        promote_to_library: true,
        library_name: Some("   ".to_string()),
        library_description: None,
    };

    let report = harness
        .importer
        .import_batch("mira", AssetKind::Worldbook, &sources, &options)
        .await;

    // Merge is committed, promotion failure lands in errors
    assert!(report.success);
    assert_eq!(report.imported_count, 1);
    assert!(report.errors.iter().any(|e| e.contains("promotion failed")));
    assert_eq!(harness.collection("mira").await.len(), 1);
    assert!(harness.library.list(None).await.unwrap().is_empty());
}
