//! Tests for catalog downloads and updates

use pyscript::core::models::{ScriptKind, ScriptVersion};
use pyscript::core::services::{DownloadOutcome, Hub, UpdateCheck, is_not_found};
use pyscript::error::HubError;
use pyscript::storage::{MetadataStore, ScriptStore};

use crate::common::TestHome;
use crate::common::mocks::MockCatalog;

const TREE_META: &str = r#"{
    "name": "tree",
    "description": "Print a directory tree",
    "dependencies": [["rich", ""]],
    "category": "files",
    "version": 1.1
}"#;

const TREE_SOURCE: &str = "import rich\n\ndef main():\n    rich.print('tree')\n";

fn catalog() -> MockCatalog {
    MockCatalog::new()
        .with_script("tree", TREE_META, TREE_SOURCE)
        .with_script("ping", r#"{"description": "Ping hosts", "version": "2.0"}"#, "def main(): pass\n")
        .with_category("files", &["tree"])
        .with_category("network", &["ping"])
}

// =============================================================================
// DOWNLOAD
// =============================================================================

#[test]
fn test_download_saves_script_and_standard_metadata() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    let outcome = hub.download("tree").unwrap();

    assert_eq!(outcome, DownloadOutcome::Installed { replaced_metadata: false });
    assert_eq!(ScriptStore::new(&home.layout).read("tree").unwrap(), TREE_SOURCE);
    let meta = MetadataStore::new(&home.layout).get("tree").unwrap();
    assert_eq!(meta.kind, ScriptKind::Standard);
    assert_eq!(meta.category.as_deref(), Some("files"));
    assert_eq!(home.read_metadata("tree")["type"], "standard");
}

#[test]
fn test_download_fills_missing_name() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    hub.download("ping").unwrap();

    assert_eq!(home.read_metadata("ping")["name"], "ping");
}

#[test]
fn test_download_existing_standard_script() {
    let home = TestHome::new();
    home.script("tree", "def main(): pass\n");
    home.metadata("tree", r#"{"type": "standard", "version": 1.0}"#);
    let hub = Hub::new(&home.layout, catalog());

    assert_eq!(hub.download("tree").unwrap(), DownloadOutcome::AlreadyInstalled);
}

#[test]
fn test_download_over_custom_script_is_a_conflict() {
    let home = TestHome::new();
    home.script("tree", "def main(): print('mine')\n");
    let hub = Hub::new(&home.layout, catalog());

    assert_eq!(hub.download("tree").unwrap(), DownloadOutcome::CustomConflict);
    assert!(ScriptStore::new(&home.layout).read("tree").unwrap().contains("mine"));
}

#[test]
fn test_download_unknown_script() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    let err = hub.download("nope").unwrap_err();

    assert!(is_not_found(&err));
    assert!(!MetadataStore::new(&home.layout).exists("nope"));
}

#[test]
fn test_download_rolls_back_metadata_when_script_is_missing() {
    let home = TestHome::new();
    let catalog = MockCatalog::new().with_metadata_only("half", r#"{"version": 1}"#);
    let hub = Hub::new(&home.layout, catalog);

    let err = hub.download("half").unwrap_err();

    assert!(is_not_found(&err));
    assert!(!MetadataStore::new(&home.layout).exists("half"));
    assert!(!ScriptStore::new(&home.layout).exists("half"));
}

#[test]
fn test_download_replaces_orphan_metadata() {
    let home = TestHome::new();
    home.metadata("tree", r#"{"description": "stale"}"#);
    let hub = Hub::new(&home.layout, catalog());

    let outcome = hub.download("tree").unwrap();

    assert_eq!(outcome, DownloadOutcome::Installed { replaced_metadata: true });
    assert_eq!(home.read_metadata("tree")["description"], "Print a directory tree");
}

#[test]
fn test_download_rejects_path_like_names() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    assert!(matches!(hub.download("../escape"), Err(HubError::Store(_))));
}

// =============================================================================
// CATEGORIES
// =============================================================================

#[test]
fn test_category_scripts() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    assert_eq!(hub.category_scripts("network").unwrap(), ["ping"]);
    assert!(matches!(
        hub.category_scripts("games"),
        Err(HubError::CategoryNotFound(c)) if c == "games"
    ));
}

#[test]
fn test_remote_index_lists_every_category() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    let index = hub.remote_index().unwrap();
    assert_eq!(index.keys().collect::<Vec<_>>(), ["files", "network"]);
}

// =============================================================================
// UPDATES
// =============================================================================

#[test]
fn test_standard_scripts_skips_custom_ones() {
    let home = TestHome::new();
    home.script("tree", "def main(): pass\n");
    home.metadata("tree", r#"{"type": "standard", "version": "1.0"}"#);
    home.script("mine", "def main(): pass\n");
    home.metadata("mine", r#"{"type": "custom"}"#);
    home.script("old", "def main(): pass\n");
    home.metadata("old", r#"{"type": "standard", "version": "latest"}"#);
    let hub = Hub::new(&home.layout, catalog());

    let standard = hub.standard_scripts().unwrap();

    let names: Vec<_> = standard.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["old", "tree"]);
    assert_eq!(standard[0].version, None);
    assert_eq!(standard[1].version, Some(ScriptVersion::from("1.0")));
}

#[test]
fn test_check_update_same_release() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    let check = hub.check_update("tree", Some(&ScriptVersion::from("1.1.0"))).unwrap();
    assert_eq!(check, UpdateCheck::UpToDate);
}

#[test]
fn test_check_update_different_or_missing_version() {
    let home = TestHome::new();
    let hub = Hub::new(&home.layout, catalog());

    assert!(matches!(
        hub.check_update("tree", Some(&ScriptVersion::from("1.0"))).unwrap(),
        UpdateCheck::Outdated(_)
    ));
    assert!(matches!(hub.check_update("tree", None).unwrap(), UpdateCheck::Outdated(_)));
}

#[test]
fn test_check_update_invalid_remote_version() {
    let home = TestHome::new();
    let catalog = MockCatalog::new().with_script("bad", r#"{"version": "soon"}"#, "");
    let hub = Hub::new(&home.layout, catalog);

    assert!(matches!(
        hub.check_update("bad", None),
        Err(HubError::InvalidRemoteVersion(_))
    ));
}

#[test]
fn test_install_latest_replaces_script_and_metadata() {
    let home = TestHome::new();
    home.script("tree", "def main(): print('old')\n");
    home.metadata("tree", r#"{"type": "custom", "note": "kept locally"}"#);
    let hub = Hub::new(&home.layout, catalog());

    let remote = hub.remote_metadata("tree").unwrap();
    hub.install_latest("tree", remote).unwrap();

    assert_eq!(ScriptStore::new(&home.layout).read("tree").unwrap(), TREE_SOURCE);
    let meta = home.read_metadata("tree");
    assert_eq!(meta["type"], "standard");
    assert_eq!(meta["version"], 1.1);
    assert!(meta.get("note").is_none());
}
