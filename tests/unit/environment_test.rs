//! Tests for per-script environment management

use pyscript::core::models::Dependency;
use pyscript::core::ports::PackageInstaller;
use pyscript::core::services::EnvManager;
use pyscript::error::EnvError;
use pyscript::paths::env_python;

use crate::common::TestHome;
use crate::common::mocks::MockInstaller;

fn deps(specs: &[&str]) -> Vec<Dependency> {
    Dependency::parse_list(specs)
}

// =============================================================================
// PREPARE
// =============================================================================

#[test]
fn test_no_dependencies_means_no_environment() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());

    let prepared = envs.prepare("hello", &[]).unwrap();

    assert_eq!(prepared.env_dir, None);
    assert!(!envs.exists("hello"));
    assert!(envs.installer().calls().is_empty());
}

#[test]
fn test_first_prepare_creates_and_installs() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());

    let prepared = envs.prepare("fetch", &deps(&["requests==2.31.0", "rich"])).unwrap();

    assert_eq!(prepared.env_dir, Some(home.layout.env_dir("fetch")));
    assert!(prepared.created);
    assert_eq!(prepared.installed.len(), 2);
    assert_eq!(
        envs.installer().calls(),
        ["create", "install requests==2.31.0", "install rich"]
    );
}

#[test]
fn test_second_prepare_is_a_no_op() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    let wanted = deps(&["rich"]);

    envs.prepare("fetch", &wanted).unwrap();
    let again = envs.prepare("fetch", &wanted).unwrap();

    assert!(!again.created);
    assert!(again.installed.is_empty());
    assert!(again.updated.is_empty());
}

#[test]
fn test_pinned_version_mismatch_is_updated() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    envs.prepare("fetch", &deps(&["requests==2.30.0"])).unwrap();

    let prepared = envs.prepare("fetch", &deps(&["requests==2.31.0"])).unwrap();

    assert_eq!(prepared.updated, deps(&["requests==2.31.0"]));
    assert_eq!(
        envs.installer().installed_version(&home.layout.env_dir("fetch"), "requests"),
        Some("2.31.0".to_string())
    );
}

#[test]
fn test_unpinned_installed_package_is_left_alone() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    envs.prepare("fetch", &deps(&["rich==12.0"])).unwrap();

    let prepared = envs.prepare("fetch", &deps(&["rich"])).unwrap();

    assert!(prepared.installed.is_empty());
    assert!(prepared.updated.is_empty());
}

#[test]
fn test_damaged_environment_is_recreated() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    let wanted = deps(&["rich"]);
    envs.prepare("fetch", &wanted).unwrap();
    envs.installer().break_env(&home.layout.env_dir("fetch"));

    let prepared = envs.prepare("fetch", &wanted).unwrap();

    assert!(prepared.created);
    assert_eq!(prepared.installed, wanted);
}

#[test]
fn test_install_failure_is_reported() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new().failing_on("nosuchpkg"));

    let err = envs.prepare("broken", &deps(&["nosuchpkg"])).unwrap_err();

    match err {
        EnvError::InstallFailed { package, stderr } => {
            assert_eq!(package, "nosuchpkg");
            assert!(stderr.contains("No matching distribution"));
        },
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_recreate_starts_from_scratch() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    let wanted = deps(&["rich"]);
    envs.prepare("fetch", &wanted).unwrap();

    let prepared = envs.recreate("fetch", &wanted).unwrap();

    assert!(prepared.created);
    assert_eq!(envs.installer().calls().iter().filter(|c| *c == "create").count(), 2);
}

// =============================================================================
// DELETE
// =============================================================================

#[test]
fn test_delete_missing_environment() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());

    assert!(matches!(envs.delete("ghost"), Err(EnvError::NotFound(_))));
}

#[test]
fn test_delete_removes_directory() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    envs.prepare("fetch", &deps(&["rich"])).unwrap();

    envs.delete("fetch").unwrap();

    assert!(!home.layout.env_dir("fetch").exists());
}

#[test]
fn test_delete_dependencies_skips_missing_packages() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    envs.prepare("fetch", &deps(&["rich", "requests"])).unwrap();

    let outcome = envs
        .delete_dependencies("fetch", &["rich".to_string(), "numpy".to_string()])
        .unwrap();

    assert_eq!(outcome.removed, ["rich"]);
    assert_eq!(outcome.missing, ["numpy"]);
    assert_eq!(
        envs.installer().installed_version(&home.layout.env_dir("fetch"), "requests"),
        Some("1.0".to_string())
    );
}

#[test]
fn test_delete_dependencies_without_environment() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());

    let err = envs.delete_dependencies("fetch", &["rich".to_string()]).unwrap_err();
    assert!(matches!(err, EnvError::NotFound(_)));
}

#[test]
fn test_env_names_are_sorted() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    envs.prepare("zeta", &deps(&["rich"])).unwrap();
    envs.prepare("alpha", &deps(&["rich"])).unwrap();

    assert_eq!(envs.names().unwrap(), ["alpha", "zeta"]);
}

#[test]
fn test_python_is_reported_only_when_present() {
    let home = TestHome::new();
    let envs = EnvManager::new(&home.layout, MockInstaller::new());
    assert_eq!(envs.python("fetch"), None);

    envs.prepare("fetch", &deps(&["rich"])).unwrap();
    assert_eq!(envs.python("fetch"), Some(env_python(&home.layout.env_dir("fetch"))));

    let bare = EnvManager::new(&home.layout, MockInstaller::new().without_interpreter());
    bare.prepare("bare", &deps(&["rich"])).unwrap_or_default();
    assert_eq!(bare.python("bare"), None);
}
