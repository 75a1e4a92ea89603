//! Hub commands against a local catalog server

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::thread;

use predicates::prelude::*;
use tiny_http::{Response, Server};

use super::{initialized_home, pyscript, read_json, write_file};

const TREE_SOURCE: &str = "import rich\n\ndef main(path=\".\"):\n    \"\"\"Print a directory tree.\"\"\"\n    rich.print(path)\n";

/// Serve `files` (path relative to the catalog root) until the test exits
fn serve_catalog(files: &[(&str, &str)]) -> String {
    let server = Server::http("127.0.0.1:0").unwrap();
    let port = server.server_addr().to_ip().unwrap().port();
    let files: HashMap<String, String> = files
        .iter()
        .map(|(path, body)| (format!("/hub/{path}"), (*body).to_string()))
        .collect();

    thread::spawn(move || {
        for request in server.incoming_requests() {
            let response = match files.get(request.url()) {
                Some(body) => Response::from_string(body.clone()),
                None => Response::from_string("404: Not Found").with_status_code(404),
            };
            let _ = request.respond(response);
        }
    });

    format!("http://127.0.0.1:{port}/hub/")
}

fn standard_catalog() -> String {
    serve_catalog(&[
        ("categories.json", r#"{"files": ["tree"], "network": ["ping"]}"#),
        (
            "metadata/tree.json",
            r#"{"name": "tree", "description": "Print a directory tree.", "dependencies": [["rich", ""]], "category": "files", "version": 1.1}"#,
        ),
        ("scripts/tree.py", TREE_SOURCE),
        (
            "metadata/ping.json",
            r#"{"name": "ping", "description": "Ping hosts.", "category": "network", "version": "2.0"}"#,
        ),
        ("scripts/ping.py", "def main(*hosts):\n    pass\n"),
    ])
}

fn hub_cmd(home: &Path, catalog: &str) -> assert_cmd::Command {
    let mut cmd = pyscript(home);
    cmd.env("PYSCRIPT_CATALOG_URL", catalog);
    cmd
}

// =============================================================================
// DOWNLOAD
// =============================================================================

#[test]
fn test_download_script() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["download", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tree installed successfully."));

    let source = fs::read_to_string(home.path().join("scripts/tree.py")).unwrap();
    assert_eq!(source, TREE_SOURCE);
    let metadata = read_json(&home.path().join("metadata/tree.json"));
    assert_eq!(metadata["type"], "standard");
    assert_eq!(metadata["category"], "files");
}

#[test]
fn test_download_twice_warns() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog).args(["download", "tree"]).assert().success();
    hub_cmd(home.path(), &catalog)
        .args(["download", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tree already installed"));
}

#[test]
fn test_download_unknown_script_fails_but_continues() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["download", "nope", "ping"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope not found on the hub"))
        .stdout(predicate::str::contains("ping installed successfully."));

    assert!(home.path().join("scripts/ping.py").exists());
    assert!(!home.path().join("metadata/nope.json").exists());
}

#[test]
fn test_download_over_custom_script() {
    let home = initialized_home();
    write_file(&home.path().join("scripts"), "tree.py", "def main():\n    print('mine')\n");
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["download", "tree"])
        .assert()
        .success()
        .stdout(predicate::str::contains("already exists as a custom script"));

    let source = fs::read_to_string(home.path().join("scripts/tree.py")).unwrap();
    assert!(source.contains("mine"));
}

#[test]
fn test_download_category() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["download", "--category", "files", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("The following scripts were found in files:"));

    assert!(home.path().join("scripts/tree.py").exists());
    assert!(!home.path().join("scripts/ping.py").exists());
}

#[test]
fn test_download_category_declined() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["download", "-c", "files"])
        .write_stdin("no\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("Operation cancelled."));

    assert!(!home.path().join("scripts/tree.py").exists());
}

#[test]
fn test_download_unknown_category() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["download", "-c", "games", "-y"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("category games not found"));
}

#[test]
fn test_download_requires_arguments() {
    let home = initialized_home();

    pyscript(home.path())
        .arg("download")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no argument provided"));

    pyscript(home.path())
        .args(["download", "tree", "-c", "files"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid arguments"));
}

#[test]
fn test_unreachable_catalog() {
    let home = initialized_home();

    hub_cmd(home.path(), "http://127.0.0.1:9")
        .args(["download", "tree"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unable to download tree"));
}

// =============================================================================
// LIST --REMOTE
// =============================================================================

#[test]
fn test_list_remote() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["list", "--remote"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Files"))
        .stdout(predicate::str::contains("tree"))
        .stdout(predicate::str::contains("ping"));
}

#[test]
fn test_list_remote_json() {
    let home = initialized_home();
    let catalog = standard_catalog();

    let output = hub_cmd(home.path(), &catalog)
        .args(["list", "--remote", "--json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["categories"]["network"][0], "ping");
}

// =============================================================================
// UPDATE FROM THE HUB
// =============================================================================

#[test]
fn test_update_all_replaces_outdated_scripts() {
    let home = initialized_home();
    write_file(&home.path().join("scripts"), "tree.py", "def main():\n    print('old')\n");
    write_file(
        &home.path().join("metadata"),
        "tree.json",
        r#"{"name": "tree", "type": "standard", "version": "1.0"}"#,
    );
    write_file(&home.path().join("scripts"), "ping.py", "def main(*hosts):\n    pass\n");
    write_file(
        &home.path().join("metadata"),
        "ping.json",
        r#"{"name": "ping", "type": "standard", "version": 2}"#,
    );
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["update", "--all"])
        .assert()
        .success()
        .stdout(predicate::str::contains("tree is now up-to-date."))
        .stdout(predicate::str::contains("ping is up-to-date."))
        .stdout(predicate::str::contains("All scripts are up-to-date."));

    let source = fs::read_to_string(home.path().join("scripts/tree.py")).unwrap();
    assert_eq!(source, TREE_SOURCE);
    assert_eq!(read_json(&home.path().join("metadata/tree.json"))["version"], 1.1);
}

#[test]
fn test_update_custom_script_asks_first() {
    let home = initialized_home();
    write_file(&home.path().join("scripts"), "tree.py", "def main():\n    print('mine')\n");
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["update", "tree"])
        .write_stdin("n\n")
        .assert()
        .failure()
        .stdout(predicate::str::contains("local tree is not a standard script"))
        .stdout(predicate::str::contains("Operation cancelled."));

    hub_cmd(home.path(), &catalog).args(["update", "tree", "-y"]).assert().success();
    let metadata = read_json(&home.path().join("metadata/tree.json"));
    assert_eq!(metadata["type"], "standard");
}

#[test]
fn test_update_script_missing_from_hub() {
    let home = initialized_home();
    let catalog = standard_catalog();

    hub_cmd(home.path(), &catalog)
        .args(["update", "sysinfo"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("script 'sysinfo' not found on the hub"));
}
