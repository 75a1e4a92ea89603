//! Running scripts with a real interpreter
//!
//! Skipped when no `python3` is on the PATH.

use std::process::Command;

use predicates::prelude::*;

use super::{initialized_home, pyscript, write_file};

fn python_available() -> bool {
    Command::new("python3")
        .arg("--version")
        .output()
        .is_ok_and(|output| output.status.success())
}

#[test]
fn test_run_forwards_arguments_and_exit_code() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let home = initialized_home();
    write_file(
        &home.path().join("scripts"),
        "greet.py",
        "import sys\n\ndef main(name=\"world\", *rest):\n    print(f\"hello {name} {len(rest)}\")\n    return 3\n",
    );

    pyscript(home.path())
        .args(["run", "greet", "Ada", "--loud", "-x"])
        .assert()
        .code(3)
        .stdout(predicate::str::contains("hello Ada 2"));
}

#[test]
fn test_run_out_of_range_exit_code_becomes_failure() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let home = initialized_home();
    let scripts = home.path().join("scripts");
    write_file(&scripts, "wrap.py", "def main():\n    return 256\n");
    write_file(&scripts, "negative.py", "def main():\n    return -1\n");

    pyscript(home.path()).args(["run", "wrap"]).assert().code(1);
    pyscript(home.path()).args(["run", "negative"]).assert().code(1);
}

#[test]
fn test_run_main_returning_none_exits_zero() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let home = initialized_home();
    write_file(&home.path().join("scripts"), "quiet.py", "def main():\n    print('done')\n");

    pyscript(home.path())
        .args(["run", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::contains("done"));

    assert!(!home.path().join("scripts/__pycache__").exists());
}

#[test]
fn test_run_saves_inferred_metadata() {
    if !python_available() {
        eprintln!("python3 not found, skipping");
        return;
    }
    let home = initialized_home();
    write_file(
        &home.path().join("scripts"),
        "info.py",
        "import json\n\ndef main():\n    \"\"\"Print JSON.\"\"\"\n    print(json.dumps({'ok': True}))\n",
    );

    pyscript(home.path())
        .args(["run", "info"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"ok\": true"));

    assert!(home.path().join("metadata/info.json").exists());
    assert!(!home.path().join("venvs/info").exists());
}
