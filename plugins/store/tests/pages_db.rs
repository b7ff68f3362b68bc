//! Command-line tests for `pages-db` against a temporary data directory

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use notes_pages::DATA_DIR_ENV;
use notes_pages_store::storage;
use predicates::prelude::*;
use serde_json::{Value, json};
use tempfile::TempDir;

fn pages_db(data_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("pages-db");
    cmd.env_remove(DATA_DIR_ENV)
        .env_remove("RUST_LOG")
        .arg("--data-dir")
        .arg(data_dir.path());
    cmd
}

fn document(data_dir: &TempDir) -> Value {
    let contents = std::fs::read_to_string(storage::document_path(data_dir.path())).unwrap();
    serde_json::from_str(&contents).unwrap()
}

#[test]
fn help_lists_subcommands() {
    cargo_bin_cmd!("pages-db")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Usage"))
        .stdout(predicate::str::contains("icon"));
}

#[test]
fn set_then_get_round_trips() {
    let dir = TempDir::new().unwrap();

    pages_db(&dir)
        .args(["set", "site.title", "My notes"])
        .assert()
        .success();
    pages_db(&dir)
        .args(["set", "site.published", "true"])
        .assert()
        .success();

    assert_eq!(
        document(&dir),
        json!({ "site": { "title": "My notes", "published": true } })
    );

    pages_db(&dir)
        .args(["get", "site.title"])
        .assert()
        .success()
        .stdout("\"My notes\"\n");
}

#[test]
fn empty_segments_in_paths_are_ignored() {
    let dir = TempDir::new().unwrap();

    pages_db(&dir)
        .args(["set", ".pagesFieldVars..default.", "{\"home\":{}}"])
        .assert()
        .success();

    assert_eq!(
        document(&dir),
        json!({ "pagesFieldVars": { "default": { "home": {} } } })
    );
}

#[test]
fn get_of_missing_value_prints_null() {
    let dir = TempDir::new().unwrap();

    pages_db(&dir)
        .args(["get", "site"])
        .assert()
        .success()
        .stdout("null\n");
}

#[test]
fn keys_with_and_without_path() {
    let dir = TempDir::new().unwrap();
    pages_db(&dir)
        .args(["set", "pagesFieldVars.paper", "{}"])
        .assert()
        .success();
    pages_db(&dir)
        .args(["set", "pagesFieldVars.dark", "{}"])
        .assert()
        .success();
    pages_db(&dir).args(["set", "site", "{}"]).assert().success();

    pages_db(&dir)
        .arg("keys")
        .assert()
        .success()
        .stdout("pagesFieldVars\nsite\n");
    pages_db(&dir)
        .args(["keys", "pagesFieldVars"])
        .assert()
        .success()
        .stdout("dark\npaper\n");
}

#[test]
fn icon_import_export_and_clear() {
    let dir = TempDir::new().unwrap();
    let icon = dir.path().join("in.ico");
    let exported = dir.path().join("out.ico");
    std::fs::write(&icon, b"\x00\x00\x01\x00").unwrap();

    pages_db(&dir).arg("icon").arg("import").arg(&icon).assert().success();
    pages_db(&dir)
        .arg("icon")
        .arg("export")
        .arg(&exported)
        .assert()
        .success();
    assert_eq!(std::fs::read(&exported).unwrap(), b"\x00\x00\x01\x00");

    pages_db(&dir).args(["icon", "clear"]).assert().success();
    assert!(!storage::icon_path(dir.path()).exists());
}

#[test]
fn icon_export_without_icon_fails() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("out.ico");

    pages_db(&dir)
        .arg("icon")
        .arg("export")
        .arg(&exported)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no icon stored"));
    assert!(!exported.exists());
}
