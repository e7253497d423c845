#![allow(clippy::unwrap_used, reason = "test code")]

use assert_cmd::Command;
use cardbox_core::{NewCard, NewCategory};
use cardbox_storage::Storage;
use predicates::prelude::*;
use tempfile::TempDir;

fn cardbox(db_dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("cardbox").unwrap();
    cmd.env("CARDBOX_DB_PATH", db_dir.path().join("cli.db"))
        .env_remove("CARDBOX_DATABASE_URL")
        .env("RUST_LOG", "warn");
    cmd
}

fn seed(db_dir: &TempDir) {
    let storage = Storage::new(&db_dir.path().join("cli.db")).unwrap();
    storage
        .create_category(&NewCategory {
            name: "Technology".to_owned(),
            description: Some("gadgets".to_owned()),
        })
        .unwrap();
    storage
        .create_card(&NewCard {
            title: "Rust book".to_owned(),
            description: String::new(),
            category_names: vec!["Reading".to_owned()],
        })
        .unwrap();
}

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("cardbox").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Cards filed under categories"));
}

#[test]
fn test_cli_serve_help() {
    let mut cmd = Command::cargo_bin("cardbox").unwrap();
    cmd.arg("serve").arg("--help").assert().success().stdout(predicate::str::contains("port"));
}

#[test]
fn test_cli_cards_on_empty_db() {
    let dir = TempDir::new().unwrap();
    cardbox(&dir).arg("cards").assert().success().stdout(predicate::str::starts_with("[]"));
}

#[test]
fn test_cli_lists_seeded_data() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    cardbox(&dir)
        .arg("categories")
        .assert()
        .success()
        .stdout(predicate::eq("Technology\nReading\n"));

    cardbox(&dir)
        .arg("cards")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"title\": \"Rust book\""))
        .stdout(predicate::str::contains("\"Reading\""));
}

#[test]
fn test_cli_cards_filtered_by_category() {
    let dir = TempDir::new().unwrap();
    seed(&dir);

    // Technology is id 1 and has no cards.
    cardbox(&dir)
        .args(["cards", "--category", "1"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[]"));
    cardbox(&dir)
        .args(["cards", "--category", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Rust book"));
}

#[test]
fn test_cli_suggest() {
    let dir = TempDir::new().unwrap();
    seed(&dir);
    cardbox(&dir).args(["suggest", "TECH"]).assert().success().stdout(predicate::eq("Technology\n"));
}

#[test]
fn test_cli_rejects_bad_category_id() {
    let dir = TempDir::new().unwrap();
    cardbox(&dir)
        .args(["cards", "--category", "abc"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid category id"));
}
