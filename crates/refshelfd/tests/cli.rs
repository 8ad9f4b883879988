//! Integration tests for the refshelf CLI commands.
//!
//! Every test works in its own temporary directory, holding the library file, the (absent)
//! configuration file and the storage directory, so tests can run in parallel.

use std::{
  fs,
  path::{Path, PathBuf},
};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::{tempdir, TempDir};

// Helper function to create a command bound to the library in `dir`
fn refshelf(dir: &Path) -> Command {
  let mut cmd = Command::cargo_bin("refshelf").unwrap();
  cmd
    .arg("--path")
    .arg(dir.join("library.rodb"))
    .arg("--config")
    .arg(dir.join("config.toml"))
    .arg("--storage")
    .arg(dir.join("storage"))
    .arg("--accept-defaults");
  cmd
}

// Helper to get a temporary directory with an empty library in it
fn temp_library() -> (TempDir, PathBuf) {
  let dir = tempdir().unwrap();
  let path = dir.path().to_path_buf();
  refshelf(&path).args(["new", "Test shelf"]).assert().success();
  (dir, path)
}

fn add_lamport(dir: &Path) {
  refshelf(dir)
    .args(["add", "--authors", "Leslie Lamport", "--year", "1978"])
    .args(["--title", "Time, Clocks, and the Ordering of Events in a Distributed System"])
    .args(["--venue", "Journal", "--tags", "classic,distributed"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Added Lamport1978"))
    .stdout(predicate::str::contains("placeholder").not());
}

#[test]
fn test_new_creates_library() {
  let dir = tempdir().unwrap();

  refshelf(dir.path())
    .args(["new", "Reading list"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Created library \"Reading list\""));

  let contents = fs::read_to_string(dir.path().join("library.rodb")).unwrap();
  assert!(contents.contains("Reading list"));
}

#[test]
fn test_add_generates_unique_keys() {
  let (_dir, path) = temp_library();
  add_lamport(&path);

  refshelf(&path)
    .args(["add", "--authors", "Leslie Lamport", "--year", "1978", "--title", "Second paper"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Added Lamport1978a"));

  refshelf(&path)
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("2 of 2 papers"))
    .stdout(predicate::str::contains("Lamport1978a"));
}

#[test]
fn test_add_updates_existing() {
  let (_dir, path) = temp_library();
  add_lamport(&path);

  refshelf(&path)
    .args(["add", "--citation", "Lamport1978", "--review", "Logical clocks.", "--finished"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Updated Lamport1978"))
    .stdout(predicate::str::contains("Time, Clocks"));

  refshelf(&path)
    .arg("status")
    .assert()
    .success()
    .stdout(predicate::str::contains("Reviews marked complete"))
    .stdout(predicate::str::contains("ranking is Novice"));
}

#[test]
fn test_add_needs_authors() {
  let (_dir, path) = temp_library();

  refshelf(&path)
    .args(["add", "--title", "Untitled"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("at least one author"));
}

#[test]
fn test_add_rejects_unknown_venue() {
  let (_dir, path) = temp_library();

  refshelf(&path)
    .args(["add", "--authors", "Ada Lovelace", "--venue", "Blog"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("unknown venue"));
}

#[test]
fn test_add_ingests_document() {
  let (_dir, path) = temp_library();
  let document = path.join("download.pdf");
  fs::write(&document, b"%PDF-1.4").unwrap();

  refshelf(&path)
    .args(["add", "--authors", "Claude Shannon", "--year", "1948", "--ingest", "--paper"])
    .arg(&document)
    .assert()
    .success()
    .stdout(predicate::str::contains("Added Shannon1948"))
    .stdout(predicate::str::contains("Shannon1948 is a placeholder"));

  assert!(!document.exists());
  assert!(path.join("storage").join("Shannon1948.pdf").exists());

  refshelf(&path)
    .args(["search", "--paper-path"])
    .arg(path.join("storage").join("Shannon1948.pdf"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Shannon1948"));
}

#[test]
fn test_search() {
  let (_dir, path) = temp_library();
  add_lamport(&path);

  refshelf(&path)
    .args(["search", "--keywords", "clocks", "--title"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Found 1 papers"))
    .stdout(predicate::str::contains("Lamport1978"));

  refshelf(&path)
    .args(["search", "--authors", "Lamport", "--years", "2000", "2010"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No papers found"));

  refshelf(&path)
    .args(["search", "--years", "2010", "2000"])
    .assert()
    .failure()
    .stderr(predicate::str::contains("is empty"));
}

#[test]
fn test_list_by_tags() {
  let (_dir, path) = temp_library();
  add_lamport(&path);
  refshelf(&path)
    .args(["add", "--authors", "Geoffrey Hinton", "--year", "2006", "--tags", "ml"])
    .assert()
    .success();

  refshelf(&path)
    .args(["list", "--tags", "classic,ml"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No papers found"));

  refshelf(&path)
    .args(["list", "--tags", "classic,ml", "--any"])
    .assert()
    .success()
    .stdout(predicate::str::contains("2 of 2 papers"));

  refshelf(&path)
    .arg("tags")
    .assert()
    .success()
    .stdout(predicate::str::contains("classic, distributed, ml"));
}

#[test]
fn test_import_and_duplicates() {
  let (_dir, path) = temp_library();
  let review = path.join("Knuth74");
  fs::write(&review, "Structured Programming with go to Statements\nDonald Knuth\n\nStill fun.\n")
    .unwrap();

  refshelf(&path)
    .arg("import")
    .arg(&review)
    .arg(path.join("missing"))
    .assert()
    .success()
    .stdout(predicate::str::contains("Imported Knuth74"))
    .stdout(predicate::str::contains("Skipped"))
    .stdout(predicate::str::contains("Imported 1 of 2 reviews"));

  refshelf(&path)
    .arg("duplicates")
    .assert()
    .success()
    .stdout(predicate::str::contains("No duplicate citation keys"));

  refshelf(&path)
    .arg("import")
    .arg(&review)
    .assert()
    .success()
    .stdout(predicate::str::contains("Knuth74 is now a duplicate citation key"));

  refshelf(&path)
    .arg("duplicates")
    .assert()
    .success()
    .stdout(predicate::str::contains("1 duplicate citation keys"));
}

#[test]
fn test_remove() {
  let (_dir, path) = temp_library();
  add_lamport(&path);

  refshelf(&path)
    .args(["remove", "Nobody2000"])
    .assert()
    .success()
    .stdout(predicate::str::contains("No paper with citation Nobody2000"));

  refshelf(&path)
    .args(["remove", "Lamport1978"])
    .assert()
    .success()
    .stdout(predicate::str::contains("Removed Lamport1978"));

  refshelf(&path)
    .arg("list")
    .assert()
    .success()
    .stdout(predicate::str::contains("No papers found"));
}
