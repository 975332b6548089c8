//! Command-line behaviour of the `lexicon-overlap` binary.

use std::io::Write;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, content).expect("Failed to write fixture");
    path
}

fn fixtures() -> (TempDir, PathBuf, PathBuf, PathBuf) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let pila = write_file(
        &dir,
        "pila.tsv",
        "id\tform\nP1\taqua\nP2\trosā\nP3\tignis\n",
    );
    let other = write_file(&dir, "ielex.tsv", "id\tform\nO1\trosam\nO2\taqua\n");
    let table = write_file(
        &dir,
        "declensions.tsv",
        "headword\tform\ttag\nrosa\trosam\t--s----a-\nlupus\tum\t--s----a-\n",
    );
    (dir, pila, other, table)
}

fn lexicon_overlap() -> Command {
    Command::cargo_bin("lexicon-overlap").expect("binary should be built")
}

#[test]
fn test_compare_text_output() {
    let (_dir, pila, other, table) = fixtures();

    lexicon_overlap()
        .arg("compare")
        .arg(&pila)
        .arg(&other)
        .arg("--decliner")
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Compatibility Results for PILA and ielex:",
        ))
        .stdout(predicate::str::contains("* Direct Overlap: 1"))
        .stdout(predicate::str::contains("* Indirect Overlap: 1"))
        .stdout(predicate::str::contains("* Total Overlap: 2"))
        .stdout(predicate::str::contains("* Other Total Overlap Percentage: 1.0\n"))
        .stdout(predicate::str::contains("* Pila Total Overlap Percentage: 0.6667\n"));
}

#[test]
fn test_compare_without_declension() {
    let (_dir, pila, other, table) = fixtures();

    lexicon_overlap()
        .args(["compare", "--no-decline", "--dataset", "IELex"])
        .arg(&pila)
        .arg(&other)
        .arg("--decliner")
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::contains("PILA and IELex:"))
        .stdout(predicate::str::contains("* Indirect Overlap: 0"));
}

#[test]
fn test_compare_verbose_reports_sources_and_enrichment() {
    let (_dir, pila, other, _table) = fixtures();

    // Without a table nothing is declined; only macron-free spellings are added
    lexicon_overlap()
        .args(["-v", "compare"])
        .arg(&pila)
        .arg(&other)
        .assert()
        .success()
        .stderr(predicate::str::contains(format!(
            "PILA: 3 items from {}",
            pila.display()
        )))
        .stderr(predicate::str::contains(format!(
            "Other: 2 items from {}",
            other.display()
        )))
        .stderr(predicate::str::contains("Enrichment: 0 PILA items declined, 0 skipped"));
}

#[test]
fn test_compare_rejects_multiple_variants() {
    let (dir, _pila, other, _table) = fixtures();
    let pila = write_file(&dir, "variants.tsv", "P1\tignis|ignem\nP2\taqua\n");

    lexicon_overlap()
        .arg("compare")
        .arg(&pila)
        .arg(&other)
        .assert()
        .failure()
        .stderr(predicate::str::contains("one form per item is required"));
}

#[test]
fn test_compare_json_with_matches() {
    let (_dir, pila, other, table) = fixtures();

    let output = lexicon_overlap()
        .args(["--format", "json", "compare", "--show-matches"])
        .arg(&pila)
        .arg(&other)
        .arg("--decliner")
        .arg(&table)
        .output()
        .expect("Failed to run binary");
    assert!(output.status.success());

    let json: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("stdout should be JSON");
    assert_eq!(json["dataset"], "ielex");
    assert_eq!(json["results"]["direct_overlap"], 1);
    assert_eq!(json["results"]["indirect_overlap"], 1);
    assert_eq!(json["results"]["pila_size"], 3);

    let matches = json["matches"].as_array().expect("matches array");
    assert_eq!(matches.len(), 2);
    assert!(matches
        .iter()
        .any(|m| m["kind"] == "direct" && m["pila_id"] == "P1" && m["other_id"] == "O2"));
    assert!(matches
        .iter()
        .any(|m| m["kind"] == "indirect" && m["pila_id"] == "P2" && m["other_id"] == "O1"));
}

#[test]
fn test_compare_tsv_output() {
    let (_dir, pila, other, _table) = fixtures();

    lexicon_overlap()
        .args(["-f", "tsv", "compare"])
        .arg(&pila)
        .arg(&other)
        .assert()
        .success()
        .stdout(predicate::str::starts_with("pila_size\tother_size\tdirect_overlap"));
}

#[test]
fn test_compare_gzipped_csv_input() {
    let (dir, pila, _other, _table) = fixtures();

    let path = dir.path().join("jambu.csv.gz");
    let file = std::fs::File::create(&path).expect("Failed to create file");
    let mut encoder = flate2::write::GzEncoder::new(file, flate2::Compression::default());
    encoder
        .write_all(b"id,form\nJ1,ignis\nJ2,terra\n")
        .expect("Failed to compress");
    encoder.finish().expect("Failed to finish gzip stream");

    lexicon_overlap()
        .arg("compare")
        .arg(&pila)
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("PILA and jambu:"))
        .stdout(predicate::str::contains("* Direct Overlap: 1"));
}

#[test]
fn test_compare_missing_file_fails() {
    let (_dir, pila, _other, _table) = fixtures();

    lexicon_overlap()
        .arg("compare")
        .arg(&pila)
        .arg("does-not-exist.tsv")
        .assert()
        .failure()
        .stderr(predicate::str::contains("IO error"));
}

#[test]
fn test_compare_rejects_empty_form() {
    let (dir, pila, _other, _table) = fixtures();
    let bad = write_file(&dir, "bad.tsv", "O1\taqua\nO2\t\n");

    lexicon_overlap()
        .arg("compare")
        .arg(&pila)
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("line 2"));
}

#[test]
fn test_decline_applies_correction() {
    let (_dir, _pila, _other, table) = fixtures();

    lexicon_overlap()
        .args(["decline", "lupus", "--decliner"])
        .arg(&table)
        .assert()
        .success()
        .stdout(predicate::str::contains("lupusum"));
}

#[test]
fn test_decline_unknown_headword_warns() {
    let (_dir, _pila, _other, table) = fixtures();

    lexicon_overlap()
        .args(["decline", "ignis", "--decliner"])
        .arg(&table)
        .assert()
        .success()
        .stderr(predicate::str::contains("Unknown headword"));
}
