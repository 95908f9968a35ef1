//! Integration tests for the kotoba CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn kotoba() -> Command {
    Command::cargo_bin("kotoba").unwrap()
}

#[test]
fn test_extract_lines_to_json() {
    let output = kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-lines.txt"))
        .arg("-q")
        .output()
        .unwrap();
    assert!(output.status.success());

    let bundle: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bundle["totalVocabulary"], 5);
    assert_eq!(bundle["totalLessons"], 1);
    assert_eq!(bundle["statistics"]["successRate"], "100.00%");

    let first = &bundle["lessons"][0]["vocabulary"][0];
    assert_eq!(first["id"], "vocab-0001");
    assert_eq!(first["kanji"], "注意");
    assert_eq!(first["pronunciation"], "chuui");

    let merged = &bundle["lessons"][0]["vocabulary"][3];
    assert_eq!(merged["kanji"], "決意");
    assert_eq!(merged["hiragana"], "けつい");
}

#[test]
fn test_extract_fragments() {
    kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-fragments.json"))
        .arg("-f")
        .arg("text")
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("注意\tちゅうい\tchuui\tchú ý"))
        .stdout(predicate::str::contains("決意\tけつい\tketsui\tquyết tâm"))
        .stdout(predicate::str::contains("家族\tかぞく\tkazoku\tgia đình"))
        .stdout(predicate::str::contains("PART").not());
}

#[test]
fn test_markdown_output() {
    kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-lines.txt"))
        .arg("-f")
        .arg("markdown")
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::contains("## Lesson 1: Vocabulary 1-5"))
        .stdout(predicate::str::contains("| 億 | おく | oku | 100 triệu yên |"))
        .stdout(predicate::str::contains("*Total vocabulary: 5*"));
}

#[test]
fn test_summary_on_stderr() {
    kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-lines.txt"))
        .assert()
        .success()
        .stderr(predicate::str::contains("Valid entries:     5"))
        .stderr(predicate::str::contains("Success rate:      100.00%"));
}

#[test]
fn test_config_file_and_overrides() {
    let output = kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-lines.txt"))
        .arg("-c")
        .arg(fixture_path("kotoba.toml"))
        .arg("--examples")
        .arg("-q")
        .output()
        .unwrap();
    assert!(output.status.success());

    let bundle: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bundle["totalVocabulary"], 4);
    assert_eq!(bundle["totalLessons"], 2);
    assert_eq!(bundle["statistics"]["duplicatesRemoved"], 1);
    assert_eq!(bundle["lessons"][1]["id"], "lesson-002");
    assert!(bundle["lessons"][0]["vocabulary"][0]["example"].is_string());
}

#[test]
fn test_no_lookahead() {
    let output = kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-lines.txt"))
        .arg("--no-lookahead")
        .arg("-q")
        .output()
        .unwrap();
    assert!(output.status.success());

    let bundle: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bundle["lessons"][0]["vocabulary"][3]["hiragana"], "");
    assert_eq!(bundle["statistics"]["invalidEntries"], 1);
}

#[test]
fn test_output_to_file() {
    let temp_dir = TempDir::new().unwrap();
    let output_file = temp_dir.path().join("n3.json");

    kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-fragments.json"))
        .arg("-o")
        .arg(&output_file)
        .arg("-q")
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let content = fs::read_to_string(&output_file).unwrap();
    assert!(content.contains("\"totalVocabulary\": 3"));
}

#[test]
fn test_glob_pattern() {
    let output = kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("n3-*"))
        .arg("-q")
        .output()
        .unwrap();
    assert!(output.status.success());

    // fragments file sorts before the lines file
    let bundle: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(bundle["totalVocabulary"], 8);
}

#[test]
fn test_invalid_file() {
    kotoba()
        .arg("extract")
        .arg("-i")
        .arg("nonexistent.txt")
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found"));
}

#[test]
fn test_malformed_document_fails() {
    kotoba()
        .arg("extract")
        .arg("-i")
        .arg(fixture_path("invalid/broken.json"))
        .arg("-q")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to extract"))
        .stderr(predicate::str::contains("broken.json"));
}

#[test]
fn test_romaji_command() {
    kotoba()
        .arg("romaji")
        .arg("きゃく")
        .arg("ちゅうい")
        .assert()
        .success()
        .stdout("kyaku\nchuui\n");
}

#[test]
fn test_list_rules() {
    kotoba()
        .arg("list")
        .arg("rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("kanji-paren-hiragana-meaning"))
        .stdout(predicate::str::contains("hiragana-meaning"));
}

#[test]
fn test_list_formats() {
    kotoba()
        .arg("list")
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("json"))
        .stdout(predicate::str::contains("markdown"));
}

#[test]
fn test_generate_then_validate_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("kotoba.toml");

    kotoba()
        .arg("generate-config")
        .arg("-o")
        .arg(&config_file)
        .assert()
        .success();

    kotoba()
        .arg("validate")
        .arg("-c")
        .arg(&config_file)
        .assert()
        .success()
        .stdout(predicate::str::contains("Configuration is valid"));
}

#[test]
fn test_validate_rejects_bad_config() {
    let temp_dir = TempDir::new().unwrap();
    let config_file = temp_dir.path().join("bad.toml");
    fs::write(&config_file, "[lessons]\nsize = 0\n").unwrap();

    kotoba()
        .arg("validate")
        .arg("-c")
        .arg(&config_file)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration error"));
}

#[test]
fn test_help_command() {
    kotoba()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("extract"))
        .stdout(predicate::str::contains("romaji"));
}
