//! Integration tests for the holdout CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Helper to get the path to a test fixture
fn fixture_path(name: &str) -> String {
    format!("tests/fixtures/{}", name)
}

fn holdout() -> Command {
    Command::cargo_bin("holdout").unwrap()
}

fn read_lines(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(str::to_string)
        .collect()
}

#[test]
fn test_split_with_header() {
    let dir = TempDir::new().unwrap();

    holdout()
        .args(["split", "-i", &fixture_path("corpus.csv")])
        .args(["-k", "3", "--seed", "7", "--header", "-q"])
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Partitioned 20 records with reservoir (bounded memory)",
        ))
        .stdout(predicate::str::contains("seed: 7"));

    let train = read_lines(&dir.path().join("train.csv"));
    let dev = read_lines(&dir.path().join("dev.csv"));
    let test = read_lines(&dir.path().join("test.csv"));

    for output in [&train, &dev, &test] {
        assert_eq!(output[0], "Text,Label");
    }
    assert_eq!(dev.len(), 4);
    assert_eq!(test.len(), 4);
    assert_eq!(train.len(), 15);

    // Every data row lands in exactly one output
    let mut all: Vec<_> = [&train, &dev, &test]
        .iter()
        .flat_map(|lines| lines[1..].iter().cloned())
        .collect();
    all.sort();
    let mut expected: Vec<_> = read_lines(Path::new(&fixture_path("corpus.csv")))[1..].to_vec();
    expected.sort();
    assert_eq!(all, expected);
}

#[test]
fn test_split_same_seed_is_reproducible() {
    let first = TempDir::new().unwrap();
    let second = TempDir::new().unwrap();

    for dir in [&first, &second] {
        holdout()
            .args(["split", "-i", &fixture_path("corpus.csv"), "-k", "2"])
            .args(["--seed", "1234", "-q"])
            .arg("-d")
            .arg(dir.path())
            .assert()
            .success();
    }

    for name in ["train.csv", "dev.csv", "test.csv"] {
        assert_eq!(
            fs::read(first.path().join(name)).unwrap(),
            fs::read(second.path().join(name)).unwrap(),
            "{name} differs between runs"
        );
    }
}

#[test]
fn test_split_small_corpus_degrades() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("small.txt");
    fs::write(&input, "one\ntwo\nthree\n").unwrap();
    let out = dir.path().join("out");

    holdout()
        .args(["split", "-k", "5", "--seed", "1", "-q"])
        .arg("-i")
        .arg(&input)
        .arg("-d")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("warning: corpus too small"));

    assert_eq!(read_lines(&out.join("train.csv")).len(), 0);
    assert_eq!(read_lines(&out.join("dev.csv")).len(), 2);
    assert_eq!(read_lines(&out.join("test.csv")).len(), 1);
}

#[test]
fn test_split_from_stdin() {
    let dir = TempDir::new().unwrap();

    holdout()
        .args(["split", "-i", "-", "-k", "1", "--seed", "5", "-q"])
        .arg("-d")
        .arg(dir.path())
        .write_stdin("a\nb\nc\nd\ne\n")
        .assert()
        .success();

    assert_eq!(read_lines(&dir.path().join("dev.csv")).len(), 1);
    assert_eq!(read_lines(&dir.path().join("test.csv")).len(), 1);
    assert_eq!(read_lines(&dir.path().join("train.csv")).len(), 3);
}

#[test]
fn test_split_zero_half_size_fails() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");

    holdout()
        .args(["split", "-i", &fixture_path("corpus.csv"), "-k", "0"])
        .arg("-d")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("half_size must be greater than 0"));

    assert!(!out.exists());
}

#[test]
fn test_nonexistent_input_fails() {
    let dir = TempDir::new().unwrap();

    holdout()
        .args(["split", "-i", "nonexistent_corpus.csv", "-q"])
        .arg("-d")
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("No files found matching"));
}

#[test]
fn test_failed_run_leaves_no_outputs() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("broken.txt");
    fs::write(&input, b"fine\n\xff\xfe\nfine again\n").unwrap();
    let out = dir.path().join("out");

    holdout()
        .args(["split", "-k", "1", "--seed", "1", "-q"])
        .arg("-i")
        .arg(&input)
        .arg("-d")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid UTF-8 on line 2"));

    assert_eq!(fs::read_dir(&out).unwrap().count(), 0);
}

#[test]
fn test_directory_at_dev_path_leaves_no_outputs() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    fs::create_dir_all(out.join("dev.csv")).unwrap();

    holdout()
        .args(["split", "-i", &fixture_path("corpus.csv"), "-k", "1"])
        .args(["--seed", "1", "-q"])
        .arg("-d")
        .arg(&out)
        .assert()
        .failure()
        .stderr(predicate::str::contains("dev.csv"));

    assert!(!out.join("train.csv").exists());
    assert!(!out.join("test.csv").exists());
    let names: Vec<_> = fs::read_dir(&out)
        .unwrap()
        .map(|e| e.unwrap().file_name())
        .collect();
    assert_eq!(names, vec!["dev.csv"]);
}

#[test]
fn test_dedup_command() {
    let dir = TempDir::new().unwrap();

    holdout()
        .args(["dedup", "-i", &fixture_path("duplicates.txt"), "-n", "2"])
        .args(["--seed", "3", "-q"])
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("unbounded memory"))
        .stdout(predicate::str::contains("duplicates dropped: 3"));

    let test = read_lines(&dir.path().join("test.csv"));
    let train = read_lines(&dir.path().join("train.csv"));
    assert!(!dir.path().join("dev.csv").exists());
    assert_eq!(test.len(), 2);
    assert_eq!(train.len(), 3);

    let union: BTreeSet<_> = test.iter().chain(train.iter()).cloned().collect();
    let expected: BTreeSet<_> = ["alpha", "beta", "gamma", "delta", "epsilon"]
        .into_iter()
        .map(str::to_string)
        .collect();
    assert_eq!(union, expected);
}

#[test]
fn test_json_report() {
    let dir = TempDir::new().unwrap();

    let output = holdout()
        .args(["split", "-i", &fixture_path("corpus.csv"), "-k", "4"])
        .args(["--header", "--seed", "99", "--report", "json", "-q"])
        .arg("-d")
        .arg(dir.path())
        .output()
        .unwrap();
    assert!(output.status.success());

    let json: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(json["strategy"], "reservoir");
    assert_eq!(json["records_read"], 20);
    assert_eq!(json["header_written"], true);
    assert_eq!(json["dev"], 4);
    assert_eq!(json["test"], 4);
    assert_eq!(json["train"], 12);
    assert_eq!(json["reservoir_capacity"], 8);
    assert_eq!(json["seed"], 99);
    assert_eq!(json["degraded"], false);
    assert!(json["outputs"]["dev"]
        .as_str()
        .unwrap()
        .ends_with("dev.csv"));
}

#[test]
fn test_config_file_names_and_sizes() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("holdout.toml");
    fs::write(
        &config,
        r#"
[reservoir]
half_size = 2

[random]
seed = 8

[input]
header = true

[output]
dev = "test1.csv"
test = "test2.csv"
"#,
    )
    .unwrap();

    holdout()
        .args(["split", "-i", &fixture_path("corpus.csv"), "-q"])
        .arg("-c")
        .arg(&config)
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("seed: 8"));

    assert_eq!(read_lines(&dir.path().join("test1.csv")).len(), 3);
    assert_eq!(read_lines(&dir.path().join("test2.csv")).len(), 3);
    assert_eq!(read_lines(&dir.path().join("train.csv")).len(), 17);
}

#[test]
fn test_list_strategies() {
    holdout()
        .args(["list", "strategies"])
        .assert()
        .success()
        .stdout(predicate::str::contains("reservoir"))
        .stdout(predicate::str::contains("bounded memory"))
        .stdout(predicate::str::contains("dedup"))
        .stdout(predicate::str::contains("unbounded memory"));
}

#[test]
fn test_list_formats() {
    holdout()
        .args(["list", "formats"])
        .assert()
        .success()
        .stdout(predicate::str::contains("text"))
        .stdout(predicate::str::contains("json"));
}

#[test]
fn test_generate_config_round_trip() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("holdout.toml");

    holdout()
        .args(["generate-config", "-o"])
        .arg(&config)
        .assert()
        .success()
        .stdout(predicate::str::contains("generated successfully"));

    holdout()
        .args(["split", "-i", &fixture_path("corpus.csv"), "-k", "1", "-q"])
        .arg("-c")
        .arg(&config)
        .arg("-d")
        .arg(dir.path())
        .assert()
        .success();

    assert_eq!(read_lines(&dir.path().join("dev.csv")).len(), 1);
}

#[test]
fn test_help_lists_commands() {
    holdout()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("split"))
        .stdout(predicate::str::contains("dedup"))
        .stdout(predicate::str::contains("generate-config"));
}
