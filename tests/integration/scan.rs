//! Scanning, pruning, and manifest behavior, exercised through the real binary.
use crate::integration::utils::{Harvest, MANIFEST_FILE, MATCH_LIST_FILE};
use sha2::{Digest, Sha256};

/// The canonical pruning scenario: `keep_depth.py` matches the "depth" pattern but
/// lives under an ignored `vendor` directory, so it must not appear anywhere.
#[test]
fn pruned_subtree_beats_matching_filename() {
    let mut harvest = Harvest::with_test_fs();
    harvest
        .fs
        .file("a/keep_range.cpp", "int main() {}\n")
        .file("a/skip.txt", "nothing\n")
        .file("b/vendor/keep_depth.py", "print()\n")
        .file("b/keep_distance.h", "#pragma once\n");
    harvest.fs.cwd_file("rules.txt", "vendor/\n");
    let ignore_file = harvest.fs.cwd.path().join("rules.txt");

    harvest
        .cmd
        .args(["--patterns", "range,depth,distance"])
        .arg("--ignore-file")
        .arg(&ignore_file)
        .assert()
        .success()
        .stdout(predicates::str::contains("Matched 2 files"));

    let list = harvest.fs.read_output(MATCH_LIST_FILE);
    assert!(list.contains("keep_range.cpp"));
    assert!(list.contains("keep_distance.h"));
    assert!(!list.contains("keep_depth.py"));
    assert!(!list.contains("skip.txt"));

    let manifest = harvest.fs.read_output(MANIFEST_FILE);
    assert_eq!(manifest.lines().count(), 2);
}

/// Substring matching is case-insensitive on the base name only.
#[test]
fn case_insensitive_substring_match() {
    let mut harvest = Harvest::with_test_fs();
    harvest
        .fs
        .file("sensors/MyRANGEsensor.H", "class Sensor;\n")
        .file("sensors/rang.h", "near miss\n");

    harvest
        .cmd
        .args(["--patterns", "Range"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Matched 1 files"));

    let list = harvest.fs.read_output(MATCH_LIST_FILE);
    assert!(list.contains("MyRANGEsensor.H"));
    assert!(!list.contains("rang.h"));
}

/// Zero matches is a completed run: exit 0, both index files created and empty, no
/// mirrored files.
#[test]
fn zero_matches_exits_zero_with_empty_artifacts() {
    let mut harvest = Harvest::with_test_fs();
    harvest.fs.file("a/unrelated.txt", "x\n");

    harvest
        .cmd
        .args(["--patterns", "range"])
        .assert()
        .success()
        .stdout(predicates::str::contains("No files matched"));

    assert_eq!(harvest.fs.read_output(MATCH_LIST_FILE), "");
    assert_eq!(harvest.fs.read_output(MANIFEST_FILE), "");
    assert!(!harvest.fs.output_file("a").exists());
}

/// Each manifest line carries six tab-separated fields, and the content hash is the
/// real SHA-256 of the file.
#[test]
fn manifest_records_are_complete_and_hashed() {
    let content = "the quick brown fox\n";
    let mut harvest = Harvest::with_test_fs();
    harvest.fs.file("logs/range_table.csv", content);

    harvest
        .cmd
        .args(["--patterns", "range"])
        .assert()
        .success();

    let manifest = harvest.fs.read_output(MANIFEST_FILE);
    let line = manifest.lines().next().expect("manifest should have one line");
    let fields: Vec<&str> = line.split('\t').collect();
    assert_eq!(fields.len(), 6);

    // display timestamp, epoch, size
    assert!(!fields[0].is_empty());
    assert!(fields[1].parse::<i64>().unwrap() > 0);
    assert_eq!(fields[2].parse::<u64>().unwrap(), content.len() as u64);

    let expected_hash = format!("{:x}", Sha256::digest(content.as_bytes()));
    assert_eq!(fields[3], expected_hash);

    assert!(fields[4].ends_with("logs/range_table.csv"));
    assert!(fields[5].ends_with("logs/range_table.csv"));
    assert!(std::path::Path::new(fields[5]).is_absolute());
}

/// Re-running on an unchanged tree reproduces the match list byte for byte, and the
/// manifest too (content unchanged means hashes and mtimes unchanged).
#[test]
fn reruns_are_deterministic() {
    let mut harvest = Harvest::with_test_fs();
    harvest
        .fs
        .file("z/keep_range.c", "z\n")
        .file("a/keep_range.c", "a\n")
        .file("m/nested/keep_range.c", "m\n");

    harvest
        .cmd
        .args(["--patterns", "range"])
        .assert()
        .success();
    let first_list = harvest.fs.read_output(MATCH_LIST_FILE);
    let first_manifest = harvest.fs.read_output(MANIFEST_FILE);

    // Sorted ascending by path
    let lines: Vec<&str> = first_list.lines().collect();
    let mut sorted = lines.clone();
    sorted.sort_unstable();
    assert_eq!(lines, sorted);
    assert_eq!(lines.len(), 3);

    let mut harvest = harvest.rerun();
    harvest
        .cmd
        .args(["--patterns", "range"])
        .assert()
        .success();

    assert_eq!(harvest.fs.read_output(MATCH_LIST_FILE), first_list);
    assert_eq!(harvest.fs.read_output(MANIFEST_FILE), first_manifest);
}

/// With no pattern flags at all, a conventionally named pattern file in the working
/// directory is discovered and used.
#[test]
fn default_pattern_file_is_discovered_in_cwd() {
    let mut harvest = Harvest::with_test_fs();
    harvest.fs.file("a/keep_range.cpp", "x\n");
    harvest.fs.cwd_file("harvest.patterns", "# review set\nrange\n");

    harvest
        .cmd
        .assert()
        .success()
        .stdout(predicates::str::contains("Matched 1 files"));
}

/// Same discovery mechanism for the ignore file.
#[test]
fn default_ignore_file_is_discovered_in_cwd() {
    let mut harvest = Harvest::with_test_fs();
    harvest
        .fs
        .file("keep_range.cpp", "x\n")
        .file("vendor/also_range.cpp", "x\n");
    harvest.fs.cwd_file("harvest.ignore", "vendor/\n");

    harvest
        .cmd
        .args(["--patterns", "range"])
        .assert()
        .success()
        .stdout(predicates::str::contains("Matched 1 files"));

    let list = harvest.fs.read_output(MATCH_LIST_FILE);
    assert!(!list.contains("vendor"));
}
