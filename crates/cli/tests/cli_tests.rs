use assert_cmd::Command;
use predicates::prelude::*;

fn cmd() -> Command {
    assert_cmd::cargo::cargo_bin_cmd!("naamkhoj")
}

fn fixture() -> String {
    format!("{}/tests/fixtures/rows.json", env!("CARGO_MANIFEST_DIR"))
}

// ── varna subcommand ────────────────────────────────────────────

#[test]
fn varna_shows_all_three_forms() {
    cmd()
        .args(["varna", "राम कुमार"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("Strict: राम कुमार"))
        .stdout(predicate::str::contains("Exact:  रAम कUमAर"))
        .stdout(predicate::str::contains("Loose:"));
}

#[test]
fn varna_segments_entities() {
    cmd()
        .args(["varna", "कमल"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("क | म | ल"));
}

// ── kunji subcommand ────────────────────────────────────────────

#[test]
fn kunji_lists_keys_for_every_form() {
    cmd()
        .args(["kunji", "राम कुमार"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("strict"))
        .stdout(predicate::str::contains("exact"))
        .stdout(predicate::str::contains("loose"))
        .stdout(predicate::str::contains("राम"));
}

#[test]
fn kunji_single_form() {
    cmd()
        .args(["kunji", "राम", "--form", "strict"])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("strict"))
        .stdout(predicate::str::contains("exact").not());
}

// ── khoj subcommand ─────────────────────────────────────────────

#[test]
fn khoj_finds_exact_match_first() {
    cmd()
        .args(["khoj", "राम", "--data", &fixture()])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("1. [AC 1 #12] राम"));
}

#[test]
fn khoj_json_output_is_parseable() {
    let output = cmd()
        .args(["khoj", "राम", "--data", &fixture(), "--format", "json"])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value =
        serde_json::from_slice(&output).expect("stdout should be valid JSON");
    let arr = json.as_array().unwrap();
    assert!(!arr.is_empty());
    assert_eq!(arr[0]["serial_no"], 12);
    assert!(arr[0].get("key").is_some());
    assert!(arr[0].get("why").is_some());
}

#[test]
fn khoj_scope_and_limit() {
    let output = cmd()
        .args([
            "khoj",
            "राम",
            "--data",
            &fixture(),
            "--scope",
            "relative",
            "--limit",
            "1",
            "--format",
            "json",
        ])
        .assert()
        .code(0)
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    let arr = json.as_array().unwrap();
    assert_eq!(arr.len(), 1);
    assert_eq!(arr[0]["field"], "relative");
}

#[test]
fn khoj_exact_only_drops_fuzzy_rows() {
    cmd()
        .args([
            "khoj",
            "बाला",
            "--data",
            &fixture(),
            "--exact-only",
        ])
        .assert()
        .code(0)
        .stdout(predicate::str::contains("no matches"));
}

#[test]
fn khoj_missing_snapshot_exits_2() {
    cmd()
        .args(["khoj", "राम", "--data", "/nonexistent/rows.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("error"));
}
