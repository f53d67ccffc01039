use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn rr() -> Command {
    let mut cmd = Command::cargo_bin("rr").unwrap();
    cmd.env_remove("RUST_LOG");
    cmd
}

fn write(dir: &Path, name: &str, body: &str) -> std::path::PathBuf {
    let p = dir.join(name);
    fs::write(&p, body).unwrap();
    p
}

const BUNDLE: &str = r#"{
  "assessment": {"score": 72, "risk_level": "Aggressive", "recommendations": ["Keep a cash buffer"]},
  "contact_info": {"first_name": "Grace", "last_name": "Hopper", "email": "grace@example.com"}
}"#;

#[test]
fn questions_lists_the_bank() {
    rr().arg("questions")
        .assert()
        .success()
        .stdout(predicate::str::contains("\"game_show\""));
}

#[test]
fn score_prints_assessment() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write(dir.path(), "a.json", r#"[{"question_id": "game_show", "value": 4}]"#);
    rr().args(["score", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": 9").and(predicate::str::contains("Conservative")));
}

#[test]
fn score_skips_free_text_question_ids() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write(
        dir.path(),
        "a.json",
        r#"[{"question_id": "game_show", "value": 4}, {"question_id": "legacy question 7", "value": 1}]"#,
    );
    rr().args(["score", "--answers"])
        .arg(&answers)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"score\": 9"));
}

#[test]
fn generate_rejects_category_that_disagrees_with_score() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(
        dir.path(),
        "bundle.json",
        r#"{"assessment": {"score": 10, "risk_level": "Aggressive", "recommendations": []}}"#,
    );
    rr().args(["generate", "--input"]).arg(&input).arg("--out").arg(dir.path()).assert().code(2);
    assert!(!dir.path().join("report.json").exists());
}

#[test]
fn score_rejects_out_of_range_option() {
    let dir = tempfile::tempdir().unwrap();
    let answers = write(dir.path(), "a.json", r#"[{"question_id": "game_show", "value": 40}]"#);
    rr().args(["score", "--answers"]).arg(&answers).assert().code(2);
}

#[test]
fn generate_writes_document_and_prints_digest() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bundle.json", BUNDLE);
    let out = dir.path().join("out");
    rr().args(["generate", "--date", "2025-03-14", "--quiet", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("report.json"));

    let doc = fs::read_to_string(out.join("report.json")).unwrap();
    assert!(doc.contains("3/14/2025"));
    assert!(doc.contains("Grace Hopper"));
}

#[test]
fn generate_text_format() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bundle.json", BUNDLE);
    rr().args(["generate", "--format", "text", "--portfolio-value", "250000", "--input"])
        .arg(&input)
        .arg("--out")
        .arg(dir.path())
        .assert()
        .success();
    let text = fs::read_to_string(dir.path().join("report.txt")).unwrap();
    assert!(text.contains("$250,000"));
}

#[test]
fn missing_input_is_validation_error() {
    rr().args(["generate", "--input", "no/such/bundle.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("file not found"));
}

#[test]
fn unusable_bundle_is_validation_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bundle.json", r#"{"contact_info": {}}"#);
    rr().args(["generate", "--input"]).arg(&input).arg("--out").arg(dir.path()).assert().code(2);
    assert!(!dir.path().join("report.json").exists());
}

#[test]
fn unwritable_output_is_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let input = write(dir.path(), "bundle.json", BUNDLE);
    // --out names an existing file, so the output directory cannot be created.
    let blocker = write(dir.path(), "blocker", "x");
    rr().args(["generate", "--input"]).arg(&input).arg("--out").arg(&blocker).assert().code(4);
}

#[test]
fn bad_flags_are_rejected() {
    rr().args(["generate", "--input", "x.json", "--date", "14/03/2025"]).assert().code(2);
    rr().args(["generate", "--input", "x.json", "--portfolio-value", "-1"]).assert().code(2);
    rr().args(["score", "--answers", "https://example.com/a.json"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("no scheme"));
}
