//! Bundle file on disk → scored assessment → persisted, hashed document.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use rr_core::RiskCategory;
use rr_pipeline::{run_from_path, OutputFormat};
use rr_report::generator::{STRESS_HEADING, SUMMARY_HEADING};
use rr_report::{Document, ReportOptions};

fn options(day: u32) -> ReportOptions {
    ReportOptions::on(NaiveDate::from_ymd_opt(2025, 6, day).unwrap())
}

fn write_bundle(dir: &Path, body: &str) -> std::path::PathBuf {
    let p = dir.join("bundle.json");
    fs::write(&p, body).unwrap();
    p
}

const ANSWERS_BUNDLE: &str = r#"{
  "answers": [
    {"question_id": "game_show", "value": 4},
    {"question_id": "not_in_bank", "value": 2}
  ],
  "profile": {
    "age": "35-44",
    "income": "$100,000 - $150,000",
    "properties": ["Primary residence"],
    "has_alternative_investments": true
  },
  "contact_info": {"first_name": "Lin", "last_name": "Okafor", "city": "Denver", "state": "CO"}
}"#;

const AGGRESSIVE_BUNDLE: &str = r#"{
  "assessment": {"score": 80, "risk_level": "Aggressive", "recommendations": ["Rebalance yearly"]},
  "contact_info": {"first_name": "Sam"}
}"#;

fn load_document(path: &Path) -> Document {
    serde_json::from_slice(&fs::read(path).unwrap()).unwrap()
}

#[test]
fn answers_bundle_produces_full_document() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_bundle(dir.path(), ANSWERS_BUNDLE);
    let out = run_from_path(&input, &options(2), &dir.path().join("out"), OutputFormat::Json).unwrap();

    assert_eq!(out.assessment.score, 9);
    assert_eq!(out.assessment.risk_level, RiskCategory::Conservative);
    assert_eq!(out.sha256, rr_io::hasher::sha256_file(&out.path).unwrap());

    let doc = load_document(&out.path);
    assert_eq!(Some(doc.page_count()), out.pages);

    let stress = doc.find_page(STRESS_HEADING).unwrap();
    let summary = doc.find_page(SUMMARY_HEADING).unwrap();
    assert!(summary > stress);

    assert!(doc.find_page("Full Legal Name: Lin Okafor").is_some());
    assert!(doc.find_page("Age Range: 35-44").is_some());
    assert!(doc.find_page("Assessment Date: 6/2/2025").is_some());

    let n = doc.page_count();
    for (i, page) in doc.pages.iter().enumerate() {
        assert!(page.contains_text(&format!("Page {} of {}", i + 1, n)));
    }
}

#[test]
fn aggressive_summary_reports_worst_case() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_bundle(dir.path(), AGGRESSIVE_BUNDLE);
    let out = run_from_path(&input, &options(2), dir.path(), OutputFormat::Json).unwrap();
    let doc = load_document(&out.path);

    let summary = &doc.pages[doc.find_page(SUMMARY_HEADING).unwrap() - 1];
    assert!(summary.texts().any(|t| t.contains("-19.2%")));
    assert!(doc.find_page("FINANCIAL PROFILE").is_none());
}

#[test]
fn digest_depends_only_on_inputs_and_date() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_bundle(dir.path(), AGGRESSIVE_BUNDLE);

    let a = run_from_path(&input, &options(2), &dir.path().join("a"), OutputFormat::Json).unwrap();
    let b = run_from_path(&input, &options(2), &dir.path().join("b"), OutputFormat::Json).unwrap();
    let c = run_from_path(&input, &options(3), &dir.path().join("c"), OutputFormat::Json).unwrap();

    assert_eq!(a.sha256, b.sha256);
    assert_ne!(a.sha256, c.sha256);
}

#[test]
fn text_and_document_agree_on_headline_numbers() {
    let dir = tempfile::tempdir().unwrap();
    let input = write_bundle(dir.path(), AGGRESSIVE_BUNDLE);
    let json = run_from_path(&input, &options(2), dir.path(), OutputFormat::Json).unwrap();
    let text = run_from_path(&input, &options(2), dir.path(), OutputFormat::Text).unwrap();

    let doc = load_document(&json.path);
    let txt = fs::read_to_string(&text.path).unwrap();
    for needle in ["-19.2%", "Risk Number: 80", "Rebalance yearly"] {
        assert!(txt.contains(needle), "text report missing {needle}");
        assert!(doc.find_page(needle).is_some(), "document missing {needle}");
    }
}
