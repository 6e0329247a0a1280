//! Integration tests for data-quality analysis and cleaning.
//!
//! These tests drive the public API end to end, from fixture files through
//! analysis, cleaning, export and back.

use chrono::{TimeZone, Utc};
use datasift::crawl::{self, CrawledPage};
use datasift::reporting::format_issue_location;
use datasift::types::cell;
use datasift::{
    AnalyzerConfig, CleaningOptions, DataCleaner, DataQualityAnalyzer, DataSource,
    DatasetWorkspace, Issue, IssueKind, QualityReport, Record, SequentialIdGenerator, Value,
    export, ingest,
};
use pretty_assertions::assert_eq;
use std::path::PathBuf;
use std::sync::Arc;

// ============================================================================
// Helper Functions
// ============================================================================

fn fixtures_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn analyzer() -> DataQualityAnalyzer {
    DataQualityAnalyzer::default().with_id_generator(Arc::new(SequentialIdGenerator::new("it")))
}

fn records(json: &str) -> Vec<Record> {
    ingest::parse_json_str(json).expect("fixture JSON should parse")
}

// ============================================================================
// Analysis
// ============================================================================

#[test]
fn test_analyze_csv_fixture() {
    let dataset = ingest::load_file(fixtures_path().join("quality.csv"))
        .unwrap()
        .analyze(&analyzer())
        .unwrap();

    assert_eq!(dataset.name(), "quality");
    assert_eq!(dataset.source(), DataSource::Csv);
    assert_eq!(dataset.row_count(), 13);
    assert_eq!(dataset.columns(), &["name".to_string(), "score".to_string()]);
    assert_eq!(
        dataset.issues(),
        &[
            Issue::missing(10, "name"),
            Issue::duplicate(12),
            Issue::outlier(11, "score", 1000.0),
        ]
    );
    assert!(dataset.has_issues());
}

#[test]
fn test_analyze_json_fixture() {
    let dataset = ingest::load_file(fixtures_path().join("records.json"))
        .unwrap()
        .analyze(&analyzer())
        .unwrap();

    assert_eq!(dataset.source(), DataSource::Json);
    assert_eq!(
        dataset.columns(),
        &["id".to_string(), "name".to_string(), "email".to_string()]
    );
    // The third row repeats the first with its keys in another order.
    assert_eq!(
        dataset.issues(),
        &[
            Issue::missing(1, "name"),
            Issue::missing(1, "email"),
            Issue::duplicate(2),
        ]
    );
}

#[test]
fn test_single_json_object_becomes_one_row() {
    let dataset = ingest::load_file(fixtures_path().join("single_object.json"))
        .unwrap()
        .analyze(&analyzer())
        .unwrap();

    assert_eq!(dataset.row_count(), 1);
    assert_eq!(dataset.column_count(), 3);
    assert_eq!(cell(&dataset.records()[0], "price"), &Value::from("12.50"));
    assert_eq!(
        cell(&dataset.records()[0], "tags"),
        &Value::from(r#"["new","sale"]"#)
    );
    assert!(!dataset.has_issues());
}

#[test]
fn test_duplicate_reported_at_later_row() {
    let dataset = analyzer()
        .analyze(records(r#"[{"a": 1}, {"a": 1}, {"a": 2}]"#), "dups", DataSource::Manual)
        .unwrap();

    assert_eq!(dataset.issues(), &[Issue::duplicate(1)]);
}

#[test]
fn test_missing_values_only_for_empty_cells() {
    let dataset = analyzer()
        .analyze(
            records(r#"[{"a": 1, "b": ""}, {"a": "", "b": 2}]"#),
            "gaps",
            DataSource::Manual,
        )
        .unwrap();

    assert_eq!(
        dataset.issues(),
        &[Issue::missing(0, "b"), Issue::missing(1, "a")]
    );
}

#[test]
fn test_empty_input() {
    let dataset = analyzer()
        .analyze(Vec::new(), "nothing", DataSource::Api)
        .unwrap();

    assert_eq!(dataset.row_count(), 0);
    assert_eq!(dataset.column_count(), 0);
    assert!(dataset.issues().is_empty());
    assert!(!dataset.has_issues());
}

#[test]
fn test_reanalysis_is_stable() {
    let analyzer = analyzer();
    let dataset = ingest::load_file(fixtures_path().join("quality.csv"))
        .unwrap()
        .analyze(&analyzer)
        .unwrap();

    let again = analyzer
        .analyze(dataset.records().to_vec(), dataset.name(), dataset.source())
        .unwrap();

    assert_ne!(again.id(), dataset.id());
    assert_eq!(again.columns(), dataset.columns());
    assert_eq!(again.issues(), dataset.issues());
}

#[test]
fn test_outlier_gate_counts_numeric_values_only() {
    // Ten numbers plus text: too few numeric values to judge.
    let mut rows: Vec<String> = (1..=9).map(|i| format!(r#"{{"v": {i}}}"#)).collect();
    rows.push(r#"{"v": 5000}"#.to_string());
    rows.push(r#"{"v": "n/a"}"#.to_string());
    let dataset = analyzer()
        .analyze(records(&format!("[{}]", rows.join(","))), "gate", DataSource::Manual)
        .unwrap();

    assert_eq!(dataset.issues_of_kind(IssueKind::Outlier).count(), 0);
}

#[test]
fn test_numeric_text_is_coerced() {
    let mut rows: Vec<String> = (1..=10).map(|i| format!(r#"{{"w": "{i}kg"}}"#)).collect();
    rows.push(r#"{"w": "1000kg"}"#.to_string());
    let dataset = analyzer()
        .analyze(records(&format!("[{}]", rows.join(","))), "weights", DataSource::Manual)
        .unwrap();

    assert_eq!(dataset.issues(), &[Issue::outlier(10, "w", 1000.0)]);
}

#[test]
fn test_custom_config() {
    let config = AnalyzerConfig::builder()
        .min_outlier_samples(3)
        .z_score_threshold(1.0)
        .build()
        .unwrap();
    let dataset = DataQualityAnalyzer::new(config)
        .analyze(
            records(r#"[{"x": 1}, {"x": 2}, {"x": 3}, {"x": 10}]"#),
            "small",
            DataSource::Manual,
        )
        .unwrap();

    assert_eq!(dataset.issues(), &[Issue::outlier(3, "x", 10.0)]);
}

#[test]
fn test_dataset_serialization() {
    let dataset = analyzer()
        .analyze(records(r#"[{"a": ""}]"#), "one", DataSource::Json)
        .unwrap();
    let json = serde_json::to_value(&dataset).unwrap();

    assert_eq!(json["name"], "one");
    assert_eq!(json["source"], "json");
    assert_eq!(json["row_count"], 1);
    assert_eq!(json["has_issues"], true);
    assert_eq!(json["issues"][0]["type"], "missing");
    assert_eq!(json["issues"][0]["row_index"], 0);
    assert_eq!(json["issues"][0]["column_name"], "a");
    assert!(json["issues"][0].get("value").is_none());
}

// ============================================================================
// Cleaning
// ============================================================================

#[test]
fn test_clean_and_export_round_trip() {
    let analyzer = analyzer();
    let dataset = ingest::load_file(fixtures_path().join("quality.csv"))
        .unwrap()
        .analyze(&analyzer)
        .unwrap();

    let cleaner = DataCleaner::new(analyzer.clone());
    let (cleaned, summary) = cleaner
        .clean_with_summary(&dataset, &CleaningOptions::all())
        .unwrap();

    assert_eq!(cleaned.name(), "quality (cleaned)");
    assert_eq!(cleaned.row_count(), 11);
    assert_eq!(summary.duplicates_removed + summary.outliers_removed, 2);
    assert!(cleaned.issues().is_empty());

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cleaned.csv");
    export::write_csv(&cleaned, &path).unwrap();

    let reloaded = ingest::load_file(&path).unwrap().analyze(&analyzer).unwrap();
    assert_eq!(reloaded.row_count(), 11);
    assert_eq!(reloaded.columns(), cleaned.columns());
    assert_eq!(cell(&reloaded.records()[10], "name"), &Value::from("N/A"));
    assert!(!reloaded.has_issues());
}

#[test]
fn test_custom_fill_value() {
    let dataset = ingest::load_file(fixtures_path().join("records.json"))
        .unwrap()
        .analyze(&analyzer())
        .unwrap();

    let options = CleaningOptions::builder()
        .fill_missing_values(true)
        .fill_value("unknown")
        .build();
    let cleaned = DataCleaner::new(analyzer()).clean(&dataset, &options).unwrap();

    assert_eq!(cell(&cleaned.records()[1], "name"), &Value::from("unknown"));
    assert_eq!(cell(&cleaned.records()[1], "email"), &Value::from("unknown"));
    assert_eq!(cleaned.issues(), &[Issue::duplicate(2)]);
}

#[test]
fn test_options_from_partial_json() {
    let options: CleaningOptions =
        serde_json::from_str(r#"{"remove_duplicates": true, "fill_value": ""}"#).unwrap();

    assert!(options.remove_duplicates);
    assert!(!options.fill_missing_values);
    assert_eq!(options.effective_fill_value(), "N/A");
}

// ============================================================================
// Reporting, crawl and workspace
// ============================================================================

#[test]
fn test_quality_report() {
    let dataset = ingest::load_file(fixtures_path().join("quality.csv"))
        .unwrap()
        .analyze(&analyzer())
        .unwrap();
    let report = QualityReport::from_dataset(&dataset);

    assert_eq!(report.total_issues, 3);
    assert_eq!(report.issue_counts.missing, 1);
    assert_eq!(report.issue_counts.duplicate, 1);
    assert_eq!(report.issue_counts.outlier, 1);
    assert_eq!(report.columns[0].column, "name");
    assert_eq!(report.columns[0].missing, 1);
    assert_eq!(report.columns[1].outliers, 1);
    assert!((report.completeness - 25.0 / 26.0).abs() < 1e-9);

    let locations: Vec<String> = dataset
        .issues()
        .iter()
        .filter_map(format_issue_location)
        .collect();
    assert_eq!(
        locations,
        vec![
            "Row 11, Column: name".to_string(),
            "Row 13".to_string(),
            "Row 12, Column: score, Value: 1000".to_string(),
        ]
    );
}

#[test]
fn test_crawl_dataset() {
    let pages = vec![
        CrawledPage {
            source_url: Some("https://example.com/".to_string()),
            title: Some("Home".to_string()),
            markdown: Some("Welcome to the site".to_string()),
        },
        CrawledPage {
            source_url: Some("https://example.com/about".to_string()),
            title: None,
            markdown: None,
        },
    ];
    let crawled_at = Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap();
    let dataset =
        crawl::analyze_crawl(&analyzer(), &pages, "https://example.com", crawled_at).unwrap();

    assert_eq!(dataset.name(), "Web Crawl: example.com");
    assert_eq!(dataset.source(), DataSource::Web);
    assert_eq!(
        export::to_csv_string(&dataset),
        "id,url,title,content_length,word_count,crawled_at\n\
         1,https://example.com/,Home,19,4,2024-05-06T07:08:09.000Z\n\
         2,https://example.com/about,N/A,0,0,2024-05-06T07:08:09.000Z"
    );
}

#[test]
fn test_workspace_flow() {
    let analyzer = analyzer();
    let cleaner = DataCleaner::new(analyzer.clone());
    let mut workspace = DatasetWorkspace::new();

    for fixture in ["quality.csv", "records.json"] {
        let dataset = ingest::load_file(fixtures_path().join(fixture))
            .unwrap()
            .analyze(&analyzer)
            .unwrap();
        workspace.add(dataset);
    }
    assert_eq!(workspace.active().unwrap().name(), "records");

    let first_id = workspace.list()[0].id().to_string();
    workspace.select(&first_id).unwrap();
    let cleaned = workspace
        .clean_active(&cleaner, &CleaningOptions::all())
        .unwrap();
    assert_eq!(cleaned.name(), "quality (cleaned)");

    let names: Vec<&str> = workspace.list().iter().map(|d| d.name()).collect();
    assert_eq!(names, vec!["quality (cleaned)", "records"]);

    workspace.remove_active().unwrap();
    assert_eq!(workspace.len(), 1);
    assert!(workspace.active().is_none());
}

#[test]
fn test_unsupported_file_type() {
    let error = ingest::load_file(fixtures_path().join("notes.txt")).unwrap_err();

    assert_eq!(error.error_code(), "UNSUPPORTED_FILE_TYPE");
    assert!(error.is_recoverable());
}
