//! Integration tests for command reports and their rendering.

use std::io::Write;

use hsn_cli::config::AppConfig;
use hsn_cli::summary::{
    lookup_table, stats_table, suggestion_table, validation_footer, validation_table,
};
use hsn_cli::types::{LookupReport, StatsReport, SuggestReport, ValidateReport};
use hsn_core::CodeBook;
use hsn_map::Suggester;
use hsn_model::{CodeRecord, SuggestOptions};
use hsn_standards::CsvTableLoader;
use hsn_validate::Validator;

const TABLE: &str = "\
Sl No,HSNCode,Description,Rate
1,01,Live animals,0
2,0101,Live horses,0
3,010110,Pure-bred breeding horses,0
4,01011010,Pure-bred breeding horses,0
5,,Orphan row,0
";

fn book() -> CodeBook {
    CodeBook::from_records(vec![
        CodeRecord::new("01", "Live animals"),
        CodeRecord::new("0101", "Live horses"),
        CodeRecord::new("010110", "Pure-bred breeding horses"),
    ])
}

fn rendered(mut table: comfy_table::Table) -> String {
    table.force_no_tty();
    table.to_string()
}

#[test]
fn validate_report_counts_and_renders() {
    let book = book();
    let results = Validator::new(&book).validate_bulk(["0101", "01A", "9999"]);
    let report = ValidateReport::new(results);

    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.valid, 1);
    assert!(report.summary.has_invalid());

    let text = rendered(validation_table(&report));
    assert!(text.contains("Live horses"));
    assert!(text.contains("HSN code must contain only digits"));
    assert!(text.contains("HSN code not found in database"));
    assert_eq!(validation_footer(&report), "3 checked: 1 valid, 2 invalid");
}

#[test]
fn suggest_report_renders_levels() {
    let book = book();
    let options = SuggestOptions::default();
    let matches = Suggester::new(&book)
        .with_options(options)
        .suggest("live horses");
    let report = SuggestReport::new("live horses", options, matches);

    assert_eq!(report.matches[0].code, "0101");
    let text = rendered(suggestion_table(&report));
    assert!(text.contains("0101"));
    assert!(text.contains("high"));
}

#[test]
fn lookup_report_has_full_ancestry() {
    let book = book();
    let report = LookupReport::build(&book, "010110");
    assert!(report.found);
    let codes: Vec<_> = report.ancestors.iter().map(|a| a.code.as_str()).collect();
    assert_eq!(codes, vec!["01", "0101"]);

    insta::assert_json_snapshot!(report, @r#"
    {
      "code": "010110",
      "found": true,
      "description": "Pure-bred breeding horses",
      "ancestors": [
        {
          "code": "01",
          "description": "Live animals"
        },
        {
          "code": "0101",
          "description": "Live horses"
        }
      ]
    }
    "#);

    let text = rendered(lookup_table(&report));
    assert!(text.contains("Live animals"));
    assert!(text.contains("Pure-bred breeding horses"));
}

#[test]
fn lookup_of_unknown_code_reports_error() {
    let book = book();
    let report = LookupReport::build(&book, "9999");
    assert!(!report.found);
    assert!(report.ancestors.is_empty());
    insta::assert_json_snapshot!(report, @r#"
    {
      "code": "9999",
      "found": false,
      "error": "HSN code not found in database",
      "ancestors": []
    }
    "#);
}

#[test]
fn stats_from_csv_file_include_fingerprint() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(TABLE.as_bytes()).unwrap();

    let book = CodeBook::from_loader(&CsvTableLoader::new(file.path())).unwrap();
    let report = StatsReport::build(&book);

    assert_eq!(report.stats.codes, 4);
    assert_eq!(report.stats.distinct_descriptions, 3);
    assert_eq!(report.stats.sample_code.as_deref(), Some("01"));
    let source = report.source.as_ref().unwrap();
    assert_eq!(source.rows_read, 5);
    assert_eq!(source.rows_skipped, 1);
    assert_eq!(source.sha256.as_ref().map(String::len), Some(64));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["codes"], 4);
    assert_eq!(json["source"]["code_column"], "HSNCode");

    let text = rendered(stats_table(&report));
    assert!(text.contains("SHA-256"));
    assert!(text.contains("Distinct descriptions"));
}

#[test]
fn config_file_drives_table_layout() {
    let dir = tempfile::tempdir().unwrap();
    let table_path = dir.path().join("codes.csv");
    std::fs::write(&table_path, "Code (HS),Item\n0101,Live horses\n").unwrap();
    let config_path = dir.path().join("hsn.toml");
    std::fs::write(
        &config_path,
        format!(
            "[table]\npath = {:?}\ncode_column = \"code\"\ndescription_column = \"item\"\n\n\
             [suggest]\nlimit = 1\n",
            table_path.display().to_string()
        ),
    )
    .unwrap();

    let config = AppConfig::discover(Some(&config_path)).unwrap();
    assert_eq!(config.suggest.limit, 1);
    let path = config.table.path.clone().unwrap();
    let loader = CsvTableLoader::new(path).with_layout(config.table.layout());
    let book = CodeBook::from_loader(&loader).unwrap();
    assert_eq!(book.description("0101"), Some("Live horses"));
}

#[test]
fn missing_config_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let error = AppConfig::discover(Some(&dir.path().join("absent.toml"))).unwrap_err();
    assert!(format!("{error:#}").contains("absent.toml"));
}
