use std::fs;
use std::path::PathBuf;

use serde_json::json;

use expr_validator::{validate_file, validate_lines, ValidatorError};

fn temp_file(name: &str, contents: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("expr_validator_{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    let path = dir.join(name);
    fs::write(&path, contents).unwrap();
    path
}

#[test]
fn validate_lines_skips_blank_and_comment_lines() {
    let text = "1 == 2\n\n# disabled rule\n  # indented comment\nf(1,)\n";
    let reports = validate_lines(text);

    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].line, 1);
    assert!(reports[0].valid);
    assert_eq!(reports[1].line, 5);
    assert!(!reports[1].valid);
    assert_eq!(reports[1].column, Some(4));
    assert_eq!(
        reports[1].message.as_deref(),
        Some("parse error at [column 4]: unexpected \")\"")
    );
}

#[test]
fn lines_are_validated_as_written() {
    let reports = validate_lines("  TRUE\n");
    assert_eq!(reports.len(), 1);
    assert!(reports[0].valid);
    assert_eq!(reports[0].expression, "  TRUE");
}

#[test]
fn report_serializes_without_empty_fields() {
    let reports = validate_lines("f($A)\n(./p)\n");
    let value = serde_json::to_value(&reports).unwrap();
    assert_eq!(
        value,
        json!([
            {"line": 1, "expression": "f($A)", "valid": true},
            {
                "line": 2,
                "expression": "(./p)",
                "valid": false,
                "column": 1,
                "message": "parse error at [column 1]: unexpected path"
            }
        ])
    );
}

#[test]
fn validate_file_reads_rules_from_disk() {
    let path = temp_file("rules.txt", "# rules\nf(./a/b) AND $X == 1\nfoo(1, 'x', $VAR, TRUE)\n");
    let reports = validate_file(&path).unwrap();
    assert_eq!(reports.len(), 2);
    assert!(!reports[0].valid);
    assert!(reports[1].valid);
}

#[test]
fn validate_file_reports_missing_file_as_io_error() {
    let path = std::env::temp_dir().join("expr_validator_missing_rules.txt");
    let err = validate_file(&path).unwrap_err();
    assert!(matches!(err, ValidatorError::Io(_)));
    assert!(err.to_string().starts_with("io error:"));
}
