//! Integration tests for CSV and PDF exports written to disk.

use visionquest_core::export::{export_csv, export_pdf};
use visionquest_core::{AssessmentSimulator, PatientProfile, SessionLog};

#[test]
fn empty_log_exports_are_suppressed() {
    let dir = tempfile::tempdir().unwrap();
    let csv_path = dir.path().join("log.csv");
    let pdf_path = dir.path().join("report.pdf");
    let log = SessionLog::new();

    assert!(export_csv(&log, &csv_path).unwrap().is_none());
    assert!(export_pdf(&PatientProfile::default(), &log, &pdf_path).unwrap().is_none());
    assert!(!csv_path.exists());
    assert!(!pdf_path.exists());
}

#[test]
fn csv_export_writes_one_row_per_record() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("log.csv");
    let patient = PatientProfile::with_age("Noah", 11);
    let log = AssessmentSimulator::with_seed(5).fill_log(&patient, 6);

    let written = export_csv(&log, &path).unwrap();
    assert_eq!(written.as_deref(), Some(path.as_path()));

    let content = std::fs::read_to_string(&path).unwrap();
    assert_eq!(content.lines().count(), 7);
    assert!(content.lines().skip(1).all(|l| l.contains("Noah")));
}

#[test]
fn pdf_export_writes_a_pdf() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("report.pdf");
    let patient = PatientProfile::default();
    let log = AssessmentSimulator::with_seed(8).fill_log(&patient, 3);

    export_pdf(&patient, &log, &path).unwrap();
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF"));
}

#[test]
fn export_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("log.csv");
    let log = AssessmentSimulator::with_seed(1).fill_log(&PatientProfile::default(), 1);
    let err = export_csv(&log, &path).unwrap_err();
    assert!(err.to_string().contains("log.csv"));
}
