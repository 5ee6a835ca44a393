//! Revision report export.

use biostudy_core::{KnowledgeRow, ReportCollector, ReportEntry};

#[test]
fn test_export_snapshot() {
    let mut report = ReportCollector::new();
    report.add(ReportEntry::from_row(
        &KnowledgeRow::new("PCR", "amplifies DNA").with_points("Denature at 95C\nAnneal primers"),
    ));
    report.add(ReportEntry::new("CRISPR", "gene editing"));

    insta::assert_snapshot!(report.export(), @r"
    BIOTECH STUDY REPORT
    ====================

    TOPIC: PCR
    amplifies DNA
    - Denature at 95C
    - Anneal primers
    ----------------------------------------

    TOPIC: CRISPR
    gene editing
    ----------------------------------------
    ");
}

#[test]
fn test_repeated_adds_are_not_deduplicated() {
    let mut report = ReportCollector::new();
    report.add(ReportEntry::new("X", "Y"));
    report.add(ReportEntry::new("X", "Y"));

    let export = report.export();
    assert_eq!(export.matches("TOPIC: X").count(), 2);

    report.clear();
    assert_eq!(report.export().matches("TOPIC:").count(), 0);
}
