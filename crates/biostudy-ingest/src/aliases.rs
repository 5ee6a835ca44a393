//! Declarative column-alias table and row normalization.
//!
//! Sources name the same concept in several ways ("Topic", "title",
//! "Concept", ...). The alias table is consulted once per load to build a
//! [`ColumnMap`]; everything downstream sees canonical field names only.

use std::collections::BTreeSet;

use biostudy_model::{KnowledgeRow, split_points};

use crate::error::{Result, SourceError};
use crate::source::RawRecord;

/// Canonical knowledge-row fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CanonicalField {
    Topic,
    Section,
    Explanation,
    DetailedExplanation,
    TenPoints,
    ImagePath,
}

/// Accepted header names per field, in priority order, already in
/// [`canonical_key`] form.
const ALIASES: &[(CanonicalField, &[&str])] = &[
    (
        CanonicalField::Topic,
        &["topic", "title", "concept", "name", "heading"],
    ),
    (
        CanonicalField::Section,
        &["section", "chapter", "source", "reference", "book"],
    ),
    (
        CanonicalField::Explanation,
        &["explanation", "summary", "description", "short explanation"],
    ),
    (
        CanonicalField::DetailedExplanation,
        &[
            "detailed explanation",
            "details",
            "long explanation",
            "notes",
        ],
    ),
    (
        CanonicalField::TenPoints,
        &[
            "10 points",
            "ten points",
            "revision points",
            "key points",
            "points",
        ],
    ),
    (
        CanonicalField::ImagePath,
        &["image", "image path", "diagram", "diagram path", "figure"],
    ),
];

impl CanonicalField {
    pub fn aliases(self) -> &'static [&'static str] {
        ALIASES
            .iter()
            .find(|(field, _)| *field == self)
            .map(|(_, aliases)| *aliases)
            .unwrap_or(&[])
    }
}

/// Normalizes a header for alias comparison: trimmed, lower-cased,
/// `_` and `-` read as spaces, runs of whitespace collapsed.
pub fn canonical_key(header: &str) -> String {
    header
        .trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Source column chosen for each canonical field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnMap {
    pub topic: String,
    pub section: Option<String>,
    pub explanation: Option<String>,
    pub detailed_explanation: Option<String>,
    pub ten_points: Option<String>,
    pub image_path: Option<String>,
}

impl ColumnMap {
    /// Resolves the alias table against the given source column names.
    ///
    /// Returns `None` when no column is recognized as the topic.
    pub fn resolve<'a, I>(columns: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let columns: Vec<(&str, String)> = columns
            .into_iter()
            .map(|name| (name, canonical_key(name)))
            .collect();

        let find = |field: CanonicalField| -> Option<String> {
            field.aliases().iter().find_map(|alias| {
                columns
                    .iter()
                    .find(|(_, key)| key == alias)
                    .map(|(name, _)| (*name).to_string())
            })
        };

        Some(Self {
            topic: find(CanonicalField::Topic)?,
            section: find(CanonicalField::Section),
            explanation: find(CanonicalField::Explanation),
            detailed_explanation: find(CanonicalField::DetailedExplanation),
            ten_points: find(CanonicalField::TenPoints),
            image_path: find(CanonicalField::ImagePath),
        })
    }

    fn to_row(&self, record: &RawRecord) -> KnowledgeRow {
        let cell = |column: Option<&String>| -> String {
            column
                .and_then(|name| record.get(name))
                .map(|value| value.trim().to_string())
                .unwrap_or_default()
        };

        let mut row = KnowledgeRow::new(
            cell(Some(&self.topic)),
            cell(self.explanation.as_ref()),
        )
        .with_section(cell(self.section.as_ref()))
        .with_detailed_explanation(cell(self.detailed_explanation.as_ref()));
        row.ten_points = split_points(&cell(self.ten_points.as_ref()));
        row.with_image(cell(self.image_path.as_ref()))
    }
}

/// Converts raw records into canonical rows.
///
/// Rows blank across every source field are dropped. Fails only when no
/// topic column can be identified.
pub fn normalize(records: &[RawRecord], source_name: &str) -> Result<Vec<KnowledgeRow>> {
    let columns: BTreeSet<&str> = records
        .iter()
        .flat_map(|record| record.keys().map(String::as_str))
        .collect();

    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let map = ColumnMap::resolve(columns.iter().copied()).ok_or_else(|| {
        SourceError::MissingTopicColumn {
            source_name: source_name.to_string(),
            columns: columns.iter().copied().collect::<Vec<_>>().join(", "),
        }
    })?;

    let rows: Vec<KnowledgeRow> = records
        .iter()
        .filter(|record| record.values().any(|value| !value.trim().is_empty()))
        .map(|record| map.to_row(record))
        .collect();

    let dropped = records.len() - rows.len();
    if dropped > 0 {
        tracing::debug!(source = source_name, dropped, "dropped blank rows");
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> RawRecord {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_canonical_key() {
        assert_eq!(canonical_key("  Detailed_Explanation "), "detailed explanation");
        assert_eq!(canonical_key("Image-Path"), "image path");
        assert_eq!(canonical_key("10   Points"), "10 points");
    }

    #[test]
    fn test_resolve_aliases_case_insensitive() {
        let map = ColumnMap::resolve(["TITLE", "Summary", "Diagram_Path", "Key Points"]).unwrap();
        assert_eq!(map.topic, "TITLE");
        assert_eq!(map.explanation.as_deref(), Some("Summary"));
        assert_eq!(map.image_path.as_deref(), Some("Diagram_Path"));
        assert_eq!(map.ten_points.as_deref(), Some("Key Points"));
        assert_eq!(map.section, None);
    }

    #[test]
    fn test_resolve_prefers_earlier_alias() {
        let map = ColumnMap::resolve(["name", "Topic"]).unwrap();
        assert_eq!(map.topic, "Topic");
    }

    #[test]
    fn test_resolve_without_topic() {
        assert!(ColumnMap::resolve(["Explanation", "Image"]).is_none());
    }

    #[test]
    fn test_normalize_drops_blank_rows_and_fills_optionals() {
        let records = vec![
            record(&[("Topic", "PCR"), ("Explanation", "amplifies DNA")]),
            record(&[("Topic", " "), ("Explanation", "")]),
            record(&[("Topic", "CRISPR"), ("Explanation", "gene editing")]),
        ];
        let rows = normalize(&records, "kb.csv").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].topic, "CRISPR");
        assert_eq!(rows[0].section, "");
        assert_eq!(rows[0].detailed_explanation, "");
        assert!(rows[0].ten_points.is_empty());
        assert_eq!(rows[0].image_path, None);
    }

    #[test]
    fn test_normalize_splits_points_and_image() {
        let records = vec![record(&[
            ("Topic", "PCR"),
            ("10 Points", "Denature\n\nAnneal\n"),
            ("Image", " diagrams/pcr.png "),
        ])];
        let rows = normalize(&records, "kb.csv").unwrap();
        assert_eq!(rows[0].ten_points, vec!["Denature", "Anneal"]);
        assert_eq!(rows[0].image_path.as_deref(), Some("diagrams/pcr.png"));
    }

    #[test]
    fn test_normalize_missing_topic_column() {
        let records = vec![record(&[("Explanation", "amplifies DNA")])];
        let err = normalize(&records, "kb.csv").unwrap_err();
        assert!(matches!(err, SourceError::MissingTopicColumn { .. }));
        assert!(err.to_string().contains("Explanation"));
    }

    #[test]
    fn test_normalize_no_records() {
        assert!(normalize(&[], "kb.csv").unwrap().is_empty());
    }
}
