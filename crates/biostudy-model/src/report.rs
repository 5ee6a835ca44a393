use serde::{Deserialize, Serialize};

use crate::row::KnowledgeRow;

/// A topic the student added to their revision report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntry {
    pub topic: String,
    pub notes: String,
}

impl ReportEntry {
    pub fn new(topic: impl Into<String>, notes: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            notes: notes.into(),
        }
    }

    /// Builds notes from the explanation followed by the revision points.
    pub fn from_row(row: &KnowledgeRow) -> Self {
        let mut notes = row.explanation.trim().to_string();
        for point in &row.ten_points {
            if !notes.is_empty() {
                notes.push('\n');
            }
            notes.push_str("- ");
            notes.push_str(point);
        }
        Self::new(row.topic.clone(), notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_row_appends_points() {
        let row = KnowledgeRow::new("PCR", "amplifies DNA").with_points("Denature\nAnneal");
        let entry = ReportEntry::from_row(&row);
        assert_eq!(entry.topic, "PCR");
        assert_eq!(entry.notes, "amplifies DNA\n- Denature\n- Anneal");
    }

    #[test]
    fn test_from_row_without_explanation() {
        let row = KnowledgeRow::new("Gel", "").with_points("Agarose");
        assert_eq!(ReportEntry::from_row(&row).notes, "- Agarose");
    }
}
