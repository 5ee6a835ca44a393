//! A single topic entry of the knowledge base.

use serde::{Deserialize, Serialize};

/// One topic of the corpus, already normalized to canonical field names.
///
/// Optional text fields are empty strings when the source omitted them;
/// missing-value markers never reach display code.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeRow {
    /// Display key. Not guaranteed unique across the corpus.
    pub topic: String,
    /// Citation label such as a textbook chapter.
    #[serde(default)]
    pub section: String,
    /// Short summary shown on the topic page.
    #[serde(default)]
    pub explanation: String,
    /// Expandable long-form text.
    #[serde(default)]
    pub detailed_explanation: String,
    /// Revision points, one per line in the source.
    #[serde(default)]
    pub ten_points: Vec<String>,
    /// Path to a diagram asset. The file may not exist.
    #[serde(default)]
    pub image_path: Option<String>,
}

impl KnowledgeRow {
    pub fn new(topic: impl Into<String>, explanation: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            explanation: explanation.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = section.into();
        self
    }

    #[must_use]
    pub fn with_detailed_explanation(mut self, text: impl Into<String>) -> Self {
        self.detailed_explanation = text.into();
        self
    }

    #[must_use]
    pub fn with_points(mut self, text: &str) -> Self {
        self.ten_points = split_points(text);
        self
    }

    /// Sets the diagram path; blank paths are stored as `None`.
    #[must_use]
    pub fn with_image(mut self, path: impl Into<String>) -> Self {
        let path = path.into();
        self.image_path = if path.trim().is_empty() {
            None
        } else {
            Some(path.trim().to_string())
        };
        self
    }

    /// True when every field is blank.
    pub fn is_blank(&self) -> bool {
        self.topic.trim().is_empty()
            && self.section.trim().is_empty()
            && self.explanation.trim().is_empty()
            && self.detailed_explanation.trim().is_empty()
            && self.ten_points.is_empty()
            && self.image_path.is_none()
    }
}

/// Splits newline-delimited revision points, dropping empty lines.
pub fn split_points(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_points_drops_blank_lines() {
        let points = split_points("Denaturation\n\n  Annealing  \r\nExtension\n");
        assert_eq!(points, vec!["Denaturation", "Annealing", "Extension"]);
    }

    #[test]
    fn test_with_image_blank_is_none() {
        let row = KnowledgeRow::new("PCR", "amplifies DNA").with_image("   ");
        assert_eq!(row.image_path, None);
    }

    #[test]
    fn test_is_blank() {
        assert!(KnowledgeRow::default().is_blank());
        assert!(!KnowledgeRow::default().with_image("a.png").is_blank());
        assert!(!KnowledgeRow::new("PCR", "").is_blank());
    }

    #[test]
    fn test_row_deserializes_with_missing_optionals() {
        let row: KnowledgeRow =
            serde_json::from_str(r#"{"topic":"CRISPR","explanation":"gene editing"}"#).unwrap();
        assert_eq!(row.topic, "CRISPR");
        assert_eq!(row.section, "");
        assert!(row.ten_points.is_empty());
        assert_eq!(row.image_path, None);
    }
}
