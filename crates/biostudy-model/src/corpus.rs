//! The ordered topic collection.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::row::KnowledgeRow;

/// Guidance shown when no usable knowledge base could be loaded.
pub const PLACEHOLDER_TOPIC: &str = "Knowledge base not available";

const PLACEHOLDER_GUIDANCE: &str = "Add a CSV or JSON knowledge base with at least a 'Topic' \
     column (optional: Section, Explanation, Detailed Explanation, 10 Points, Image) and \
     point the source path at it.";

static EMPTY_CORPUS_ROW: LazyLock<KnowledgeRow> = LazyLock::new(|| {
    KnowledgeRow::new("No topics yet", "The knowledge base loaded but contains no topics.")
});

/// Where a corpus came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CorpusOrigin {
    /// Parsed from a real source.
    Source { description: String },
    /// Substituted because the source was missing or malformed.
    Placeholder { reason: String },
}

/// Ordered knowledge rows. Row N is page N + 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corpus {
    rows: Vec<KnowledgeRow>,
    origin: CorpusOrigin,
}

impl Corpus {
    pub fn new(rows: Vec<KnowledgeRow>, description: impl Into<String>) -> Self {
        Self {
            rows,
            origin: CorpusOrigin::Source {
                description: description.into(),
            },
        }
    }

    /// One-row corpus carrying guidance text instead of topics.
    pub fn placeholder(reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let row = KnowledgeRow::new(PLACEHOLDER_TOPIC, PLACEHOLDER_GUIDANCE)
            .with_detailed_explanation(reason.clone());
        Self {
            rows: vec![row],
            origin: CorpusOrigin::Placeholder { reason },
        }
    }

    /// Row displayed when the corpus has no rows at all. Lives for `'static`,
    /// so it fits any borrow of a corpus.
    pub fn placeholder_row<'a>() -> &'a KnowledgeRow {
        &EMPTY_CORPUS_ROW
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&KnowledgeRow> {
        self.rows.get(index)
    }

    pub fn rows(&self) -> &[KnowledgeRow] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KnowledgeRow> {
        self.rows.iter()
    }

    pub fn origin(&self) -> &CorpusOrigin {
        &self.origin
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.origin, CorpusOrigin::Placeholder { .. })
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a KnowledgeRow;
    type IntoIter = std::slice::Iter<'a, KnowledgeRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_has_single_guidance_row() {
        let corpus = Corpus::placeholder("file not found: kb.csv");
        assert_eq!(corpus.len(), 1);
        assert!(corpus.is_placeholder());
        let row = corpus.get(0).unwrap();
        assert_eq!(row.topic, PLACEHOLDER_TOPIC);
        assert!(row.detailed_explanation.contains("kb.csv"));
    }

    #[test]
    fn test_empty_corpus_is_valid() {
        let corpus = Corpus::new(Vec::new(), "empty.csv");
        assert!(corpus.is_empty());
        assert!(!corpus.is_placeholder());
        assert!(corpus.get(0).is_none());
    }
}
