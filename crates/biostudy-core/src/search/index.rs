//! Case-insensitive substring search across rows.

use std::borrow::Cow;

use biostudy_model::{Corpus, KnowledgeRow, SearchHit};
use serde::{Deserialize, Serialize};

use super::cache::ImageTextCache;

/// Row fields a query is matched against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchField {
    Topic,
    Section,
    Explanation,
    DetailedExplanation,
    TenPoints,
}

impl SearchField {
    fn text(self, row: &KnowledgeRow) -> Cow<'_, str> {
        match self {
            Self::Topic => Cow::Borrowed(&row.topic),
            Self::Section => Cow::Borrowed(&row.section),
            Self::Explanation => Cow::Borrowed(&row.explanation),
            Self::DetailedExplanation => Cow::Borrowed(&row.detailed_explanation),
            Self::TenPoints => Cow::Owned(row.ten_points.join("\n")),
        }
    }
}

/// When diagram text is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImagePolicy {
    /// Only for rows without a text match; recognition is the costly path.
    #[default]
    ShortCircuit,
    /// For every row with a diagram.
    Exhaustive,
    /// Never.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchOptions {
    pub fields: Vec<SearchField>,
    pub image_policy: ImagePolicy,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            fields: vec![SearchField::Topic, SearchField::Explanation],
            image_policy: ImagePolicy::ShortCircuit,
        }
    }
}

/// Result of a search as seen by a caller that renders it.
///
/// Keeps "nothing was asked" apart from "nothing matched".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    NoQuery,
    NoMatches,
    Matches(Vec<SearchHit>),
}

impl SearchOutcome {
    pub fn hits(&self) -> &[SearchHit] {
        match self {
            Self::Matches(hits) => hits,
            Self::NoQuery | Self::NoMatches => &[],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    options: SearchOptions,
}

impl SearchIndex {
    pub fn new(options: SearchOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &SearchOptions {
        &self.options
    }

    /// Rows matching `query`, in ascending row order.
    ///
    /// A blank query returns no hits and never touches the image cache.
    pub fn search(&self, corpus: &Corpus, query: &str, cache: &ImageTextCache) -> Vec<SearchHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for (row_index, row) in corpus.iter().enumerate() {
            let matched_in_text = self
                .options
                .fields
                .iter()
                .any(|field| field.text(row).to_lowercase().contains(&needle));

            let check_image = match self.options.image_policy {
                ImagePolicy::ShortCircuit => !matched_in_text,
                ImagePolicy::Exhaustive => true,
                ImagePolicy::Disabled => false,
            };
            let matched_in_image = check_image
                && row
                    .image_path
                    .as_deref()
                    .is_some_and(|path| cache.get_text(path).contains(&needle));

            tracing::trace!(
                row_index,
                matched_in_text,
                matched_in_image,
                consulted_image = check_image,
                "search row"
            );
            if matched_in_text || matched_in_image {
                hits.push(SearchHit {
                    row_index,
                    matched_in_text,
                    matched_in_image,
                });
            }
        }

        tracing::debug!(query = %needle, hits = hits.len(), "search finished");
        hits
    }

    pub fn run(&self, corpus: &Corpus, query: &str, cache: &ImageTextCache) -> SearchOutcome {
        if query.trim().is_empty() {
            return SearchOutcome::NoQuery;
        }
        let hits = self.search(corpus, query, cache);
        if hits.is_empty() {
            SearchOutcome::NoMatches
        } else {
            SearchOutcome::Matches(hits)
        }
    }
}

/// Searches topic and explanation with the short-circuit image policy.
pub fn search(corpus: &Corpus, query: &str, cache: &ImageTextCache) -> Vec<SearchHit> {
    SearchIndex::default().search(corpus, query, cache)
}

/// Like [`search`], classified for display.
pub fn run_search(corpus: &Corpus, query: &str, cache: &ImageTextCache) -> SearchOutcome {
    SearchIndex::default().run(corpus, query, cache)
}
