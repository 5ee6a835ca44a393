//! Session state for a single action-handling context.

use std::sync::Arc;

use biostudy_model::{Corpus, KnowledgeRow, NavigationError, ReportEntry, SearchHit};

use crate::mastery::MasteryTracker;
use crate::navigator::Navigator;
use crate::report::ReportCollector;

/// Everything a study session mutates, owned in one place.
///
/// Each action runs to completion through `&mut self`; nothing here is
/// shared across threads.
#[derive(Debug, Clone)]
pub struct StudySession {
    corpus: Arc<Corpus>,
    navigator: Navigator,
    report: ReportCollector,
    mastery: MasteryTracker,
}

impl StudySession {
    pub fn new(corpus: Arc<Corpus>) -> Self {
        Self::with_report(corpus, ReportCollector::new())
    }

    pub fn with_report(corpus: Arc<Corpus>, report: ReportCollector) -> Self {
        Self {
            corpus,
            navigator: Navigator::new(),
            report,
            mastery: MasteryTracker::new(),
        }
    }

    pub fn corpus(&self) -> &Arc<Corpus> {
        &self.corpus
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    pub fn report(&self) -> &ReportCollector {
        &self.report
    }

    pub fn report_mut(&mut self) -> &mut ReportCollector {
        &mut self.report
    }

    pub fn mastery(&self) -> &MasteryTracker {
        &self.mastery
    }

    pub fn current(&mut self) -> &KnowledgeRow {
        self.navigator.current(&self.corpus)
    }

    pub fn page_label(&self) -> String {
        self.navigator.page_label(&self.corpus)
    }

    pub fn next(&mut self) -> bool {
        self.navigator.next(&self.corpus)
    }

    pub fn previous(&mut self) -> bool {
        self.navigator.previous()
    }

    pub fn jump_to(&mut self, index: usize) -> Result<(), NavigationError> {
        self.navigator.jump_to(&self.corpus, index)
    }

    pub fn jump_to_page(&mut self, page: usize) -> Result<(), NavigationError> {
        self.navigator.jump_to_page(&self.corpus, page)
    }

    /// Opens the row a search hit points at.
    pub fn select_hit(&mut self, hit: &SearchHit) -> Result<(), NavigationError> {
        self.jump_to(hit.row_index)
    }

    /// Appends the current row to the report and returns the new entry.
    pub fn add_current_to_report(&mut self) -> ReportEntry {
        let entry = ReportEntry::from_row(self.navigator.current(&self.corpus));
        self.report.add(entry.clone());
        entry
    }

    /// Toggles mastery of the current row; returns the new state.
    pub fn toggle_current_mastery(&mut self) -> bool {
        self.navigator.clamp(&self.corpus);
        if self.corpus.is_empty() {
            return false;
        }
        self.mastery.toggle(self.navigator.current_index())
    }

    pub fn mastery_percent(&self) -> u8 {
        self.mastery.percent(self.corpus.len())
    }

    /// Swaps in a reloaded corpus, keeping the position where possible.
    pub fn replace_corpus(&mut self, corpus: Arc<Corpus>) {
        self.corpus = corpus;
        self.navigator.clamp(&self.corpus);
        self.mastery.retain_within(self.corpus.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(topics: &[&str]) -> Arc<Corpus> {
        Arc::new(Corpus::new(
            topics
                .iter()
                .map(|topic| KnowledgeRow::new(*topic, format!("{topic} notes")))
                .collect(),
            "test",
        ))
    }

    #[test]
    fn test_select_hit_and_add_to_report() {
        let mut session = StudySession::new(corpus(&["PCR", "CRISPR"]));
        let hit = SearchHit {
            row_index: 1,
            matched_in_text: true,
            matched_in_image: false,
        };
        session.select_hit(&hit).unwrap();
        let entry = session.add_current_to_report();
        assert_eq!(entry.topic, "CRISPR");
        assert_eq!(session.report().len(), 1);
        assert_eq!(session.page_label(), "Page 2 of 2");
    }

    #[test]
    fn test_stale_hit_after_reload_is_rejected() {
        let mut session = StudySession::new(corpus(&["PCR", "CRISPR", "ELISA"]));
        let stale = SearchHit {
            row_index: 2,
            matched_in_text: true,
            matched_in_image: false,
        };
        session.replace_corpus(corpus(&["PCR"]));
        assert!(session.select_hit(&stale).is_err());
        assert_eq!(session.current().topic, "PCR");
    }

    #[test]
    fn test_replace_corpus_clamps_and_trims_mastery() {
        let mut session = StudySession::new(corpus(&["A", "B", "C"]));
        session.jump_to(2).unwrap();
        assert!(session.toggle_current_mastery());
        session.jump_to(0).unwrap();
        session.toggle_current_mastery();
        session.jump_to(2).unwrap();

        session.replace_corpus(corpus(&["A", "B"]));
        assert_eq!(session.navigator().current_index(), 1);
        assert_eq!(session.mastery().count(), 1);
        assert_eq!(session.mastery_percent(), 50);
    }

    #[test]
    fn test_mastery_on_empty_corpus() {
        let mut session = StudySession::new(corpus(&[]));
        assert!(!session.toggle_current_mastery());
        assert_eq!(session.mastery_percent(), 0);
    }
}
