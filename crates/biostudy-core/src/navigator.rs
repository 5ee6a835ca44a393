//! Bounded page navigation over a corpus.

use biostudy_model::{Corpus, KnowledgeRow, NavigationError};

/// Current position into the corpus.
///
/// Invariant: `current_index < max(1, corpus.len())` after every operation
/// that receives the corpus. `previous` and `next` are no-ops at the
/// boundaries and report whether they moved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Navigator {
    current_index: usize,
}

impl Navigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Back to the first page (used on explicit reload).
    pub fn reset(&mut self) {
        self.current_index = 0;
    }

    /// Pulls the index back inside the corpus after it shrank.
    pub fn clamp(&mut self, corpus: &Corpus) {
        let last = corpus.len().saturating_sub(1);
        if self.current_index > last {
            tracing::debug!(
                from = self.current_index,
                to = last,
                "clamping navigator to corpus"
            );
            self.current_index = last;
        }
    }

    /// Row under the cursor, clamping first. An empty corpus yields the
    /// static placeholder row.
    pub fn current<'a>(&mut self, corpus: &'a Corpus) -> &'a KnowledgeRow {
        self.clamp(corpus);
        corpus
            .get(self.current_index)
            .unwrap_or_else(Corpus::placeholder_row)
    }

    pub fn can_go_previous(&self) -> bool {
        self.current_index > 0
    }

    pub fn can_go_next(&self, corpus: &Corpus) -> bool {
        self.current_index + 1 < corpus.len()
    }

    /// Moves one page back. Returns `false` at the first page.
    pub fn previous(&mut self) -> bool {
        if self.current_index == 0 {
            return false;
        }
        self.current_index -= 1;
        true
    }

    /// Moves one page forward. Returns `false` at the last page.
    pub fn next(&mut self, corpus: &Corpus) -> bool {
        self.clamp(corpus);
        if !self.can_go_next(corpus) {
            return false;
        }
        self.current_index += 1;
        true
    }

    /// Jumps to a 0-indexed row. Out-of-range leaves the position unchanged.
    pub fn jump_to(&mut self, corpus: &Corpus, index: usize) -> Result<(), NavigationError> {
        if index >= corpus.len() {
            return Err(NavigationError::OutOfRange {
                index,
                len: corpus.len(),
            });
        }
        self.current_index = index;
        Ok(())
    }

    /// Jumps to a 1-indexed page as shown to the user.
    pub fn jump_to_page(&mut self, corpus: &Corpus, page: usize) -> Result<(), NavigationError> {
        if page == 0 || page > corpus.len() {
            return Err(NavigationError::PageOutOfRange {
                page,
                pages: corpus.len(),
            });
        }
        self.jump_to(corpus, page - 1)
    }

    /// "Page 3 of 10"; "Page 0 of 0" for an empty corpus.
    pub fn page_label(&self, corpus: &Corpus) -> String {
        if corpus.is_empty() {
            return "Page 0 of 0".to_string();
        }
        let page = self.current_index.min(corpus.len() - 1) + 1;
        format!("Page {page} of {}", corpus.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus(n: usize) -> Corpus {
        let rows = (0..n)
            .map(|i| KnowledgeRow::new(format!("Topic {i}"), ""))
            .collect();
        Corpus::new(rows, "test")
    }

    #[test]
    fn test_previous_at_start_is_noop() {
        let mut nav = Navigator::new();
        assert!(!nav.previous());
        assert!(!nav.previous());
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_next_stops_at_last() {
        let c = corpus(3);
        let mut nav = Navigator::new();
        assert!(nav.next(&c));
        assert!(nav.next(&c));
        assert!(!nav.next(&c));
        assert!(!nav.next(&c));
        assert_eq!(nav.current_index(), 2);
        assert!(!nav.can_go_next(&c));
        assert!(nav.can_go_previous());
    }

    #[test]
    fn test_next_on_empty_corpus() {
        let c = corpus(0);
        let mut nav = Navigator::new();
        assert!(!nav.next(&c));
        assert_eq!(nav.current_index(), 0);
        assert_eq!(nav.current(&c), Corpus::placeholder_row());
        assert_eq!(nav.page_label(&c), "Page 0 of 0");
    }

    #[test]
    fn test_current_clamps_after_shrink() {
        let big = corpus(5);
        let small = corpus(2);
        let mut nav = Navigator::new();
        nav.jump_to(&big, 4).unwrap();
        assert_eq!(nav.current(&small).topic, "Topic 1");
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_jump_to_out_of_range_keeps_position() {
        let c = corpus(3);
        let mut nav = Navigator::new();
        nav.jump_to(&c, 1).unwrap();
        let err = nav.jump_to(&c, 3).unwrap_err();
        assert_eq!(err, NavigationError::OutOfRange { index: 3, len: 3 });
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_jump_to_page_is_one_indexed() {
        let c = corpus(3);
        let mut nav = Navigator::new();
        nav.jump_to_page(&c, 3).unwrap();
        assert_eq!(nav.current(&c).topic, "Topic 2");
        assert_eq!(
            nav.jump_to_page(&c, 0),
            Err(NavigationError::PageOutOfRange { page: 0, pages: 3 })
        );
        assert_eq!(
            nav.jump_to_page(&c, 4),
            Err(NavigationError::PageOutOfRange { page: 4, pages: 3 })
        );
        assert_eq!(nav.page_label(&c), "Page 3 of 3");
    }
}
