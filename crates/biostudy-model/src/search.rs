use serde::{Deserialize, Serialize};

/// A corpus row matched by a query. Recomputed per query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchHit {
    pub row_index: usize,
    pub matched_in_text: bool,
    pub matched_in_image: bool,
}

impl SearchHit {
    /// 1-indexed page number for display.
    pub fn page(&self) -> usize {
        self.row_index + 1
    }
}
