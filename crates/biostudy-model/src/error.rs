use std::path::PathBuf;

use thiserror::Error;

/// Raised when a caller positions the navigator outside the corpus.
///
/// This is a contract violation by the caller (for example a stale search
/// hit applied to a reloaded corpus) and is surfaced rather than clamped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("row {index} is out of range for a corpus of {len} rows")]
    OutOfRange { index: usize, len: usize },

    /// 1-indexed page outside `1..=pages`, as typed by the user.
    #[error("page {page} is out of range ({})", page_range(.pages))]
    PageOutOfRange { page: usize, pages: usize },
}

fn page_range(pages: &usize) -> String {
    match pages {
        0 => "no pages yet".to_string(),
        n => format!("1..={n}"),
    }
}

/// Failure inside an image text recognizer.
#[derive(Debug, Error)]
#[error("text recognition failed for {path}: {message}")]
pub struct RecognitionError {
    pub path: PathBuf,
    pub message: String,
}

impl RecognitionError {
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
