//! Error types for knowledge-base ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Reasons a knowledge-base source could not be turned into a corpus.
///
/// [`KnowledgeStore::load`](crate::KnowledgeStore::load) absorbs all of these
/// and substitutes a placeholder corpus.
#[derive(Debug, Error)]
pub enum SourceError {
    // === File System Errors ===
    /// Source file does not exist.
    #[error("knowledge base not found: {path}")]
    NotFound { path: PathBuf },

    /// Failed to read the source file.
    #[error("failed to read knowledge base {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Parsing Errors ===
    /// Malformed CSV content.
    #[error("failed to parse CSV {path}: {message}")]
    Csv { path: PathBuf, message: String },

    /// Malformed JSON content or unexpected JSON shape.
    #[error("failed to parse JSON {path}: {message}")]
    Json { path: PathBuf, message: String },

    /// File type that cannot be read as text (a spreadsheet workbook, for example).
    #[error("unsupported knowledge base format '.{extension}' for {path}; export it as CSV or JSON")]
    UnsupportedFormat { path: PathBuf, extension: String },

    // === Schema Errors ===
    /// None of the accepted topic column names is present.
    #[error("no topic column in {source_name} (columns: {columns})")]
    MissingTopicColumn {
        source_name: String,
        columns: String,
    },
}

impl SourceError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path }
        } else {
            Self::Io { path, source }
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SourceError::NotFound {
            path: PathBuf::from("data/knowledge_base.csv"),
        };
        assert_eq!(
            err.to_string(),
            "knowledge base not found: data/knowledge_base.csv"
        );
    }

    #[test]
    fn test_io_not_found_maps_to_not_found() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = SourceError::io("kb.csv", io);
        assert!(matches!(err, SourceError::NotFound { .. }));

        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err = SourceError::io("kb.csv", io);
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
