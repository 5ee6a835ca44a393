//! Knowledge-base ingestion.
//!
//! This crate turns a tabular source (CSV file, JSON file, or in-memory
//! records) into the canonical [`Corpus`](biostudy_model::Corpus) used by
//! the rest of the workspace.
//!
//! # Features
//!
//! - **Source reading**: CSV via the `csv` crate, JSON arrays of objects
//! - **Column aliases**: several accepted header names per canonical field,
//!   resolved once per load
//! - **Normalization**: trimmed headers, blank rows dropped, missing optional
//!   fields left empty
//! - **Memoization**: [`KnowledgeStore`] re-parses only when the source bytes
//!   change or a reload is forced
//!
//! # Example
//!
//! ```ignore
//! use biostudy_ingest::{KnowledgeStore, SourceDescriptor};
//!
//! let mut store = KnowledgeStore::new();
//! let source = SourceDescriptor::from_path("knowledge_base.csv");
//! let corpus = store.load(&source); // never fails; placeholder on error
//! println!("{} topics", corpus.len());
//! ```

mod aliases;
mod error;
mod source;
mod store;

// === Error Types ===
pub use error::{Result, SourceError};

// === Source Reading ===
pub use source::{RawRecord, SourceDescriptor, read_records};

// === Normalization ===
pub use aliases::{CanonicalField, ColumnMap, canonical_key, normalize};

// === Memoized Loading ===
pub use store::KnowledgeStore;
