pub mod corpus;
pub mod error;
pub mod report;
pub mod row;
pub mod search;

pub use corpus::{Corpus, CorpusOrigin};
pub use error::{NavigationError, RecognitionError};
pub use report::ReportEntry;
pub use row::{KnowledgeRow, split_points};
pub use search::SearchHit;
