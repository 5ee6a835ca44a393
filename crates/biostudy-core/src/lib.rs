//! Study session core.
//!
//! The pieces here operate on an already loaded [`Corpus`] and hold all
//! session state explicitly:
//!
//! - [`Navigator`]: bounded page position
//! - [`SearchIndex`] and [`ImageTextCache`]: substring search over text
//!   fields and text recognized from diagram images
//! - [`ReportCollector`]: user-curated flat-text revision report
//! - [`MasteryTracker`]: which topics the student has mastered
//! - [`StudySession`]: the above bundled for a single action handler

pub mod mastery;
pub mod navigator;
pub mod report;
pub mod search;
pub mod session;

pub use biostudy_model::{
    Corpus, CorpusOrigin, KnowledgeRow, NavigationError, RecognitionError, ReportEntry, SearchHit,
};
pub use mastery::MasteryTracker;
pub use navigator::Navigator;
pub use report::{REPORT_SEPARATOR, ReportCollector};
pub use search::{
    AssetProbe, FsAssetProbe, ImagePolicy, ImageTextCache, NoRecognizer, SearchField,
    SearchIndex, SearchOptions, SearchOutcome, TextRecognizer, run_search, search,
};
pub use session::StudySession;
