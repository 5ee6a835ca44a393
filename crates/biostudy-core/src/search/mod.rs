//! Text and diagram search over the corpus.

mod cache;
mod index;

pub use cache::{AssetProbe, FsAssetProbe, ImageTextCache, NoRecognizer, TextRecognizer};
pub use index::{
    ImagePolicy, SearchField, SearchIndex, SearchOptions, SearchOutcome, run_search, search,
};
