pub mod dialog;
pub mod index;
pub mod service;

pub use dialog::{DialogState, Key, KeyPress, SearchDialog, DEBOUNCE_DELAY};
pub use index::{build_index_records, IndexHit, IndexRecord, SearchIndex, StaticSearchIndex};
pub use service::{FileIndexLoader, IndexLoader, ResultType, SearchResult, SearchService, MAX_SEARCH_RESULTS};
