pub mod config;
pub mod errors;
pub mod results;
pub mod search;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use results::{ResultKind, ResultMessage, SearchSummary, WalkStats, WorkerOutcome};
pub use search::run_search;
