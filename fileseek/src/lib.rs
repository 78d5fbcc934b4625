pub mod config;
pub mod errors;
pub mod extract;
pub mod matcher;
pub mod results;
pub mod session;
mod walk;

pub use config::SearchConfig;
pub use errors::{SearchError, SearchResult};
pub use matcher::MatchMode;
pub use results::MatchRecord;
pub use session::{Poll, SearchSession};
