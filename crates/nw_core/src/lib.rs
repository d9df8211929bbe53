pub mod error;
pub mod interval;
pub mod request;
pub mod types;

pub use error::Error;
pub use interval::IntervalUnit;
pub use request::{SearchQuery, SearchRequest};
pub use types::{Article, HealthStatus, IntervalBucket, IntervalGroups, SearchResult, Source};

pub type Result<T> = std::result::Result<T, Error>;
