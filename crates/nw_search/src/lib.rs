pub mod grouping;
pub mod orchestrator;
pub mod sample;

pub use grouping::{group_articles, group_articles_at};
pub use orchestrator::SearchOrchestrator;
