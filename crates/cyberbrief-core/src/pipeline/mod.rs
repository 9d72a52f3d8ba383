pub mod categorize;
pub mod recency;
pub mod relevance;
pub mod score;

pub use categorize::Categorizer;
pub use recency::{DateFallback, RecencyFilter};
pub use relevance::RelevanceFilter;
pub use score::PriorityScorer;
