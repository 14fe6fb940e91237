//! Recommendation domain: query-to-catalog matching via the oracle.

pub mod engine;
pub mod parse;

pub use engine::{QueryInput, RecommendError, RecommendationEngine, MAX_RECOMMENDATIONS};
pub use parse::{parse_reply_ids, ParsedIds};
