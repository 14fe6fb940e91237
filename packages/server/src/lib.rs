// SHL Assessment Recommender - API Core
//
// Maintains a cached catalog of assessment products scraped from the
// SHL site and matches free-text job descriptions against it via an
// LLM oracle.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
