//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod test_dependencies;
pub mod traits;

/// Model used for attribute extraction and catalog matching.
pub const GEMINI_FLASH: &str = "gemini-2.0-flash";

pub use ai::GeminiClient;
pub use test_dependencies::MockAI;
pub use traits::*;
