//! Generation configuration
//!
//! Tunable generation policies, the difficulty scalar, and their errors.

mod difficulty;
pub mod errors;
pub mod options;

pub use difficulty::Difficulty;
pub use errors::ConfigError;
pub use options::GenerationOptions;
