//! Prompting, upstream calls and output interpretation.

pub mod analysis;
pub mod completion;
pub mod metrics;
pub mod prompts;
pub mod providers;

pub use analysis::{parse_analysis, AnalysisOutcome};
pub use completion::request_completion;
pub use providers::{ChatProvider, ProviderError};
