//! Insight summarizer (verb module)
//!
//! Execution summary → one natural-language sentence for the user.

mod summarize;

pub use summarize::{InsightSummarizer, Locale, SummarizerConfig};
