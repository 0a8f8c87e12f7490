//! Advisory adapter around a remote chat-completion service
//!
//! Builds prompts from computed figures, calls the service and turns its
//! free-form reply into structured values. The cost engine never depends on
//! anything in here.

pub mod client;
pub mod parse;
pub mod payload;
pub mod prompt;

pub use client::{AdvisorClient, AnalyzeResponse, PrefillResponse};
pub use parse::{AnalysisResult, FallbackSource, ParseOutcome, Verdict};
pub use payload::{AnalysisPayload, PrefillPayload, SuggestedInputs};
