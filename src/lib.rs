//! Fact-check pipeline: turns a closed question into a trust-annotated,
//! render-ready verdict.

pub mod conclusion;
pub mod config;
pub mod error;
pub mod export;
pub mod llm;
pub mod markup;
pub mod pipeline;
pub mod prompts;
pub mod question;
pub mod search;
pub mod server;
pub mod sink;
pub mod trust;
pub mod types;
pub mod verdict;

pub use pipeline::{Outcome, Pipeline, PipelineSettings, PipelineState, Report};
pub use types::*;
