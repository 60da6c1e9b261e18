//! ContextGen - Market Context Commentary Generator
//!
//! Generates the Market Context section of quarterly portfolio commentaries
//! by driving an LLM through a bounded quality-improvement loop: generate a
//! draft, have the model review and score it, gather the data the review
//! flagged as missing, and regenerate until the score clears a threshold or
//! the iteration cap is reached. The best-scoring draft wins.
//!
//! # Core Concepts
//!
//! - **Jobs**: every generation request is tracked as a job with guarded
//!   status transitions (see the `jobstore` crate)
//! - **Quality Loop**: generate -> review -> gather -> regenerate, strictly
//!   sequential, with per-step error recovery
//! - **Best-of Selection**: the returned commentary is the iteration with
//!   the highest parsed score, not the most recent one
//!
//! # Modules
//!
//! - [`llm`] - LLM client trait with OpenAI and Anthropic implementations
//! - [`prompts`] - prompt templates and rendering
//! - [`quality`] - the quality loop engine and review parser
//! - [`runner`] - glue between the job registry and the engine
//! - [`config`] - configuration types and loading
//! - [`cli`] - command-line interface

pub mod cli;
pub mod config;
pub mod export;
pub mod llm;
pub mod prompts;
pub mod quality;
pub mod report;
pub mod runner;

// Re-export commonly used types
pub use config::{Config, ExportConfig, LlmConfig};
pub use llm::{AnthropicClient, ChatRequest, ChatResponse, LlmClient, LlmError, OpenAiClient, create_client};
pub use quality::{LoopOutcome, LoopReport, QualityConfig, QualityEngine, Review, ReviewParse};
pub use runner::{RunReport, Runner};
