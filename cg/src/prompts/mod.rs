//! Prompt templates and rendering
//!
//! All prompts the quality loop sends to the LLM live here, either as
//! embedded constants or as `.pmt` override files on disk.

pub mod embedded;
pub mod loader;

pub use loader::{
    CommentaryContext, GathererContext, PromptLoader, ResearchContext, ReviewContext, SystemContext,
};
