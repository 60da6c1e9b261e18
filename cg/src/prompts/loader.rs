//! Prompt loader
//!
//! Loads prompt templates from files or falls back to embedded defaults.

use std::path::{Path, PathBuf};

use eyre::{Result, eyre};
use handlebars::Handlebars;
use serde::Serialize;
use tracing::debug;

use jobstore::ContextRequest;

use super::embedded;

/// Context for rendering the system prompt
#[derive(Debug, Clone, Serialize)]
pub struct SystemContext {
    pub word_count: usize,
}

/// Context for rendering the commentary generation prompt
#[derive(Debug, Clone, Serialize)]
pub struct CommentaryContext {
    pub strategy_name: String,
    pub quarter: String,
    pub year: i32,
    pub benchmark: String,
    pub market_research: String,
    /// Data gathered after a below-threshold review, empty on the first pass
    pub additional_data: String,
    /// Reviewer feedback from the previous iteration, empty on the first pass
    pub feedback: String,
    pub custom_instructions: String,
    pub word_count: usize,
}

impl CommentaryContext {
    /// First-pass context: research only, no gathered data or feedback yet
    pub fn initial(request: &ContextRequest, market_research: String, word_count: usize) -> Self {
        Self {
            strategy_name: request.strategy_name.clone(),
            quarter: request.quarter.to_string(),
            year: request.year,
            benchmark: request.benchmark.clone(),
            market_research,
            additional_data: String::new(),
            feedback: String::new(),
            custom_instructions: request.custom_instructions.clone().unwrap_or_default(),
            word_count,
        }
    }
}

/// Context for rendering the quality review prompt
#[derive(Debug, Clone, Serialize)]
pub struct ReviewContext {
    pub strategy_name: String,
    pub commentary: String,
}

/// Context for rendering the data gatherer prompt
#[derive(Debug, Clone, Serialize)]
pub struct GathererContext {
    pub missing_data_prompts: String,
    pub quality_feedback: String,
    pub commentary: String,
    pub strategy_name: String,
    pub quarter: String,
    pub year: i32,
    pub benchmark: String,
}

/// Context for rendering the market research summary
#[derive(Debug, Clone, Serialize)]
pub struct ResearchContext {
    pub quarter: String,
    pub year: i32,
}

/// Loads and renders prompt templates
pub struct PromptLoader {
    /// Handlebars template engine
    hbs: Handlebars<'static>,
    /// User override directory (e.g. `.contextgen/prompts/`)
    user_dir: Option<PathBuf>,
    /// Repo default directory (e.g. `prompts/`)
    repo_dir: Option<PathBuf>,
}

impl PromptLoader {
    /// Create a new prompt loader rooted at the given directory
    pub fn new(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        let user_dir = root.join(".contextgen/prompts");
        let repo_dir = root.join("prompts");

        let mut hbs = Handlebars::new();
        // Prompts are plain text, not HTML
        hbs.register_escape_fn(handlebars::no_escape);

        Self {
            hbs,
            user_dir: if user_dir.exists() { Some(user_dir) } else { None },
            repo_dir: if repo_dir.exists() { Some(repo_dir) } else { None },
        }
    }

    /// Create a loader that only uses embedded prompts
    pub fn embedded_only() -> Self {
        let mut hbs = Handlebars::new();
        hbs.register_escape_fn(handlebars::no_escape);

        Self {
            hbs,
            user_dir: None,
            repo_dir: None,
        }
    }

    /// Load a template by name
    ///
    /// Checks in order:
    /// 1. User override: `.contextgen/prompts/{name}.pmt`
    /// 2. Repo default: `prompts/{name}.pmt`
    /// 3. Embedded fallback
    fn load_template(&self, name: &str) -> Result<String> {
        if let Some(ref user_dir) = self.user_dir {
            let path = user_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from user override: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read user prompt {}: {}", path.display(), e));
            }
        }

        if let Some(ref repo_dir) = self.repo_dir {
            let path = repo_dir.join(format!("{}.pmt", name));
            if path.exists() {
                debug!("Loading prompt from repo: {:?}", path);
                return std::fs::read_to_string(&path)
                    .map_err(|e| eyre!("Failed to read repo prompt {}: {}", path.display(), e));
            }
        }

        if let Some(content) = embedded::get_embedded(name) {
            debug!("Using embedded prompt: {}", name);
            return Ok(content.to_string());
        }

        Err(eyre!("Prompt template not found: {}", name))
    }

    /// Render a template with the given context
    pub fn render<C: Serialize>(&self, template_name: &str, context: &C) -> Result<String> {
        let template = self.load_template(template_name)?;
        debug!(template_name, "render: called");

        self.hbs
            .render_template(&template, context)
            .map_err(|e| eyre!("Failed to render template {}: {}", template_name, e))
    }
}
