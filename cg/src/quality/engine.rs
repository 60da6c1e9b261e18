//! QualityEngine - drives the generate/review/gather quality loop
//!
//! One run walks RESEARCH -> GENERATE -> REVIEW and either accepts the
//! draft (score at or above threshold, or cap reached) or gathers the data
//! the review flagged as missing and regenerates. Steps run strictly
//! sequentially; a failing step degrades the inputs of the next step but
//! never aborts the loop.

use std::sync::Arc;

use tracing::{debug, info, warn};

use jobstore::{ContextRequest, IterationRecord};

use crate::llm::{ChatRequest, LlmClient, Message};
use crate::prompts::{CommentaryContext, GathererContext, PromptLoader, ResearchContext, ReviewContext, SystemContext};

use super::QualityConfig;
use super::review::{ReviewParse, parse_review};

/// Terminal result of a quality loop run
#[derive(Debug, Clone, PartialEq)]
pub enum LoopOutcome {
    /// A draft was accepted; score is absent when no iteration's review
    /// carried a parseable score
    Accepted { text: String, score: Option<f64> },

    /// No iteration produced usable commentary text
    NoUsableOutput { reason: String },
}

/// Everything a run produced: the outcome plus the full iteration history
#[derive(Debug, Clone)]
pub struct LoopReport {
    pub iterations: Vec<IterationRecord>,
    pub outcome: LoopOutcome,
}

/// Quality loop execution engine
pub struct QualityEngine {
    /// LLM client
    llm: Arc<dyn LlmClient>,

    /// Prompt templates
    prompts: PromptLoader,

    /// Loop configuration
    config: QualityConfig,

    /// Max tokens per generation call
    max_tokens: u32,

    /// Sampling temperature
    temperature: f32,
}

impl QualityEngine {
    /// Create a new engine with default generation options
    pub fn new(llm: Arc<dyn LlmClient>, prompts: PromptLoader, config: QualityConfig) -> Self {
        debug!(threshold = config.threshold, max_iterations = config.max_iterations, "QualityEngine::new: called");
        Self {
            llm,
            prompts,
            config,
            max_tokens: 1500,
            temperature: 0.7,
        }
    }

    /// Set the generation options passed on every LLM call
    pub fn with_generation_options(mut self, max_tokens: u32, temperature: f32) -> Self {
        debug!(max_tokens, temperature, "with_generation_options: called");
        self.max_tokens = max_tokens;
        self.temperature = temperature;
        self
    }

    /// Run the quality loop for one request
    ///
    /// Returns a report with the full iteration history; the outcome is the
    /// best-scoring iteration's text (best-of selection, not last).
    pub async fn run(&self, request: &ContextRequest) -> eyre::Result<LoopReport> {
        debug!(label = %request.label(), "run: called");
        info!(
            "Starting quality loop for {} (threshold: {}, max_iterations: {})",
            request.label(),
            self.config.threshold,
            self.config.max_iterations
        );

        // RESEARCH: canned market research summary, rendered once
        let research = self.prompts.render(
            "research",
            &ResearchContext {
                quarter: request.quarter.to_string(),
                year: request.year,
            },
        )?;
        debug!(research_len = research.len(), "run: rendered research summary");

        let system_prompt = self.prompts.render(
            "system",
            &SystemContext {
                word_count: self.config.word_count,
            },
        )?;

        let mut iterations: Vec<IterationRecord> = Vec::new();
        let mut additional_data = String::new();
        let mut feedback = String::new();

        for index in 1..=self.config.max_iterations {
            debug!(index, max = self.config.max_iterations, "run: iteration start");

            // GENERATE
            let mut ctx = CommentaryContext::initial(request, research.clone(), self.config.word_count);
            ctx.additional_data = additional_data.clone();
            ctx.feedback = feedback.clone();
            let prompt = self.prompts.render("commentary", &ctx)?;

            let record = match self.complete(&system_prompt, prompt).await {
                Ok(Some(text)) => {
                    debug!(index, text_len = text.len(), "run: generation succeeded");
                    IterationRecord::generated(index, text)
                }
                Ok(None) => {
                    warn!(index, "Generation returned no content");
                    IterationRecord::failed(index, "model returned an empty response")
                }
                Err(e) => {
                    warn!(index, error = %e, "Generation step failed");
                    IterationRecord::failed(index, e.to_string())
                }
            };

            // A failed generation ends this iteration; the loop continues
            // with whatever feedback and data it already has
            if !record.has_usable_text() {
                iterations.push(record);
                continue;
            }
            let text = record.text.clone().unwrap_or_default();

            // REVIEW
            let record = self.review(request, record, &text).await?;
            let score = record.score;
            let missing = record.missing_data.clone();
            if let Some(fb) = &record.feedback {
                feedback = fb.clone();
            }
            iterations.push(record);

            // ACCEPT on threshold
            if let Some(score) = score
                && score >= self.config.threshold
            {
                info!(index, score, "Quality threshold reached, accepting draft");
                break;
            }

            // Cap reached; fall through to best-of selection
            if index == self.config.max_iterations {
                info!(index, "Iteration cap reached, accepting best draft");
                break;
            }

            // GATHER: fold the missing data into the next generation
            if !missing.is_empty() {
                match self.gather(request, &missing, &feedback, &text).await {
                    Ok(Some(data)) => {
                        debug!(index, data_len = data.len(), "run: gathered additional data");
                        additional_data = data;
                    }
                    Ok(None) => {
                        warn!(index, "Data gatherer returned no content");
                    }
                    Err(e) => {
                        // Degraded input: the next generation reuses
                        // whatever data was gathered before
                        warn!(index, error = %e, "Data gathering step failed");
                    }
                }
            }
        }

        let outcome = select_best(&iterations);
        match &outcome {
            LoopOutcome::Accepted { score, .. } => {
                info!(iterations = iterations.len(), ?score, "Quality loop finished");
            }
            LoopOutcome::NoUsableOutput { reason } => {
                warn!(iterations = iterations.len(), %reason, "Quality loop produced no usable output");
            }
        }

        Ok(LoopReport { iterations, outcome })
    }

    /// REVIEW step: score the draft and extract feedback + missing data
    ///
    /// Transport errors and malformed review output both leave the score
    /// absent; neither aborts the loop.
    async fn review(
        &self,
        request: &ContextRequest,
        record: IterationRecord,
        commentary: &str,
    ) -> eyre::Result<IterationRecord> {
        debug!(index = record.index, "review: called");
        let prompt = self.prompts.render(
            "review",
            &ReviewContext {
                strategy_name: request.strategy_name.clone(),
                commentary: commentary.to_string(),
            },
        )?;

        let output = match self.complete("", prompt).await {
            Ok(Some(output)) => output,
            Ok(None) => {
                warn!(index = record.index, "Review returned no content, score absent");
                return Ok(record);
            }
            Err(e) => {
                warn!(index = record.index, error = %e, "Review step failed, score absent");
                return Ok(record);
            }
        };

        match parse_review(&output) {
            ReviewParse::Parsed(review) => {
                debug!(index = record.index, score = review.score, "review: parsed");
                let mut record = record.with_score(review.score).with_missing_data(review.missing_data);
                if let Some(feedback) = review.feedback {
                    record = record.with_feedback(feedback);
                }
                Ok(record)
            }
            ReviewParse::Malformed { reason } => {
                warn!(index = record.index, %reason, "Review output malformed, score absent");
                Ok(record)
            }
        }
    }

    /// GATHER step: ask the model to answer the missing-data prompts
    async fn gather(
        &self,
        request: &ContextRequest,
        missing: &[String],
        feedback: &str,
        commentary: &str,
    ) -> eyre::Result<Option<String>> {
        debug!(prompt_count = missing.len(), "gather: called");
        let prompt = self.prompts.render(
            "gatherer",
            &GathererContext {
                missing_data_prompts: missing.join(" "),
                quality_feedback: feedback.to_string(),
                commentary: commentary.to_string(),
                strategy_name: request.strategy_name.clone(),
                quarter: request.quarter.to_string(),
                year: request.year,
                benchmark: request.benchmark.clone(),
            },
        )?;

        match self.complete("", prompt).await {
            Ok(content) => Ok(content),
            Err(e) => Err(eyre::eyre!(e)),
        }
    }

    /// One LLM call with this engine's generation options
    async fn complete(&self, system_prompt: &str, user_prompt: String) -> Result<Option<String>, crate::llm::LlmError> {
        let request = ChatRequest {
            system_prompt: system_prompt.to_string(),
            messages: vec![Message::user(user_prompt)],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };
        let response = self.llm.complete(request).await?;
        Ok(response.content.filter(|c| !c.trim().is_empty()))
    }
}

/// Best-of selection: an explicit fold over the iteration history
///
/// Scored iterations beat unscored ones no matter how low the score; among
/// scored iterations the maximum wins. With text but no scores anywhere,
/// the latest usable draft is accepted with score absent.
fn select_best(iterations: &[IterationRecord]) -> LoopOutcome {
    let best = iterations
        .iter()
        .filter(|it| it.has_usable_text() && it.score.is_some())
        .max_by(|a, b| {
            a.score
                .partial_cmp(&b.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

    if let Some(it) = best {
        return LoopOutcome::Accepted {
            text: it.text.clone().unwrap_or_default(),
            score: it.score,
        };
    }

    if let Some(it) = iterations.iter().rev().find(|it| it.has_usable_text()) {
        return LoopOutcome::Accepted {
            text: it.text.clone().unwrap_or_default(),
            score: None,
        };
    }

    let last_error = iterations
        .iter()
        .rev()
        .find_map(|it| it.generation_error.clone())
        .unwrap_or_else(|| "no iterations were executed".to_string());

    LoopOutcome::NoUsableOutput {
        reason: format!(
            "no usable commentary after {} iteration(s): {}",
            iterations.len(),
            last_error
        ),
    }
}
