//! Quality loop configuration

use serde::{Deserialize, Serialize};

/// Configuration for the quality-improvement loop
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// Score (0-10) at which a draft is accepted without further iteration
    pub threshold: f64,

    /// Maximum generate/review cycles before accepting the best draft
    #[serde(rename = "max-iterations")]
    pub max_iterations: u32,

    /// Target commentary length in words
    #[serde(rename = "word-count")]
    pub word_count: usize,
}

fn default_threshold() -> f64 {
    9.0
}

fn default_max_iterations() -> u32 {
    5
}

fn default_word_count() -> usize {
    400
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            threshold: default_threshold(),
            max_iterations: default_max_iterations(),
            word_count: default_word_count(),
        }
    }
}
