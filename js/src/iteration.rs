//! Iteration history records

use serde::{Deserialize, Serialize};

/// One generate+review cycle within a job's quality loop
///
/// Records are appended by the loop engine and never mutated afterwards.
/// Exactly one of `text` / `generation_error` is set, depending on whether
/// the generation step produced commentary or failed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    /// 1-based iteration index
    pub index: u32,

    /// Generated commentary text, if the generation step succeeded
    pub text: Option<String>,

    /// Error message from a failed generation step
    pub generation_error: Option<String>,

    /// Quality score (0-10) parsed from the review, absent when the review
    /// failed or its output carried no parseable score
    pub score: Option<f64>,

    /// Reviewer feedback text
    pub feedback: Option<String>,

    /// Missing-data prompts extracted from the review
    pub missing_data: Vec<String>,
}

impl IterationRecord {
    /// Record a successful generation (review fields filled in by builders)
    pub fn generated(index: u32, text: impl Into<String>) -> Self {
        Self {
            index,
            text: Some(text.into()),
            generation_error: None,
            score: None,
            feedback: None,
            missing_data: Vec::new(),
        }
    }

    /// Record a failed generation step
    pub fn failed(index: u32, error: impl Into<String>) -> Self {
        Self {
            index,
            text: None,
            generation_error: Some(error.into()),
            score: None,
            feedback: None,
            missing_data: Vec::new(),
        }
    }

    /// Builder method to attach a parsed review score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Builder method to attach reviewer feedback
    pub fn with_feedback(mut self, feedback: impl Into<String>) -> Self {
        self.feedback = Some(feedback.into());
        self
    }

    /// Builder method to attach missing-data prompts
    pub fn with_missing_data(mut self, prompts: Vec<String>) -> Self {
        self.missing_data = prompts;
        self
    }

    /// Whether this iteration produced commentary text
    pub fn has_usable_text(&self) -> bool {
        self.text.as_deref().is_some_and(|t| !t.trim().is_empty())
    }

    /// Word count of the generated commentary
    pub fn word_count(&self) -> usize {
        self.text.as_deref().map(|t| t.split_whitespace().count()).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_record() {
        let rec = IterationRecord::generated(1, "Markets rallied in the first quarter.")
            .with_score(8.5)
            .with_feedback("Good structure, needs data")
            .with_missing_data(vec!["What was the S&P 500 return?".to_string()]);

        assert!(rec.has_usable_text());
        assert_eq!(rec.score, Some(8.5));
        assert_eq!(rec.word_count(), 6);
        assert!(rec.generation_error.is_none());
        assert_eq!(rec.missing_data.len(), 1);
    }

    #[test]
    fn test_failed_record() {
        let rec = IterationRecord::failed(2, "API error 500: upstream unavailable");

        assert!(!rec.has_usable_text());
        assert_eq!(rec.word_count(), 0);
        assert!(rec.score.is_none());
        assert!(rec.generation_error.is_some());
    }

    #[test]
    fn test_whitespace_text_is_not_usable() {
        let rec = IterationRecord::generated(1, "   \n  ");
        assert!(!rec.has_usable_text());
    }
}
