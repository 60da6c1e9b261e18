//! Review output parsing
//!
//! The review step asks the model to answer in a line-oriented micro-format:
//!
//! ```text
//! QUALITY_SCORE: 8.5
//! SHORT_FEEDBACK: Good structure, needs more quantitative detail.
//! MISSING_DATA_PROMPTS: 1) What was the S&P 500 return? 2) What was the VIX average?
//! ```
//!
//! Parsing is strict: output without a parseable score is reported as
//! `Malformed` rather than silently defaulted, so an iteration whose review
//! could not be scored stays "score absent" and never wins best-of
//! selection against a real score.

/// A successfully parsed review
#[derive(Debug, Clone, PartialEq)]
pub struct Review {
    /// Quality score on the 0-10 scale
    pub score: f64,

    /// Short reviewer feedback, if the response carried any
    pub feedback: Option<String>,

    /// Missing-data prompts, one entry per question
    pub missing_data: Vec<String>,
}

/// Result of parsing review output
#[derive(Debug, Clone, PartialEq)]
pub enum ReviewParse {
    Parsed(Review),
    Malformed { reason: String },
}

/// Parse the review micro-format out of raw model output
pub fn parse_review(output: &str) -> ReviewParse {
    let mut score = None;
    let mut feedback = None;
    let mut missing_data = Vec::new();

    for line in output.lines() {
        if let Some(value) = marker_value(line, "QUALITY_SCORE:") {
            match value.parse::<f64>() {
                Ok(parsed) if (0.0..=10.0).contains(&parsed) => score = Some(parsed),
                Ok(parsed) => {
                    return ReviewParse::Malformed {
                        reason: format!("quality score {} is outside the 0-10 scale", parsed),
                    };
                }
                Err(_) => {
                    return ReviewParse::Malformed {
                        reason: format!("unparseable quality score: '{}'", value),
                    };
                }
            }
        } else if let Some(value) = marker_value(line, "SHORT_FEEDBACK:").or_else(|| marker_value(line, "FEEDBACK:")) {
            if !value.is_empty() {
                feedback = Some(value);
            }
        } else if let Some(value) = marker_value(line, "MISSING_DATA_PROMPTS:") {
            missing_data = split_prompts(&value);
        }
    }

    match score {
        Some(score) => ReviewParse::Parsed(Review {
            score,
            feedback,
            missing_data,
        }),
        None => ReviewParse::Malformed {
            reason: "no QUALITY_SCORE marker in review output".to_string(),
        },
    }
}

/// Extract the value after a marker token, stripping markdown bold
///
/// Models wrap markers in `**` often enough that the original scraped them
/// off; we do the same before value parsing.
fn marker_value(line: &str, marker: &str) -> Option<String> {
    let stripped = line.replace("**", "");
    let trimmed = stripped.trim();
    trimmed
        .split_once(marker)
        .map(|(_, value)| value.trim().to_string())
}

/// Split a MISSING_DATA_PROMPTS value into individual prompts
///
/// Prompts arrive as numbered questions on one line; each prompt ends in a
/// question mark, so split there and drop the numbering.
fn split_prompts(value: &str) -> Vec<String> {
    value
        .split('?')
        .map(strip_numbering)
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}?", p))
        .collect()
}

/// Drop leading "1)" / "2." style numbering from a prompt fragment
fn strip_numbering(fragment: &str) -> &str {
    fragment
        .trim()
        .trim_start_matches(|c: char| c.is_ascii_digit())
        .trim_start_matches([')', '.'])
        .trim()
}
