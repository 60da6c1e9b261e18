//! Quality loop: generate, review, gather, regenerate
//!
//! The one non-trivial control flow in this crate. See [`engine`] for the
//! loop itself and [`review`] for the micro-format the review step answers
//! in.

mod config;
pub mod engine;
pub mod review;

pub use config::QualityConfig;
pub use engine::{LoopOutcome, LoopReport, QualityEngine};
pub use review::{Review, ReviewParse, parse_review};
