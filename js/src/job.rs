//! Job domain type

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::id::generate_id;
use crate::iteration::IterationRecord;
use crate::request::ContextRequest;

/// Job status
///
/// Transitions are one-directional: `Pending -> Running -> {Completed,
/// Failed, Cancelled}`, plus `Pending -> Cancelled`. Nothing leaves a
/// terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// Created, not yet started
    #[default]
    Pending,
    /// Generation loop in flight
    Running,
    /// Finished with a usable commentary
    Completed,
    /// Finished without usable output
    Failed,
    /// Withdrawn before or during the run
    Cancelled,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Running => write!(f, "running"),
            Self::Completed => write!(f, "completed"),
            Self::Failed => write!(f, "failed"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl JobStatus {
    /// Check if this is a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed | Self::Cancelled)
    }
}

/// One end-to-end request to produce a market context text and its outcome
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    /// Unique identifier
    pub id: String,

    /// The generation request this job was created for
    pub request: ContextRequest,

    /// Current status
    pub status: JobStatus,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// When the run started
    pub started_at: Option<DateTime<Utc>>,

    /// When the job reached a terminal state
    pub completed_at: Option<DateTime<Utc>>,

    /// Ordered iteration history from the quality loop
    pub iterations: Vec<IterationRecord>,

    /// Final commentary text (best-scoring iteration)
    pub final_text: Option<String>,

    /// Final quality score (best-scoring iteration; absent when no
    /// iteration carried a parseable score)
    pub final_score: Option<f64>,

    /// Error message for failed jobs
    pub error: Option<String>,
}

impl Job {
    /// Create a new pending job with a generated ID
    pub fn new(request: ContextRequest) -> Self {
        Self {
            id: generate_id("job", &request.strategy_name),
            request,
            status: JobStatus::Pending,
            created_at: Utc::now(),
            started_at: None,
            completed_at: None,
            iterations: Vec::new(),
            final_text: None,
            final_score: None,
            error: None,
        }
    }

    /// Check if the job is in a terminal state
    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Number of recorded iterations
    pub fn iteration_count(&self) -> usize {
        self.iterations.len()
    }

    pub(crate) fn mark_running(&mut self) {
        self.status = JobStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub(crate) fn mark_completed(&mut self, text: String, score: Option<f64>) {
        self.status = JobStatus::Completed;
        self.completed_at = Some(Utc::now());
        self.final_text = Some(text);
        self.final_score = score;
    }

    pub(crate) fn mark_failed(&mut self, message: String) {
        self.status = JobStatus::Failed;
        self.completed_at = Some(Utc::now());
        self.error = Some(message);
    }

    pub(crate) fn mark_cancelled(&mut self) {
        self.status = JobStatus::Cancelled;
        self.completed_at = Some(Utc::now());
    }
}
