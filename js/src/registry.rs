//! In-memory job registry
//!
//! Every mutating operation checks the job's current status first and
//! returns `false` without touching the job when the precondition does not
//! hold. Illegal transitions are a boolean signal, never a panic or error.

use std::collections::HashMap;

use serde::Serialize;

use crate::iteration::IterationRecord;
use crate::job::{Job, JobStatus};
use crate::request::ContextRequest;

/// Counts of jobs per status
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RegistrySummary {
    pub total: usize,
    pub pending: usize,
    pub running: usize,
    pub completed: usize,
    pub failed: usize,
    pub cancelled: usize,
}

/// In-memory store mapping job IDs to job records
///
/// Single-threaded use only; concurrent external mutation is undefined
/// behavior (documented, not guarded).
#[derive(Debug, Default)]
pub struct JobRegistry {
    jobs: HashMap<String, Job>,
}

impl JobRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new pending job and return a reference to it
    pub fn create(&mut self, request: ContextRequest) -> &Job {
        let job = Job::new(request);
        let id = job.id.clone();
        self.jobs.insert(id.clone(), job);
        &self.jobs[&id]
    }

    /// Transition pending -> running
    pub fn start(&mut self, id: &str) -> bool {
        match self.jobs.get_mut(id) {
            Some(job) if job.status == JobStatus::Pending => {
                job.mark_running();
                true
            }
            _ => false,
        }
    }

    /// Transition running -> completed with the final commentary
    pub fn complete(&mut self, id: &str, text: impl Into<String>, score: Option<f64>) -> bool {
        match self.jobs.get_mut(id) {
            Some(job) if job.status == JobStatus::Running => {
                job.mark_completed(text.into(), score);
                true
            }
            _ => false,
        }
    }

    /// Transition running -> failed with an error message
    pub fn fail(&mut self, id: &str, message: impl Into<String>) -> bool {
        match self.jobs.get_mut(id) {
            Some(job) if job.status == JobStatus::Running => {
                job.mark_failed(message.into());
                true
            }
            _ => false,
        }
    }

    /// Transition pending|running -> cancelled
    ///
    /// Cancelling a running job only marks the record; it cannot interrupt
    /// an in-flight generation call.
    pub fn cancel(&mut self, id: &str) -> bool {
        match self.jobs.get_mut(id) {
            Some(job) if matches!(job.status, JobStatus::Pending | JobStatus::Running) => {
                job.mark_cancelled();
                true
            }
            _ => false,
        }
    }

    /// Remove a job from the registry entirely
    pub fn delete(&mut self, id: &str) -> bool {
        self.jobs.remove(id).is_some()
    }

    /// Append iteration history to a running job
    pub fn record_iterations(&mut self, id: &str, iterations: Vec<IterationRecord>) -> bool {
        match self.jobs.get_mut(id) {
            Some(job) if job.status == JobStatus::Running => {
                job.iterations.extend(iterations);
                true
            }
            _ => false,
        }
    }

    /// Get a job by ID
    pub fn get(&self, id: &str) -> Option<&Job> {
        self.jobs.get(id)
    }

    /// All jobs, newest first
    pub fn list_all(&self) -> Vec<&Job> {
        let mut jobs: Vec<&Job> = self.jobs.values().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        jobs
    }

    /// Counts per status
    pub fn summary(&self) -> RegistrySummary {
        let mut summary = RegistrySummary {
            total: self.jobs.len(),
            ..Default::default()
        };
        for job in self.jobs.values() {
            match job.status {
                JobStatus::Pending => summary.pending += 1,
                JobStatus::Running => summary.running += 1,
                JobStatus::Completed => summary.completed += 1,
                JobStatus::Failed => summary.failed += 1,
                JobStatus::Cancelled => summary.cancelled += 1,
            }
        }
        summary
    }
}
