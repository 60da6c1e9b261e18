//! Runner - glue between the job registry and the quality engine
//!
//! Converts loop outcomes into job state transitions. This is the outermost
//! error boundary: anything escaping the engine becomes a failed job, never
//! a crash.

use std::time::Instant;

use tracing::{debug, info, warn};

use jobstore::{ContextRequest, IterationRecord, Job, JobRegistry, RegistrySummary};

use crate::quality::{LoopOutcome, QualityEngine};

/// Summary of one job run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub job_id: String,
    pub success: bool,
    pub text: Option<String>,
    pub score: Option<f64>,
    pub iterations: usize,
    pub error: Option<String>,
    pub elapsed_secs: f64,
}

/// Wraps the registry and the engine; owns all job state mutation
pub struct Runner {
    registry: JobRegistry,
    engine: QualityEngine,
}

impl Runner {
    pub fn new(engine: QualityEngine) -> Self {
        Self {
            registry: JobRegistry::new(),
            engine,
        }
    }

    /// Create a new pending job and return a snapshot of it
    pub fn create_job(&mut self, request: ContextRequest) -> Job {
        debug!(label = %request.label(), "create_job: called");
        let job = self.registry.create(request);
        info!("Created job {} - {}", job.id, job.request.label());
        job.clone()
    }

    /// Run a job end to end
    ///
    /// Marks the job running, snapshots its request, drives the quality
    /// loop, and moves the job to completed or failed.
    pub async fn run(&mut self, job_id: &str) -> RunReport {
        debug!(%job_id, "run: called");
        let started = Instant::now();

        // Snapshot the request out of the stored job
        let Some(request) = self.registry.get(job_id).map(|job| job.request.clone()) else {
            return RunReport {
                job_id: job_id.to_string(),
                success: false,
                text: None,
                score: None,
                iterations: 0,
                error: Some("Job not found".to_string()),
                elapsed_secs: 0.0,
            };
        };

        if !self.registry.start(job_id) {
            let status = self.registry.get(job_id).map(|j| j.status.to_string()).unwrap_or_default();
            return RunReport {
                job_id: job_id.to_string(),
                success: false,
                text: None,
                score: None,
                iterations: 0,
                error: Some(format!("Job is not pending (status: {})", status)),
                elapsed_secs: 0.0,
            };
        }

        info!("Starting job {}: {}", job_id, request.label());

        match self.engine.run(&request).await {
            Ok(report) => {
                let iterations = report.iterations.len();
                self.registry.record_iterations(job_id, report.iterations);

                match report.outcome {
                    LoopOutcome::Accepted { text, score } => {
                        debug!(%job_id, ?score, "run: loop accepted a draft");
                        self.registry.complete(job_id, text.clone(), score);
                        info!("Job {} completed (score: {:?}, iterations: {})", job_id, score, iterations);
                        RunReport {
                            job_id: job_id.to_string(),
                            success: true,
                            text: Some(text),
                            score,
                            iterations,
                            error: None,
                            elapsed_secs: started.elapsed().as_secs_f64(),
                        }
                    }
                    LoopOutcome::NoUsableOutput { reason } => {
                        debug!(%job_id, %reason, "run: loop produced no usable output");
                        self.registry.fail(job_id, reason.clone());
                        warn!("Job {} failed: {}", job_id, reason);
                        RunReport {
                            job_id: job_id.to_string(),
                            success: false,
                            text: None,
                            score: None,
                            iterations,
                            error: Some(reason),
                            elapsed_secs: started.elapsed().as_secs_f64(),
                        }
                    }
                }
            }
            Err(e) => {
                // Outermost boundary: nothing escapes as a crash
                let message = e.to_string();
                self.registry.fail(job_id, message.clone());
                warn!("Job {} failed with error: {}", job_id, message);
                RunReport {
                    job_id: job_id.to_string(),
                    success: false,
                    text: None,
                    score: None,
                    iterations: 0,
                    error: Some(message),
                    elapsed_secs: started.elapsed().as_secs_f64(),
                }
            }
        }
    }

    /// Get a job by ID
    pub fn get_job(&self, job_id: &str) -> Option<&Job> {
        self.registry.get(job_id)
    }

    /// All jobs, newest first
    pub fn list_jobs(&self) -> Vec<&Job> {
        self.registry.list_all()
    }

    /// Counts per status
    pub fn summary(&self) -> RegistrySummary {
        self.registry.summary()
    }

    /// Cancel a pending or running job
    pub fn cancel_job(&mut self, job_id: &str) -> bool {
        self.registry.cancel(job_id)
    }

    /// Delete a job from the registry
    pub fn delete_job(&mut self, job_id: &str) -> bool {
        self.registry.delete(job_id)
    }

    /// Iteration history for a job
    pub fn iterations(&self, job_id: &str) -> &[IterationRecord] {
        self.registry.get(job_id).map(|j| j.iterations.as_slice()).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::llm::client::mock::{FailingLlmClient, MockLlmClient};
    use crate::prompts::PromptLoader;
    use crate::quality::QualityConfig;
    use jobstore::{JobStatus, Quarter};

    fn runner(llm: Arc<dyn crate::llm::LlmClient>) -> Runner {
        Runner::new(QualityEngine::new(
            llm,
            PromptLoader::embedded_only(),
            QualityConfig::default(),
        ))
    }

    fn request() -> ContextRequest {
        ContextRequest::new("US Equity Core", Quarter::Q1, 2024)
    }

    #[tokio::test]
    async fn test_end_to_end_success() {
        // Fixed commentary + a 9.5 review: completed in one iteration
        let llm = Arc::new(MockLlmClient::from_texts(vec![
            "Markets advanced steadily through the quarter.",
            "QUALITY_SCORE: 9.5\nSHORT_FEEDBACK: Excellent.",
        ]));
        let mut runner = runner(llm);

        let job = runner.create_job(request());
        let report = runner.run(&job.id).await;

        assert!(report.success);
        assert_eq!(report.score, Some(9.5));
        assert_eq!(report.iterations, 1);

        let job = runner.get_job(&job.id).unwrap();
        assert_eq!(job.status, JobStatus::Completed);
        assert_eq!(job.final_score, Some(9.5));
        assert_eq!(
            job.final_text.as_deref(),
            Some("Markets advanced steadily through the quarter.")
        );
        assert_eq!(job.iteration_count(), 1);
        assert!(job.completed_at.is_some());
    }

    #[tokio::test]
    async fn test_end_to_end_failure() {
        // Collaborator always raises: job fails with a descriptive error
        // and no iteration carries usable text
        let llm = Arc::new(FailingLlmClient::new());
        let mut runner = runner(llm);

        let job = runner.create_job(request());
        let report = runner.run(&job.id).await;

        assert!(!report.success);
        assert!(report.error.as_deref().is_some_and(|e| !e.is_empty()));

        let job = runner.get_job(&job.id).unwrap();
        assert_eq!(job.status, JobStatus::Failed);
        assert!(job.error.as_deref().is_some_and(|e| !e.is_empty()));
        assert!(job.iterations.iter().all(|it| !it.has_usable_text()));
    }

    #[tokio::test]
    async fn test_run_unknown_job() {
        let llm = Arc::new(FailingLlmClient::new());
        let mut runner = runner(llm.clone());

        let report = runner.run("missing-job").await;
        assert!(!report.success);
        assert_eq!(report.error.as_deref(), Some("Job not found"));
        // The engine was never invoked
        assert_eq!(llm.call_count(), 0);
    }

    #[tokio::test]
    async fn test_run_rejects_cancelled_job() {
        let llm = Arc::new(FailingLlmClient::new());
        let mut runner = runner(llm.clone());

        let job = runner.create_job(request());
        assert!(runner.cancel_job(&job.id));

        let report = runner.run(&job.id).await;
        assert!(!report.success);
        assert!(report.error.as_deref().unwrap().contains("not pending"));
        assert_eq!(llm.call_count(), 0);
        assert_eq!(runner.get_job(&job.id).unwrap().status, JobStatus::Cancelled);
    }
}
