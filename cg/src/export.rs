//! Result export
//!
//! One-shot text-file write of a completed job's commentary plus a
//! metadata header.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use eyre::{Context, Result, eyre};

use jobstore::Job;

/// Default export filename for a job
///
/// `market_context_{strategy}_{quarter}_{year}_{timestamp}.txt`
pub fn default_filename(job: &Job) -> String {
    let strategy = job.request.strategy_name.replace(' ', "_");
    let timestamp = Local::now().format("%Y%m%d_%H%M%S");
    format!(
        "market_context_{}_{}_{}_{}.txt",
        strategy, job.request.quarter, job.request.year, timestamp
    )
}

/// Write a job's final commentary to a file
///
/// Uses the given path, or the default filename inside `dir` when no path
/// is provided. Returns the path written.
pub fn export_job(job: &Job, path: Option<PathBuf>, dir: &Path) -> Result<PathBuf> {
    let Some(commentary) = job.final_text.as_deref() else {
        return Err(eyre!("Job {} has no result to save", job.id));
    };

    let path = path.unwrap_or_else(|| dir.join(default_filename(job)));

    let score_line = match job.final_score {
        Some(score) => format!("Quality Score: {}/10", score),
        None => "Quality Score: not available".to_string(),
    };

    let content = format!(
        "Market Context for {} - {} {}\n\
         Generated on: {}\n\
         {}\n\
         Benchmark: {}\n\
         {}\n\n\
         {}\n",
        job.request.strategy_name,
        job.request.quarter,
        job.request.year,
        Local::now().format("%Y-%m-%d %H:%M:%S"),
        score_line,
        job.request.benchmark,
        "=".repeat(80),
        commentary
    );

    fs::write(&path, content).context(format!("Failed to write result to {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jobstore::{ContextRequest, JobRegistry, Quarter};

    fn completed_job() -> Job {
        let mut registry = JobRegistry::new();
        let id = registry
            .create(ContextRequest::new("US Equity Core", Quarter::Q1, 2024))
            .id
            .clone();
        registry.start(&id);
        registry.complete(&id, "Markets advanced steadily.", Some(9.5));
        registry.get(&id).unwrap().clone()
    }

    #[test]
    fn test_default_filename_shape() {
        let job = completed_job();
        let name = default_filename(&job);
        assert!(name.starts_with("market_context_US_Equity_Core_Q1_2024_"));
        assert!(name.ends_with(".txt"));
    }

    #[test]
    fn test_export_writes_header_and_commentary() {
        let temp = tempfile::tempdir().unwrap();
        let job = completed_job();

        let path = export_job(&job, None, temp.path()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        assert!(content.contains("Market Context for US Equity Core - Q1 2024"));
        assert!(content.contains("Quality Score: 9.5/10"));
        assert!(content.contains("Benchmark: S&P 500"));
        assert!(content.contains("Markets advanced steadily."));
    }

    #[test]
    fn test_export_explicit_path() {
        let temp = tempfile::tempdir().unwrap();
        let job = completed_job();
        let target = temp.path().join("out.txt");

        let path = export_job(&job, Some(target.clone()), temp.path()).unwrap();
        assert_eq!(path, target);
        assert!(target.exists());
    }

    #[test]
    fn test_export_without_result_fails() {
        let temp = tempfile::tempdir().unwrap();
        let mut registry = JobRegistry::new();
        let job = registry
            .create(ContextRequest::new("US Equity Core", Quarter::Q1, 2024))
            .clone();

        let result = export_job(&job, None, temp.path());
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("no result to save"));
    }
}
