//! Console report formatting
//!
//! Plain-text summaries of jobs and iteration history for the CLI.

use colored::Colorize;

use jobstore::{Job, JobStatus, RegistrySummary};

/// Colorize a status label
fn status_label(status: JobStatus) -> colored::ColoredString {
    let label = status.to_string();
    match status {
        JobStatus::Completed => label.green(),
        JobStatus::Failed => label.red(),
        JobStatus::Running => label.cyan(),
        JobStatus::Cancelled => label.yellow(),
        JobStatus::Pending => label.normal(),
    }
}

/// Colorize a score by quality band
fn score_label(score: f64, threshold: f64) -> colored::ColoredString {
    let label = format!("{}/10", score);
    if score >= threshold {
        label.green()
    } else if score >= 7.0 {
        label.yellow()
    } else {
        label.red()
    }
}

/// Print the jobs table, newest first
pub fn print_jobs_list(jobs: &[&Job]) {
    if jobs.is_empty() {
        println!("No jobs found");
        return;
    }

    println!("\nJobs ({} total)", jobs.len());
    println!("{}", "-".repeat(90));
    println!(
        "{:<10} {:<24} {:<8} {:<12} {:<8} {}",
        "ID", "Strategy", "Period", "Status", "Score", "Created"
    );
    println!("{}", "-".repeat(90));

    for job in jobs {
        let short_id = &job.id[..job.id.len().min(8)];
        let strategy: String = job.request.strategy_name.chars().take(24).collect();
        let score = job
            .final_score
            .map(|s| format!("{}/10", s))
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<10} {:<24} {:<8} {:<12} {:<8} {}",
            short_id,
            strategy,
            format!("{} {}", job.request.quarter, job.request.year),
            status_label(job.status),
            score,
            job.created_at.format("%m-%d %H:%M")
        );
    }
}

/// Print the per-status summary counts
pub fn print_summary(summary: &RegistrySummary) {
    println!("\nJob Summary");
    println!("-----------");
    println!("Total:     {}", summary.total);
    println!("Pending:   {}", summary.pending);
    println!("Running:   {}", summary.running);
    println!("Completed: {}", summary.completed);
    println!("Failed:    {}", summary.failed);
    println!("Cancelled: {}", summary.cancelled);
}

/// Print one job in detail
pub fn print_job_details(job: &Job, threshold: f64) {
    println!("\nJob: {}", job.id);
    println!("  Strategy:  {}", job.request.strategy_name);
    println!("  Period:    {} {}", job.request.quarter, job.request.year);
    println!("  Benchmark: {}", job.request.benchmark);
    if let Some(instructions) = &job.request.custom_instructions {
        println!("  Instructions: {}", instructions);
    }
    println!("  Status:    {}", status_label(job.status));
    println!("  Created:   {}", job.created_at.format("%Y-%m-%d %H:%M:%S"));

    if let Some(started) = job.started_at {
        println!("  Started:   {}", started.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(completed) = job.completed_at {
        println!("  Finished:  {}", completed.format("%Y-%m-%d %H:%M:%S"));
    }
    if let Some(score) = job.final_score {
        println!("  Score:     {}", score_label(score, threshold));
    }
    if let Some(text) = &job.final_text {
        println!("  Commentary: {} characters", text.len());
    }
    if let Some(error) = &job.error {
        println!("  Error:     {}", error.red());
    }

    print_iteration_summary(job, threshold);
}

/// Print the iteration history with scores, word counts, and feedback
pub fn print_iteration_summary(job: &Job, threshold: f64) {
    if job.iterations.is_empty() {
        return;
    }

    // Best-of marker goes to the highest-scored iteration
    let best_index = job
        .iterations
        .iter()
        .filter(|it| it.score.is_some())
        .max_by(|a, b| a.score.partial_cmp(&b.score).unwrap_or(std::cmp::Ordering::Equal))
        .map(|it| it.index);

    println!("\nIterations ({} total)", job.iterations.len());
    println!("{}", "-".repeat(60));

    for iteration in &job.iterations {
        let best_marker = if best_index == Some(iteration.index) {
            " *BEST*".green().to_string()
        } else {
            String::new()
        };
        println!("Iteration {}:{}", iteration.index, best_marker);

        match iteration.score {
            Some(score) => println!("  Score: {}", score_label(score, threshold)),
            None => println!("  Score: not available"),
        }

        if iteration.has_usable_text() {
            println!("  Words: {}", iteration.word_count());
        }

        if let Some(error) = &iteration.generation_error {
            println!("  Error: {}", error.red());
        }

        if let Some(feedback) = &iteration.feedback {
            println!("  Feedback: {}", truncate(feedback, 100));
        }

        if !iteration.missing_data.is_empty() {
            println!("  Missing data: {}", truncate(&iteration.missing_data.join(" "), 100));
        }
        println!();
    }
}

/// Truncate long text for table display
fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_text() {
        assert_eq!(truncate("short", 100), "short");
    }

    #[test]
    fn test_truncate_long_text() {
        let long = "x".repeat(150);
        let out = truncate(&long, 100);
        assert_eq!(out.chars().count(), 103);
        assert!(out.ends_with("..."));
    }

    #[test]
    fn test_score_label_bands() {
        // Just shape checks; color codes depend on tty detection
        assert!(score_label(9.5, 9.0).to_string().contains("9.5/10"));
        assert!(score_label(7.5, 9.0).to_string().contains("7.5/10"));
        assert!(score_label(3.0, 9.0).to_string().contains("3/10"));
    }
}
