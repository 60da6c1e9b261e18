//! ContextGen - Market Context Commentary Generator
//!
//! CLI entry point.

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use contextgen::cli::{Cli, Command};
use contextgen::config::Config;
use contextgen::llm::create_client;
use contextgen::prompts::PromptLoader;
use contextgen::quality::QualityEngine;
use contextgen::runner::Runner;
use contextgen::{export, report};
use jobstore::{ContextRequest, JobRegistry, Quarter};

fn setup_logging(verbose: bool) -> Result<()> {
    // Create log directory
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("contextgen")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Write to a log file, not stdout/stderr - the console is for reports
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };
    let log_file = fs::File::create(log_dir.join("contextgen.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (verbose: {})", verbose);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    info!(
        "ContextGen loaded config: provider={}, model={}",
        config.llm.provider, config.llm.model
    );

    match cli.command {
        Command::Run {
            strategy,
            quarter,
            year,
            benchmark,
            instructions,
            max_iterations,
            threshold,
            output,
            no_save,
        } => {
            cmd_run(
                config,
                strategy,
                quarter,
                year,
                benchmark,
                instructions,
                max_iterations,
                threshold,
                output,
                no_save,
            )
            .await
        }
        Command::List => cmd_list(),
        Command::Show { id } => cmd_show(&id),
        Command::Save { id, output } => cmd_save(&config, &id, output),
        Command::Delete { id } => cmd_delete(&id),
        Command::Summary => cmd_summary(),
    }
}

/// Create a job, run the quality loop, report, and save the result
#[allow(clippy::too_many_arguments)]
async fn cmd_run(
    mut config: Config,
    strategy: String,
    quarter: Quarter,
    year: i32,
    benchmark: String,
    instructions: Option<String>,
    max_iterations: Option<u32>,
    threshold: Option<f64>,
    output: Option<PathBuf>,
    no_save: bool,
) -> Result<()> {
    // CLI overrides win over config file values
    if let Some(cap) = max_iterations {
        config.quality.max_iterations = cap;
    }
    if let Some(threshold) = threshold {
        config.quality.threshold = threshold;
    }

    // Missing credentials are fatal before any work starts
    config.validate()?;

    let llm = create_client(&config.llm)?;
    let engine = QualityEngine::new(llm, PromptLoader::new("."), config.quality.clone())
        .with_generation_options(config.llm.max_tokens, config.llm.temperature);
    let mut runner = Runner::new(engine);

    let mut request = ContextRequest::new(strategy, quarter, year).with_benchmark(benchmark);
    if let Some(instructions) = instructions {
        request = request.with_instructions(instructions);
    }

    let job = runner.create_job(request);
    println!("Created job {} - {}", job.id, job.request.label());
    println!("Running quality loop...");

    let result = runner.run(&job.id).await;

    if result.success {
        match result.score {
            Some(score) => println!("\nJob completed (score: {}/10, iterations: {})", score, result.iterations),
            None => println!(
                "\nJob completed without a parsed score (iterations: {})",
                result.iterations
            ),
        }
        println!("Elapsed: {:.1}s", result.elapsed_secs);

        if let Some(job) = runner.get_job(&job.id) {
            report::print_iteration_summary(job, config.quality.threshold);

            if let Some(text) = &job.final_text {
                println!("Commentary preview:");
                println!("{}", "-".repeat(60));
                let preview: String = text.chars().take(500).collect();
                if text.chars().count() > 500 {
                    println!("{}...", preview);
                } else {
                    println!("{}", preview);
                }
                println!("{}", "-".repeat(60));
            }

            if !no_save {
                let path = export::export_job(job, output, &config.export.dir)?;
                println!("Saved result to: {}", path.display());
            }
        }
        Ok(())
    } else {
        let message = result.error.unwrap_or_else(|| "unknown error".to_string());
        if let Some(job) = runner.get_job(&job.id) {
            report::print_iteration_summary(job, config.quality.threshold);
        }
        Err(eyre::eyre!("Job failed: {}", message))
    }
}

/// List jobs
///
/// Job state is process-lifetime only, so invocations other than `run`
/// always see an empty registry; the command exists for embedding and for
/// symmetry with the library API.
fn cmd_list() -> Result<()> {
    let registry = JobRegistry::new();
    report::print_jobs_list(&registry.list_all());
    Ok(())
}

/// Show one job in detail
fn cmd_show(id: &str) -> Result<()> {
    let registry = JobRegistry::new();
    match registry.get(id) {
        Some(job) => {
            report::print_job_details(job, Config::default().quality.threshold);
            Ok(())
        }
        None => Err(eyre::eyre!("Job {} not found", id)),
    }
}

/// Save a job's result to a file
fn cmd_save(config: &Config, id: &str, output: Option<PathBuf>) -> Result<()> {
    let registry = JobRegistry::new();
    match registry.get(id) {
        Some(job) => {
            let path = export::export_job(job, output, &config.export.dir)?;
            println!("Saved result to: {}", path.display());
            Ok(())
        }
        None => Err(eyre::eyre!("Job {} not found", id)),
    }
}

/// Delete a job
fn cmd_delete(id: &str) -> Result<()> {
    let mut registry = JobRegistry::new();
    if registry.delete(id) {
        println!("Deleted job {}", id);
        Ok(())
    } else {
        Err(eyre::eyre!("Job {} not found", id))
    }
}

/// Show per-status counts
fn cmd_summary() -> Result<()> {
    let registry = JobRegistry::new();
    report::print_summary(&registry.summary());
    Ok(())
}
