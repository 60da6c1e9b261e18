//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use jobstore::Quarter;

/// ContextGen - Market Context commentary generator
#[derive(Parser)]
#[command(
    name = "cg",
    about = "Generate Market Context sections for portfolio commentaries",
    version,
    after_help = "Job state lives for the duration of one invocation; nothing is persisted.\n\
                  Logs are written to: ~/.local/share/contextgen/logs/contextgen.log"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Create a job and run the quality loop for it
    Run {
        /// Strategy name (e.g. "US Equity Core")
        #[arg(short, long)]
        strategy: String,

        /// Quarter (Q1, Q2, Q3, or Q4)
        #[arg(short, long)]
        quarter: Quarter,

        /// Year
        #[arg(short, long)]
        year: i32,

        /// Benchmark index
        #[arg(short, long, default_value = "S&P 500")]
        benchmark: String,

        /// Free-text custom instructions
        #[arg(short, long)]
        instructions: Option<String>,

        /// Override the iteration cap
        #[arg(long)]
        max_iterations: Option<u32>,

        /// Override the quality score threshold
        #[arg(long)]
        threshold: Option<f64>,

        /// Write the result to this path instead of the default filename
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip writing the result to a file
        #[arg(long)]
        no_save: bool,
    },

    /// List all jobs
    List,

    /// Show job details and iteration history
    Show {
        /// Job ID
        id: String,
    },

    /// Save a job's result to a file
    Save {
        /// Job ID
        id: String,

        /// Target path
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Delete a job
    Delete {
        /// Job ID
        id: String,
    },

    /// Show per-status job counts
    Summary,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_run() {
        let cli = Cli::parse_from([
            "cg", "run", "--strategy", "US Equity Core", "--quarter", "Q1", "--year", "2024",
        ]);
        let Command::Run {
            strategy,
            quarter,
            year,
            benchmark,
            instructions,
            max_iterations,
            threshold,
            output,
            no_save,
        } = cli.command
        else {
            panic!("Expected Run command");
        };

        assert_eq!(strategy, "US Equity Core");
        assert_eq!(quarter, Quarter::Q1);
        assert_eq!(year, 2024);
        assert_eq!(benchmark, "S&P 500");
        assert!(instructions.is_none());
        assert!(max_iterations.is_none());
        assert!(threshold.is_none());
        assert!(output.is_none());
        assert!(!no_save);
    }

    #[test]
    fn test_cli_parse_run_with_overrides() {
        let cli = Cli::parse_from([
            "cg",
            "run",
            "-s",
            "Global Balanced",
            "-q",
            "q3",
            "-y",
            "2023",
            "-b",
            "MSCI World",
            "-i",
            "Focus on AI",
            "--max-iterations",
            "3",
            "--threshold",
            "8.5",
            "--no-save",
        ]);
        let Command::Run {
            quarter,
            benchmark,
            instructions,
            max_iterations,
            threshold,
            no_save,
            ..
        } = cli.command
        else {
            panic!("Expected Run command");
        };

        assert_eq!(quarter, Quarter::Q3);
        assert_eq!(benchmark, "MSCI World");
        assert_eq!(instructions.as_deref(), Some("Focus on AI"));
        assert_eq!(max_iterations, Some(3));
        assert_eq!(threshold, Some(8.5));
        assert!(no_save);
    }

    #[test]
    fn test_cli_parse_rejects_bad_quarter() {
        let result = Cli::try_parse_from(["cg", "run", "-s", "X", "-q", "Q5", "-y", "2024"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_cli_parse_list() {
        let cli = Cli::parse_from(["cg", "list"]);
        assert!(matches!(cli.command, Command::List));
    }

    #[test]
    fn test_cli_parse_show() {
        let cli = Cli::parse_from(["cg", "show", "019430-job-us-equity-core"]);
        let Command::Show { id } = cli.command else {
            panic!("Expected Show command");
        };
        assert_eq!(id, "019430-job-us-equity-core");
    }

    #[test]
    fn test_cli_parse_save_with_output() {
        let cli = Cli::parse_from(["cg", "save", "abc123", "-o", "result.txt"]);
        let Command::Save { id, output } = cli.command else {
            panic!("Expected Save command");
        };
        assert_eq!(id, "abc123");
        assert_eq!(output, Some(PathBuf::from("result.txt")));
    }

    #[test]
    fn test_cli_with_config() {
        let cli = Cli::parse_from(["cg", "-c", "/path/to/config.yml", "list"]);
        assert_eq!(cli.config, Some(PathBuf::from("/path/to/config.yml")));
    }
}
