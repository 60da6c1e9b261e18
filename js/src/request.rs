//! Generation request types

use serde::{Deserialize, Serialize};

/// Calendar quarter for a commentary period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl std::fmt::Display for Quarter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Q1 => write!(f, "Q1"),
            Self::Q2 => write!(f, "Q2"),
            Self::Q3 => write!(f, "Q3"),
            Self::Q4 => write!(f, "Q4"),
        }
    }
}

impl std::str::FromStr for Quarter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "Q1" => Ok(Self::Q1),
            "Q2" => Ok(Self::Q2),
            "Q3" => Ok(Self::Q3),
            "Q4" => Ok(Self::Q4),
            _ => Err(format!("Unknown quarter: {}. Use: Q1, Q2, Q3, or Q4", s)),
        }
    }
}

/// Immutable description of one commentary generation request
///
/// Created once per job from CLI arguments and snapshotted back out of the
/// job when the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextRequest {
    /// Portfolio strategy name (e.g. "US Equity Core")
    pub strategy_name: String,

    /// Commentary period quarter
    pub quarter: Quarter,

    /// Commentary period year
    pub year: i32,

    /// Benchmark index the strategy is measured against
    pub benchmark: String,

    /// Free-text instructions folded into the generation prompt
    pub custom_instructions: Option<String>,
}

impl ContextRequest {
    /// Create a request with the default benchmark
    pub fn new(strategy_name: impl Into<String>, quarter: Quarter, year: i32) -> Self {
        Self {
            strategy_name: strategy_name.into(),
            quarter,
            year,
            benchmark: "S&P 500".to_string(),
            custom_instructions: None,
        }
    }

    /// Builder method to set the benchmark
    pub fn with_benchmark(mut self, benchmark: impl Into<String>) -> Self {
        self.benchmark = benchmark.into();
        self
    }

    /// Builder method to set custom instructions
    pub fn with_instructions(mut self, instructions: impl Into<String>) -> Self {
        self.custom_instructions = Some(instructions.into());
        self
    }

    /// Display label like "US Equity Core Q1 2024"
    pub fn label(&self) -> String {
        format!("{} {} {}", self.strategy_name, self.quarter, self.year)
    }
}
