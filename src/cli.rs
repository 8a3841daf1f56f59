// src/cli.rs

//! CLI argument parsing using `clap`.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::config::ConfigOverrides;
use crate::types::Algorithm;

/// Command-line arguments for `wfsim`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "wfsim",
    version,
    about = "Compare DSAWS, CGA and Dyna workflow scheduling on a simulated VM fleet.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Wfsim.toml` in the current working directory, if present.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Workflow to simulate (sample, montage, cybershake, ligo, epigenomics).
    #[arg(long, value_name = "NAME")]
    pub workflow: Option<String>,

    /// Number of tasks to generate (ignored for `sample`).
    #[arg(long, value_name = "N", allow_negative_numbers = true)]
    pub tasks: Option<i64>,

    /// Deadline as a multiple of the workflow's maximum rank.
    #[arg(long, value_name = "FACTOR")]
    pub deadline_factor: Option<f64>,

    /// Simulated seconds per wall-clock second.
    #[arg(long, value_name = "X")]
    pub speed: Option<f64>,

    /// Run the clock ten times faster.
    #[arg(long)]
    pub fast_forward: bool,

    /// Seed for graph generation, provisioning and assignment.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Comma-separated algorithms to simulate (dsaws,cga,dyna).
    #[arg(long, value_name = "LIST", value_delimiter = ',')]
    pub algorithms: Option<Vec<Algorithm>>,

    /// Drive the simulation in real time instead of as fast as possible.
    #[arg(long)]
    pub realtime: bool,

    /// Wall-clock seconds per frame in headless mode.
    #[arg(long, value_name = "SECS", default_value_t = 1.0)]
    pub frame_dt: f64,

    /// Write finished run records to this JSON file.
    #[arg(long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `WFSIM_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,

    /// Validate config, print generated graphs and fleets, but don't simulate.
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    /// The flags that override config file values.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            workflow: self.workflow.clone(),
            task_count: self.tasks,
            deadline_factor: self.deadline_factor,
            seed: self.seed,
            speed: self.speed,
            fast_forward: self.fast_forward,
            algorithms: self.algorithms.clone(),
        }
    }
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algorithm_list_and_overrides() {
        let args = CliArgs::try_parse_from([
            "wfsim",
            "--workflow",
            "montage",
            "--tasks",
            "200",
            "--algorithms",
            "dsaws,dyna",
            "--fast-forward",
        ])
        .unwrap();

        let overrides = args.overrides();
        assert_eq!(overrides.workflow.as_deref(), Some("montage"));
        assert_eq!(overrides.task_count, Some(200));
        assert_eq!(overrides.algorithms, Some(vec![Algorithm::Dsaws, Algorithm::Dyna]));
        assert!(overrides.fast_forward);
        assert_eq!(args.frame_dt, 1.0);
    }

    #[test]
    fn rejects_unknown_algorithms() {
        assert!(CliArgs::try_parse_from(["wfsim", "--algorithms", "heft"]).is_err());
    }
}
