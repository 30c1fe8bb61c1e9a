//! CLI parse: clap types for Metamerge. No behavior; definitions only.

use crate::config::ConfigOverrides;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Metamerge CLI - merge agent-captured native-image metadata into platform baselines
#[derive(Parser, Debug)]
#[command(name = "metamerge")]
#[command(about = "Merge agent-captured reachability metadata into per-platform baselines")]
pub struct Cli {
    /// Command to run (defaults to `merge`)
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Workspace root directory; relative paths resolve against it
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides <workspace>/metamerge.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Directory holding one subdirectory per platform
    #[arg(long)]
    pub baseline_dir: Option<PathBuf>,

    /// Baseline file name inside each platform directory
    #[arg(long)]
    pub baseline_file_name: Option<String>,

    /// Agent-captured delta document
    #[arg(long)]
    pub delta_file: Option<PathBuf>,

    /// Platform identifier (repeatable or comma-separated; replaces the configured list)
    #[arg(long = "platform", value_delimiter = ',')]
    pub platforms: Vec<String>,

    /// Enable verbose logging
    #[arg(long, default_value = "false")]
    pub verbose: bool,

    /// Disable logging entirely
    #[arg(long, default_value = "false")]
    pub quiet: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Configuration overrides carried by global flags.
    pub fn config_overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            baseline_dir: self.baseline_dir.clone(),
            baseline_file_name: self.baseline_file_name.clone(),
            delta_file: self.delta_file.clone(),
            platforms: self.platforms.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Merge the delta into every platform baseline and write changes
    Merge {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Report what a merge would add without writing anything
    Check {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Merge one delta document into one baseline document
    MergeFile {
        /// Baseline document
        #[arg(long)]
        baseline: PathBuf,
        /// Delta document
        #[arg(long)]
        delta: PathBuf,
        /// Output path (defaults to the baseline)
        #[arg(long)]
        output: Option<PathBuf>,
        /// Compute the merge without writing
        #[arg(long)]
        dry_run: bool,
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Print the resolved configuration as JSON
    Config,
}

impl Default for Commands {
    fn default() -> Self {
        Commands::Merge {
            format: "text".to_string(),
        }
    }
}
