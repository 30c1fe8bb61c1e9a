//! CLI route: single route table and run context. Dispatches to the merger and presentation.

use crate::cli::output::CommandOutput;
use crate::cli::parse::Commands;
use crate::cli::presentation::{
    format_config_json, format_merge_file_json, format_merge_file_text, format_run_summary_json,
    format_run_summary_text,
};
use crate::config::{ConfigLoader, ConfigOverrides, MergerConfig};
use crate::error::ApiError;
use crate::merge::MetadataMerger;
use crate::runner;
use std::path::PathBuf;
use tracing::info;

/// Runtime context for CLI execution: resolved configuration and any validation problems.
pub struct RunContext {
    config: MergerConfig,
    validation_errors: Vec<String>,
}

impl RunContext {
    /// Create run context from workspace root, optional config path and CLI overrides.
    pub fn new(
        workspace_root: PathBuf,
        config_path: Option<PathBuf>,
        overrides: &ConfigOverrides,
    ) -> Result<Self, ApiError> {
        let mut config = if let Some(ref cfg_path) = config_path {
            ConfigLoader::load_from_file(cfg_path)?
        } else {
            ConfigLoader::load(&workspace_root)?
        };
        overrides.apply(&mut config);

        let validation_errors = match config.validate() {
            Ok(()) => Vec::new(),
            Err(errors) => errors.iter().map(|e| e.to_string()).collect(),
        };

        Ok(Self {
            config: config.resolved(&workspace_root),
            validation_errors,
        })
    }

    /// Resolved configuration (paths anchored at the workspace root).
    pub fn config(&self) -> &MergerConfig {
        &self.config
    }

    /// Platform layout checks. `merge-file` works on explicit paths and skips them.
    fn validate(&self) -> Result<(), ApiError> {
        if self.validation_errors.is_empty() {
            return Ok(());
        }
        Err(ApiError::ConfigError(format!(
            "Configuration validation failed:\n{}",
            self.validation_errors.join("\n")
        )))
    }

    /// Execute a CLI command via the single route table. `None` runs `merge`.
    pub fn execute(&self, command: Option<&Commands>) -> Result<CommandOutput, ApiError> {
        let default_command = Commands::default();
        match command.unwrap_or(&default_command) {
            Commands::Merge { format } => self.run_platforms(false, format),
            Commands::Check { format } => self.run_platforms(true, format),
            Commands::MergeFile {
                baseline,
                delta,
                output,
                dry_run,
                format,
            } => {
                let output = output.as_ref().unwrap_or(baseline);
                let merger = MetadataMerger::new().with_dry_run(*dry_run);
                let report = merger.merge_with_report(baseline, delta, output)?;
                let text = if format == "json" {
                    format_merge_file_json(&report, output, *dry_run)?
                } else {
                    format_merge_file_text(&report, output, *dry_run)
                };
                Ok(CommandOutput::success(text))
            }
            Commands::Config => {
                self.validate()?;
                Ok(CommandOutput::success(format_config_json(&self.config)?))
            }
        }
    }

    fn run_platforms(&self, dry_run: bool, format: &str) -> Result<CommandOutput, ApiError> {
        self.validate()?;
        info!(
            platforms = self.config.platforms.len(),
            delta = %self.config.delta_file.display(),
            dry_run,
            "Merging delta into platform baselines"
        );
        let merger = MetadataMerger::new().with_dry_run(dry_run);
        let summary = runner::run(&self.config, &merger);
        let text = if format == "json" {
            format_run_summary_json(&summary)?
        } else {
            format_run_summary_text(&summary)
        };
        Ok(CommandOutput {
            text,
            exit_code: summary.exit_code(),
        })
    }
}
