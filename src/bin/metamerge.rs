//! Metamerge CLI Binary
//!
//! Command-line interface for merging agent-captured native-image metadata.

use clap::Parser;
use metamerge::cli::{Cli, RunContext};
use metamerge::config::ConfigLoader;
use metamerge::logging::{init_logging, LoggingConfig};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    // Build logging config from CLI args and config file
    let logging_config = build_logging_config(&cli);

    // Initialize logging early
    if let Err(e) = init_logging(Some(&logging_config)) {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Metamerge CLI starting");

    let context = match RunContext::new(
        cli.workspace.clone(),
        cli.config.clone(),
        &cli.config_overrides(),
    ) {
        Ok(ctx) => ctx,
        Err(e) => {
            error!("Error loading configuration: {}", e);
            eprintln!("{}", metamerge::cli::map_error(&e));
            process::exit(1);
        }
    };

    match context.execute(cli.command.as_ref()) {
        Ok(output) => {
            info!(exit_code = output.exit_code, "Command completed");
            println!("{}", output.text);
            process::exit(output.exit_code);
        }
        Err(e) => {
            error!("Command failed: {}", e);
            eprintln!("{}", metamerge::cli::map_error(&e));
            process::exit(1);
        }
    }
}

/// Build logging configuration from CLI args and config file.
/// Precedence: CLI flags override config file override defaults.
fn build_logging_config(cli: &Cli) -> LoggingConfig {
    let mut config = if let Some(ref config_path) = cli.config {
        ConfigLoader::load_from_file(config_path)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    } else {
        ConfigLoader::load(&cli.workspace)
            .ok()
            .map(|c| c.logging)
            .unwrap_or_default()
    };

    if cli.quiet {
        config.enabled = false;
    }
    if cli.verbose {
        config.level = "debug".to_string();
    }
    if let Some(ref level) = cli.log_level {
        config.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.output = output.clone();
    }
    if let Some(ref file) = cli.log_file {
        config.file = file.clone();
    }
    config.resolve_file(&cli.workspace);

    config
}
