//! CLI domain: parse, route, output, and presentation only.
//! No merge logic; single route table dispatches to the merger and runner.

mod output;
mod parse;
mod presentation;
mod route;

pub use output::{map_error, CommandOutput};
pub use parse::{Cli, Commands};
pub use presentation::{
    format_config_json, format_merge_file_json, format_merge_file_text, format_run_summary_json,
    format_run_summary_text, format_section_heading,
};
pub use route::RunContext;
