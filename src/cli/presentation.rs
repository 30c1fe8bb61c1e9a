//! CLI presentation: text and JSON renderings of merge results.

use crate::config::MergerConfig;
use crate::error::ApiError;
use crate::merge::MergeReport;
use crate::runner::{PlatformOutcome, RunSummary};
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;
use serde_json::json;
use std::path::Path;

pub fn format_section_heading(title: &str) -> String {
    format!("{}", title.bold().underline())
}

/// Per-platform table, the added entries, then the one-line summary.
pub fn format_run_summary_text(summary: &RunSummary) -> String {
    let mut out = String::new();
    let heading = if summary.dry_run {
        "Pending metadata changes"
    } else {
        "Metadata merge"
    };
    out.push_str(&format!("{}\n\n", format_section_heading(heading)));
    out.push_str(&format!("Delta: {}\n\n", summary.delta.display()));

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Platform", "Status", "Reflection", "Resources", "Detail"]);
    for result in &summary.results {
        let (reflection, resources) = match result.outcome.report() {
            Some(report) => (
                report.added_types.len().to_string(),
                report.added_resources.len().to_string(),
            ),
            None => ("-".to_string(), "-".to_string()),
        };
        let detail = match &result.outcome {
            PlatformOutcome::Skipped(e) | PlatformOutcome::Failed(e) => e.to_string(),
            _ => result.baseline.display().to_string(),
        };
        table.add_row(vec![
            result.platform.clone(),
            result.outcome.status().to_string(),
            reflection,
            resources,
            detail,
        ]);
    }
    out.push_str(&format!("{}\n", table));

    for result in &summary.results {
        if let Some(report) = result.outcome.report() {
            out.push_str(&format!("\n{}:\n", result.platform));
            push_report_lines(&mut out, report);
        }
    }

    out.push('\n');
    out.push_str(&summary.summary_line());
    out
}

pub fn format_run_summary_json(summary: &RunSummary) -> Result<String, ApiError> {
    let platforms: Vec<_> = summary
        .results
        .iter()
        .map(|result| {
            let report = result.outcome.report();
            json!({
                "platform": result.platform,
                "baseline": result.baseline,
                "status": result.outcome.status(),
                "added_types": report.map(|r| r.added_types.clone()).unwrap_or_default(),
                "added_resources": report.map(|r| r.added_resources.clone()).unwrap_or_default(),
                "error": result.outcome.error().map(|e| json!({
                    "kind": e.kind(),
                    "message": e.to_string(),
                })),
            })
        })
        .collect();

    let out = json!({
        "dry_run": summary.dry_run,
        "delta": summary.delta,
        "platforms": platforms,
        "updated": summary.updated(),
        "unchanged": summary.unchanged(),
        "skipped": summary.skipped(),
        "failed": summary.failed(),
        "summary": summary.summary_line(),
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn format_merge_file_text(report: &MergeReport, output: &Path, dry_run: bool) -> String {
    if !report.changed() {
        return "No new reflection entries; nothing to write.".to_string();
    }
    let verb = if dry_run { "Would add" } else { "Added" };
    let mut out = format!(
        "{} {} reflection entries and {} resource patterns to {}\n",
        verb,
        report.added_types.len(),
        report.added_resources.len(),
        output.display()
    );
    push_report_lines(&mut out, report);
    out.truncate(out.trim_end().len());
    out
}

pub fn format_merge_file_json(
    report: &MergeReport,
    output: &Path,
    dry_run: bool,
) -> Result<String, ApiError> {
    let out = json!({
        "changed": report.changed(),
        "dry_run": dry_run,
        "output": output,
        "added_types": report.added_types,
        "added_resources": report.added_resources,
    });
    Ok(serde_json::to_string_pretty(&out)?)
}

pub fn format_config_json(config: &MergerConfig) -> Result<String, ApiError> {
    Ok(serde_json::to_string_pretty(config)?)
}

fn push_report_lines(out: &mut String, report: &MergeReport) {
    for type_key in &report.added_types {
        out.push_str(&format!("  + {}\n", type_key));
    }
    for key in &report.added_resources {
        out.push_str(&format!("  + resource {}\n", key));
    }
}
