//! Platform runner: merge one delta into every configured platform baseline.
//!
//! Platforms are processed sequentially and independently; a failure on one
//! never stops the rest.

use crate::config::MergerConfig;
use crate::error::MergeError;
use crate::merge::{MergeReport, MetadataMerger};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Result of merging one platform baseline.
#[derive(Debug)]
pub enum PlatformOutcome {
    /// Baseline gained entries (written, unless dry run)
    Updated(MergeReport),
    /// Nothing new for this platform
    Unchanged,
    /// Baseline or delta document missing
    Skipped(MergeError),
    /// Parse, read or write failure
    Failed(MergeError),
}

impl PlatformOutcome {
    pub fn status(&self) -> &'static str {
        match self {
            PlatformOutcome::Updated(_) => "updated",
            PlatformOutcome::Unchanged => "unchanged",
            PlatformOutcome::Skipped(_) => "skipped",
            PlatformOutcome::Failed(_) => "failed",
        }
    }

    pub fn report(&self) -> Option<&MergeReport> {
        match self {
            PlatformOutcome::Updated(report) => Some(report),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&MergeError> {
        match self {
            PlatformOutcome::Skipped(e) | PlatformOutcome::Failed(e) => Some(e),
            _ => None,
        }
    }
}

/// Outcome for one platform together with the baseline it targeted.
#[derive(Debug)]
pub struct PlatformResult {
    pub platform: String,
    pub baseline: PathBuf,
    pub outcome: PlatformOutcome,
}

/// Results for a full run over all platforms.
#[derive(Debug)]
pub struct RunSummary {
    pub dry_run: bool,
    pub delta: PathBuf,
    pub results: Vec<PlatformResult>,
}

impl RunSummary {
    fn count(&self, status: &str) -> usize {
        self.results
            .iter()
            .filter(|r| r.outcome.status() == status)
            .count()
    }

    pub fn updated(&self) -> usize {
        self.count("updated")
    }

    pub fn unchanged(&self) -> usize {
        self.count("unchanged")
    }

    pub fn skipped(&self) -> usize {
        self.count("skipped")
    }

    pub fn failed(&self) -> usize {
        self.count("failed")
    }

    /// 0 unless a platform hit a parse, read or write failure.
    pub fn exit_code(&self) -> i32 {
        if self.failed() > 0 {
            1
        } else {
            0
        }
    }

    /// Final one-line summary.
    pub fn summary_line(&self) -> String {
        let verb = if self.dry_run { "Would merge" } else { "Merged" };
        format!(
            "{} {} of {} platforms ({} unchanged, {} skipped, {} failed)",
            verb,
            self.updated(),
            self.results.len(),
            self.unchanged(),
            self.skipped(),
            self.failed()
        )
    }
}

/// Merge the configured delta into each platform's baseline, in place.
///
/// Paths in `config` are used as given; resolve them against the workspace first.
pub fn run(config: &MergerConfig, merger: &MetadataMerger) -> RunSummary {
    let mut results = Vec::with_capacity(config.platforms.len());

    for platform in &config.platforms {
        let baseline = config.baseline_path(platform);
        let outcome = match merger.merge_with_report(&baseline, &config.delta_file, &baseline) {
            Ok(report) if report.changed() => {
                info!(
                    platform = %platform,
                    reflection = report.added_types.len(),
                    resources = report.added_resources.len(),
                    "Platform baseline updated"
                );
                PlatformOutcome::Updated(report)
            }
            Ok(_) => {
                info!(platform = %platform, "Platform baseline already up to date");
                PlatformOutcome::Unchanged
            }
            Err(e) if e.is_not_found() => {
                warn!(platform = %platform, error = %e, "Skipping platform");
                PlatformOutcome::Skipped(e)
            }
            Err(e) => {
                error!(platform = %platform, error = %e, "Platform merge failed");
                PlatformOutcome::Failed(e)
            }
        };
        results.push(PlatformResult {
            platform: platform.clone(),
            baseline,
            outcome,
        });
    }

    RunSummary {
        dry_run: merger.is_dry_run(),
        delta: config.delta_file.clone(),
        results,
    }
}
