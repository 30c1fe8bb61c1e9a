//! Metadata Merger
//!
//! Folds an agent-captured delta document into a baseline document. Baseline
//! entries always win: nothing is removed or rewritten, new reflection entries
//! and resource patterns are appended in delta order, and duplicates (by `type`
//! and by `glob`/`pattern`) are dropped. Resources are only merged when the
//! delta contributed at least one new reflection entry.

use crate::document::{MetadataDocument, Resources};
use crate::error::MergeError;
use serde::Serialize;
use std::collections::HashSet;
use std::path::Path;
use tracing::{debug, info};

/// What a merge appended to the baseline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MergeReport {
    /// `type` keys of appended reflection entries, in append order
    pub added_types: Vec<String>,
    /// `glob`/`pattern` keys of appended resource patterns, in append order
    pub added_resources: Vec<String>,
}

impl MergeReport {
    /// Whether the baseline changed (and therefore gets written).
    pub fn changed(&self) -> bool {
        !self.added_types.is_empty()
    }
}

/// Merge `delta` into `baseline` in memory.
pub fn merge_documents(baseline: &mut MetadataDocument, delta: &MetadataDocument) -> MergeReport {
    let mut report = MergeReport::default();

    let mut known_types: HashSet<String> = baseline
        .reflection
        .iter()
        .filter_map(|entry| entry.type_key())
        .collect();

    for entry in &delta.reflection {
        let Some(type_key) = entry.type_key() else {
            debug!(entry = ?entry.fields(), "Skipping reflection entry without a type");
            continue;
        };
        if known_types.insert(type_key.clone()) {
            baseline.reflection.push(entry.clone());
            report.added_types.push(type_key);
        }
    }

    if !report.changed() {
        return report;
    }

    if let Some(delta_resources) = &delta.resources {
        match baseline.resources.as_mut() {
            Some(existing) => {
                report.added_resources = merge_resources(existing, delta_resources);
            }
            None => {
                // A fresh section is only attached once something lands in it.
                let mut fresh = Resources::empty_like(delta_resources);
                report.added_resources = merge_resources(&mut fresh, delta_resources);
                if !fresh.is_empty() {
                    baseline.resources = Some(fresh);
                }
            }
        }
    }

    report
}

fn merge_resources(target: &mut Resources, delta: &Resources) -> Vec<String> {
    let mut known_keys: HashSet<String> = target
        .patterns()
        .iter()
        .filter_map(|pattern| pattern.key().map(str::to_string))
        .collect();

    let mut added = Vec::new();
    for pattern in delta.patterns() {
        let Some(key) = pattern.key() else {
            debug!(pattern = ?pattern.fields(), "Skipping resource pattern without glob or pattern");
            continue;
        };
        if known_keys.insert(key.to_string()) {
            target.push(pattern.clone());
            added.push(key.to_string());
        }
    }
    added
}

/// File-level merge operation.
#[derive(Debug, Clone, Default)]
pub struct MetadataMerger {
    dry_run: bool,
}

impl MetadataMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// In dry-run mode the report is computed but the output is never written.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Merge the delta at `delta_path` into the baseline at `baseline_path`,
    /// writing the result to `output_path` when something was added.
    ///
    /// Returns whether any reflection entry was added.
    pub fn merge(
        &self,
        baseline_path: &Path,
        delta_path: &Path,
        output_path: &Path,
    ) -> Result<bool, MergeError> {
        Ok(self
            .merge_with_report(baseline_path, delta_path, output_path)?
            .changed())
    }

    /// Same as [`MetadataMerger::merge`], returning the full report.
    pub fn merge_with_report(
        &self,
        baseline_path: &Path,
        delta_path: &Path,
        output_path: &Path,
    ) -> Result<MergeReport, MergeError> {
        let mut baseline = MetadataDocument::load(baseline_path)?;
        let delta = MetadataDocument::load(delta_path)?;

        let report = merge_documents(&mut baseline, &delta);
        if !report.changed() {
            debug!(baseline = %baseline_path.display(), "No new reflection entries");
            return Ok(report);
        }

        if self.dry_run {
            info!(
                baseline = %baseline_path.display(),
                reflection = report.added_types.len(),
                resources = report.added_resources.len(),
                "Dry run: baseline would change"
            );
            return Ok(report);
        }

        baseline.save(output_path)?;
        info!(
            output = %output_path.display(),
            reflection = report.added_types.len(),
            resources = report.added_resources.len(),
            "Wrote merged metadata"
        );
        Ok(report)
    }
}

/// Merge with default settings. See [`MetadataMerger::merge`].
pub fn merge(baseline_path: &Path, delta_path: &Path, output_path: &Path) -> Result<bool, MergeError> {
    MetadataMerger::new().merge(baseline_path, delta_path, output_path)
}
