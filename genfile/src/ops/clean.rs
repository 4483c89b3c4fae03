//! Clean operation - remove every file of the last generation.

use std::path::Path;

use genfile_core::{is_within, remove_empty_dirs};
use genfile_manifest::{GenerationRecord, Manifest};
use genfile_tracker::{Error, Result};

use crate::reports::CleanReport;

/// Options for the clean operation.
pub struct CleanOptions<'a> {
    /// Output directory containing generated files.
    pub output_dir: &'a Path,
    /// Whether to preview without deleting.
    pub dry_run: bool,
}

/// Execute the clean operation.
///
/// Deletes the recorded files, prunes directories left empty, and removes
/// the record itself.
pub fn clean(manifest: &Manifest, opts: CleanOptions) -> Result<CleanReport> {
    let record_path = opts.output_dir.join(&manifest.settings.record);
    let record = GenerationRecord::load(&record_path)?;

    let mut report = CleanReport {
        dry_run: opts.dry_run,
        ..CleanReport::default()
    };

    for file in &record.files {
        let id = match file.checked_id() {
            Ok(id) => id,
            Err(reason) => {
                report
                    .warnings
                    .push(format!("ignoring recorded path '{}': {}", file.path, reason));
                continue;
            }
        };
        let Some(root) = manifest.project_root(id.project()) else {
            report.warnings.push(format!(
                "'{}' belongs to project '{}' which is no longer declared, skipping",
                id,
                id.project()
            ));
            continue;
        };
        let root = opts.output_dir.join(root);
        let path = root.join(id.relative_path());
        if !is_within(&path, opts.output_dir) {
            report.warnings.push(format!(
                "'{}' resolves outside the output directory, skipping",
                id
            ));
            continue;
        }

        if !path.exists() {
            report.missing.push(id.to_string());
            continue;
        }

        if !opts.dry_run {
            std::fs::remove_file(&path).map_err(|e| {
                Box::new(Error::Io {
                    path: path.clone(),
                    source: e,
                })
            })?;
            if let Some(parent) = path.parent() {
                if let Err(e) = remove_empty_dirs(parent, &root) {
                    tracing::warn!(
                        path = %parent.display(),
                        error = %e,
                        "failed to prune empty directory"
                    );
                }
            }
        }
        tracing::debug!(file = %id, dry_run = opts.dry_run, "cleaned");
        report.deleted.push(id.to_string());
    }

    if !opts.dry_run {
        GenerationRecord::remove(&record_path)?;
    }

    Ok(report)
}
