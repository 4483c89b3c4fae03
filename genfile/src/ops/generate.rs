//! Generate operation - register every manifest file and commit.

use std::path::Path;

use genfile_manifest::GenfileToml;
use genfile_tracker::{FileManager, RecordHost, Result};

use crate::reports::GenerateReport;

/// Options for the generate operation.
pub struct GenerateOptions<'a> {
    /// Directory generated files are written under.
    pub output_dir: &'a Path,
    /// Whether to plan without writing.
    pub dry_run: bool,
    /// Overrides `settings.can_overwrite_existing_file` when set.
    pub can_overwrite: Option<bool>,
}

/// Execute the generate operation.
pub fn generate(genfile: &GenfileToml, opts: GenerateOptions) -> Result<GenerateReport> {
    let manifest = genfile.manifest();

    let warnings: Vec<String> = manifest
        .duplicate_ids()
        .into_iter()
        .map(|id| format!("'{}' is listed more than once, the last entry wins", id))
        .collect();

    let host = RecordHost::new(opts.output_dir.join(&manifest.settings.record));
    let mut manager = FileManager::from_manifest(manifest, opts.output_dir, host)?;
    if let Some(can_overwrite) = opts.can_overwrite {
        manager.set_can_overwrite_existing_file(can_overwrite);
    }

    for file in genfile.pending_files()? {
        manager.register(file)?;
    }

    let commit = if opts.dry_run {
        manager.plan()?
    } else {
        manager.commit()?
    };

    Ok(GenerateReport {
        output_dir: opts.output_dir.display().to_string(),
        warnings,
        commit,
    })
}
