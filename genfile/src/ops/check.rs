//! Check operation - validate a manifest and its template sources.

use genfile_manifest::{GenfileToml, Result};

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Parsing already happened when the manifest was opened; this also makes
/// sure every `source` file can be read.
pub fn check(genfile: &GenfileToml) -> Result<CheckReport> {
    let manifest = genfile.manifest();
    let files = genfile.pending_files()?;

    let warnings = manifest
        .duplicate_ids()
        .into_iter()
        .map(|id| format!("'{}' is listed more than once, the last entry wins", id))
        .collect();

    Ok(CheckReport {
        path: genfile.path().display().to_string(),
        warnings,
        file_count: files.len(),
        project_count: manifest.projects.len(),
        can_overwrite: manifest.settings.can_overwrite_existing_file,
        encoding: manifest.settings.encoding.to_string(),
        record: manifest.settings.record.clone(),
    })
}
