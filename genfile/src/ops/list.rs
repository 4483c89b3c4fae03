//! List operation - show the files of the last generation.

use std::path::Path;

use genfile_manifest::{GenerationRecord, Manifest, Result};

use crate::reports::{ListReport, ListedFile};

pub fn list(manifest: &Manifest, output_dir: &Path) -> Result<ListReport> {
    let record_path = output_dir.join(&manifest.settings.record);
    let record = GenerationRecord::load(&record_path)?;

    let files = record
        .files
        .iter()
        .map(|file| {
            let id = file.id();
            let exists = manifest
                .project_root(id.project())
                .map(|root| output_dir.join(root).join(id.relative_path()).exists())
                .unwrap_or(false);
            ListedFile {
                path: id.to_string(),
                exists,
                properties: file
                    .properties
                    .iter()
                    .map(|(name, value)| (name.to_string(), value.to_string()))
                    .collect(),
            }
        })
        .collect();

    Ok(ListReport {
        record: record_path.display().to_string(),
        files,
    })
}
