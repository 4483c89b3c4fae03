use std::path::{Path, PathBuf};

use genfile_core::PendingFile;

use super::{FileEntry, Manifest};
use crate::{Error, Result};

/// Represents a genfile.toml file with both raw content and parsed manifest.
pub struct GenfileToml {
    path: PathBuf,
    content: String,
    manifest: Manifest,
}

impl GenfileToml {
    /// Open and parse a genfile.toml file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            Box::new(Error::Io {
                path: path.clone(),
                source: e,
            })
        })?;
        let filename = path.display().to_string();
        let manifest = Manifest::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            manifest,
        })
    }

    /// Get the file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Get the raw content.
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Get the parsed manifest.
    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    /// Directory that `source` paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    /// Load the content of an entry, reading its `source` file if needed.
    pub fn resolve_content(&self, entry: &FileEntry) -> Result<String> {
        if let Some(content) = &entry.content {
            return Ok(content.clone());
        }

        let source = entry
            .source
            .as_ref()
            .map(|s| self.base_dir().join(s.get_ref()))
            .unwrap_or_default();
        std::fs::read_to_string(&source).map_err(|e| {
            Box::new(Error::Source {
                path: source.clone(),
                source: e,
            })
        })
    }

    /// Build the pending files described by the manifest, in order.
    pub fn pending_files(&self) -> Result<Vec<PendingFile>> {
        self.manifest
            .files
            .iter()
            .map(|entry| -> Result<PendingFile> {
                let content = self.resolve_content(entry)?;
                Ok(PendingFile::new(entry.name(), content)
                    .folder(entry.folder())
                    .project(entry.project())
                    .properties(entry.properties.clone()))
            })
            .collect()
    }
}
