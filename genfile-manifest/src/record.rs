//! Generation record: the files a previous run produced.
//!
//! The record is stored as TOML next to the generated output and stands in
//! for IDE project items nested under a template. It is how a later run
//! knows which files it owns and may delete.

use std::path::Path;

use genfile_core::{FileId, Properties, validate_file_name, validate_folder};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Current record format version.
pub const RECORD_VERSION: u32 = 1;

/// Persisted list of generated files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationRecord {
    pub version: u32,
    #[serde(default)]
    pub files: Vec<RecordedFile>,
}

/// One generated file in the record.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RecordedFile {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project: String,
    /// Forward-slash path relative to the project root
    pub path: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl RecordedFile {
    pub fn new(id: &FileId, properties: Properties) -> Self {
        Self {
            project: id.project().to_string(),
            path: id.display_path(),
            properties,
        }
    }

    fn split_path(&self) -> (&str, &str) {
        self.path.rsplit_once('/').unwrap_or(("", self.path.as_str()))
    }

    /// Rebuild the identity from the stored path.
    ///
    /// The path is not checked; use [`RecordedFile::checked_id`] for
    /// anything read back from disk.
    pub fn id(&self) -> FileId {
        let (folder, name) = self.split_path();
        FileId::new(name, folder).in_project(self.project.as_str())
    }

    /// Rebuild the identity, rejecting paths that leave the project root.
    /// Returns the reason when the stored path is not a valid relative path.
    pub fn checked_id(&self) -> std::result::Result<FileId, &'static str> {
        let (folder, name) = self.split_path();
        if let Some(reason) = validate_file_name(name) {
            return Err(reason);
        }
        if let Some(reason) = validate_folder(folder) {
            return Err(reason);
        }
        Ok(self.id())
    }
}

impl Default for GenerationRecord {
    fn default() -> Self {
        Self {
            version: RECORD_VERSION,
            files: Vec::new(),
        }
    }
}

impl GenerationRecord {
    pub fn new(files: Vec<RecordedFile>) -> Self {
        Self {
            version: RECORD_VERSION,
            files,
        }
    }

    /// Load a record, returning an empty one if the file does not exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => {
                return Err(Box::new(Error::Io {
                    path: path.to_path_buf(),
                    source: e,
                }));
            }
        };

        let record: Self = toml::from_str(&content).map_err(|e| {
            Box::new(Error::Record {
                path: path.to_path_buf(),
                source: e,
            })
        })?;

        if record.version != RECORD_VERSION {
            return Err(Box::new(Error::RecordVersion {
                path: path.to_path_buf(),
                found: record.version,
                expected: RECORD_VERSION,
            }));
        }

        Ok(record)
    }

    /// Write the record, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| Box::new(Error::RecordSerialize { source: e }))?;
        genfile_core::write_file(path, content.as_bytes()).map_err(|e| {
            Box::new(Error::Write {
                path: path.to_path_buf(),
                source: e,
            })
        })
    }

    /// Remove the record file if present.
    pub fn remove(path: &Path) -> Result<()> {
        match std::fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(Box::new(Error::Write {
                path: path.to_path_buf(),
                source: e,
            })),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
