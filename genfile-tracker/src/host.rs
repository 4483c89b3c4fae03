//! Metadata hosts.
//!
//! A host remembers which files the previous run generated and receives the
//! property bag of every file generated by the current run. In an IDE this
//! is the project system; here it is a record file or plain memory.

use std::path::{Path, PathBuf};

use genfile_core::{FileId, Properties};
use genfile_manifest::{GenerationRecord, RecordedFile};

use crate::Result;

/// A generated file known to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedItem {
    pub id: FileId,
    pub properties: Properties,
}

impl TrackedItem {
    pub fn new(id: FileId, properties: Properties) -> Self {
        Self { id, properties }
    }
}

/// Storage for generated-file metadata across runs.
pub trait ProjectHost {
    /// Items generated by the previous run.
    fn load_items(&self) -> Result<Vec<TrackedItem>>;

    /// Replace the stored items with those of the current run.
    fn save_items(&mut self, items: &[TrackedItem]) -> Result<()>;
}

/// Host backed by a TOML generation record.
#[derive(Debug, Clone)]
pub struct RecordHost {
    path: PathBuf,
}

impl RecordHost {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProjectHost for RecordHost {
    fn load_items(&self) -> Result<Vec<TrackedItem>> {
        let record = GenerationRecord::load(&self.path)?;
        let mut items = Vec::with_capacity(record.files.len());
        for file in record.files {
            match file.checked_id() {
                Ok(id) => items.push(TrackedItem::new(id, file.properties)),
                Err(reason) => tracing::warn!(
                    record = %self.path.display(),
                    path = %file.path,
                    reason,
                    "ignoring invalid entry in generation record"
                ),
            }
        }
        Ok(items)
    }

    fn save_items(&mut self, items: &[TrackedItem]) -> Result<()> {
        let record = GenerationRecord::new(
            items
                .iter()
                .map(|item| RecordedFile::new(&item.id, item.properties.clone()))
                .collect(),
        );
        record.save(&self.path)?;
        Ok(())
    }
}

/// In-memory host, useful for embedding and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryHost {
    items: Vec<TrackedItem>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from items generated by an earlier run.
    pub fn with_items(items: Vec<TrackedItem>) -> Self {
        Self { items }
    }

    pub fn items(&self) -> &[TrackedItem] {
        &self.items
    }

    /// Properties recorded for a file, if it is tracked.
    pub fn properties(&self, id: &FileId) -> Option<&Properties> {
        self.items
            .iter()
            .find(|item| &item.id == id)
            .map(|item| &item.properties)
    }
}

impl ProjectHost for MemoryHost {
    fn load_items(&self) -> Result<Vec<TrackedItem>> {
        Ok(self.items.clone())
    }

    fn save_items(&mut self, items: &[TrackedItem]) -> Result<()> {
        self.items = items.to_vec();
        Ok(())
    }
}
