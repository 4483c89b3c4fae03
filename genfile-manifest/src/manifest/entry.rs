use std::path::PathBuf;

use genfile_core::{FileId, Properties};
use serde::Deserialize;
use toml::Spanned;

/// A `[[files]]` entry.
///
/// Exactly one of `content` and `source` is set; this is checked when the
/// manifest is parsed.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileEntry {
    pub name: Spanned<String>,

    #[serde(default)]
    pub folder: Option<Spanned<String>>,

    #[serde(default)]
    pub project: Option<Spanned<String>>,

    /// Inline content
    #[serde(default)]
    pub content: Option<String>,

    /// Path to a file holding the content, relative to the manifest
    #[serde(default)]
    pub source: Option<Spanned<PathBuf>>,

    #[serde(default)]
    pub properties: Properties,
}

impl FileEntry {
    pub fn name(&self) -> &str {
        self.name.get_ref()
    }

    pub fn folder(&self) -> &str {
        self.folder.as_ref().map_or("", |f| f.get_ref().as_str())
    }

    pub fn project(&self) -> &str {
        self.project.as_ref().map_or("", |p| p.get_ref().as_str())
    }

    /// Identity of the generated file.
    pub fn id(&self) -> FileId {
        FileId::new(self.name(), self.folder()).in_project(self.project())
    }
}
