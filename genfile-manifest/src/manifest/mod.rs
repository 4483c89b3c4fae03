//! Manifest types and parsing for genfile.toml files.

mod entry;
mod file;
mod parse;
mod settings;

use std::{collections::HashMap, path::PathBuf};

pub use entry::FileEntry;
pub use file::GenfileToml;
use genfile_core::FileId;
use indexmap::IndexMap;
use serde::Deserialize;
pub use settings::{DEFAULT_RECORD, Settings};
use toml::Spanned;

/// Root manifest for genfile.toml
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    /// Generation settings
    #[serde(default)]
    pub settings: Settings,

    /// Named output roots, relative to the output directory
    #[serde(default)]
    pub projects: IndexMap<String, Spanned<PathBuf>>,

    /// Files to generate, in order
    #[serde(default)]
    pub files: Vec<FileEntry>,
}

impl Manifest {
    /// Identities registered more than once. The last registration wins.
    pub fn duplicate_ids(&self) -> Vec<FileId> {
        let mut counts: HashMap<FileId, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for id in self.files.iter().map(FileEntry::id) {
            let count = counts.entry(id.clone()).or_default();
            *count += 1;
            if *count == 2 {
                duplicates.push(id);
            }
        }
        duplicates
    }

    /// Root directory of a project relative to the output directory.
    ///
    /// The empty project name is the output directory itself.
    pub fn project_root(&self, project: &str) -> Option<PathBuf> {
        if project.is_empty() {
            return Some(PathBuf::new());
        }
        self.projects.get(project).map(|root| root.get_ref().clone())
    }
}
