use std::{
    fmt,
    io::{self, ErrorKind},
    path::{Path, PathBuf},
};

use crate::{Properties, normalize_folder};

/// Identity of a generated file: project, folder and name.
///
/// Two registrations with the same identity refer to the same file on disk.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId {
    project: String,
    folder: String,
    name: String,
}

impl FileId {
    /// Create an identity in the default project. The folder is normalized.
    pub fn new(name: impl Into<String>, folder: impl AsRef<str>) -> Self {
        Self {
            project: String::new(),
            folder: normalize_folder(folder.as_ref()),
            name: name.into(),
        }
    }

    /// Set the target project (empty string is the default project).
    pub fn in_project(mut self, project: impl Into<String>) -> Self {
        self.project = project.into();
        self
    }

    pub fn project(&self) -> &str {
        &self.project
    }

    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path relative to the project root, e.g. `Dtos/PersonDto.g.cs`.
    pub fn relative_path(&self) -> PathBuf {
        let mut path = PathBuf::new();
        for segment in self.folder.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.push(&self.name);
        path
    }

    /// Forward-slash relative path, stable across platforms.
    pub fn display_path(&self) -> String {
        if self.folder.is_empty() {
            self.name.clone()
        } else {
            format!("{}/{}", self.folder, self.name)
        }
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.project.is_empty() {
            write!(f, "{}", self.display_path())
        } else {
            write!(f, "{}:{}", self.project, self.display_path())
        }
    }
}

/// A file registered for generation but not yet committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingFile {
    pub id: FileId,
    pub content: String,
    pub properties: Properties,
}

impl PendingFile {
    /// Create a pending file at the root of the default project.
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: FileId::new(name, ""),
            content: content.into(),
            properties: Properties::default(),
        }
    }

    pub fn folder(mut self, folder: impl AsRef<str>) -> Self {
        self.id.folder = normalize_folder(folder.as_ref());
        self
    }

    pub fn project(mut self, project: impl Into<String>) -> Self {
        self.id.project = project.into();
        self
    }

    pub fn properties(mut self, properties: Properties) -> Self {
        self.properties = properties;
        self
    }
}

/// How to handle files that already exist on disk
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Overwrite {
    /// Overwrite when the content differs
    #[default]
    Always,
    /// Only create if the file doesn't exist
    IfMissing,
}

impl Overwrite {
    /// Map the `can_overwrite_existing_file` flag onto a policy.
    pub fn from_flag(can_overwrite_existing_file: bool) -> Self {
        if can_overwrite_existing_file {
            Overwrite::Always
        } else {
            Overwrite::IfMissing
        }
    }

    pub fn can_overwrite(&self) -> bool {
        matches!(self, Overwrite::Always)
    }

    /// Decide what happens to a registered file given what is on disk.
    pub fn decide(&self, existing: Option<&[u8]>, generated: &[u8]) -> FileAction {
        match (existing, self) {
            (None, _) => FileAction::Created,
            (Some(_), Overwrite::IfMissing) => FileAction::Preserved,
            (Some(current), Overwrite::Always) if current == generated => FileAction::Unchanged,
            (Some(_), Overwrite::Always) => FileAction::Updated,
        }
    }

    /// Decide what happens to a file from a previous run that was not registered again.
    pub fn decide_stale(&self) -> FileAction {
        match self {
            Overwrite::Always => FileAction::Deleted,
            Overwrite::IfMissing => FileAction::Retained,
        }
    }
}

/// Outcome for a single file of a commit
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FileAction {
    /// File did not exist and was written
    Created,
    /// File existed with different content and was overwritten
    Updated,
    /// File existed with identical content and was left untouched
    Unchanged,
    /// File existed and overwriting is disabled
    Preserved,
    /// File from a previous run is no longer generated and was removed
    Deleted,
    /// File from a previous run is no longer generated but was kept
    Retained,
}

impl FileAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            FileAction::Created => "created",
            FileAction::Updated => "updated",
            FileAction::Unchanged => "unchanged",
            FileAction::Preserved => "preserved",
            FileAction::Deleted => "deleted",
            FileAction::Retained => "retained",
        }
    }

    /// Whether this action writes to disk.
    pub fn writes(&self) -> bool {
        matches!(self, FileAction::Created | FileAction::Updated)
    }

    /// Whether the file remains part of the generated set after the commit.
    pub fn is_tracked(&self) -> bool {
        !matches!(self, FileAction::Deleted)
    }
}

impl fmt::Display for FileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Write bytes to a file, creating parent directories as needed.
pub fn write_file(path: &Path, content: &[u8]) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, content)
}

/// Read a file's bytes, returning `None` if it does not exist.
pub fn read_existing(path: &Path) -> io::Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(bytes) => Ok(Some(bytes)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

/// Remove `dir` and its parents while they are empty, stopping at `base`.
pub fn remove_empty_dirs(dir: &Path, base: &Path) -> io::Result<()> {
    if dir == base || !dir.starts_with(base) {
        return Ok(());
    }

    if std::fs::read_dir(dir)?.next().is_none() {
        std::fs::remove_dir(dir)?;
        if let Some(parent) = dir.parent() {
            remove_empty_dirs(parent, base)?;
        }
    }

    Ok(())
}
