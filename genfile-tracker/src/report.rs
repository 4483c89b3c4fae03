use std::path::PathBuf;

use genfile_core::{FileAction, FileId, Properties};

/// Outcome for one file of a commit (or of a planned commit).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitEntry {
    pub id: FileId,
    /// Absolute or output-relative path on disk
    pub path: PathBuf,
    pub action: FileAction,
    pub properties: Properties,
}

/// Result of committing (or planning) a set of pending files.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommitReport {
    /// Whether the report only describes what would happen
    pub dry_run: bool,
    /// Registered files first, in registration order, then stale files
    pub entries: Vec<CommitEntry>,
    /// Template output that was not captured into any file
    pub main_output: String,
}

impl CommitReport {
    /// Entries with the given action, in order.
    pub fn with_action(&self, action: FileAction) -> impl Iterator<Item = &CommitEntry> {
        self.entries.iter().filter(move |e| e.action == action)
    }

    pub fn count(&self, action: FileAction) -> usize {
        self.with_action(action).count()
    }

    /// Action taken for a file, if it took part in the commit.
    pub fn action_for(&self, id: &FileId) -> Option<FileAction> {
        self.entries.iter().find(|e| &e.id == id).map(|e| e.action)
    }

    /// Whether the commit changed anything on disk.
    pub fn has_changes(&self) -> bool {
        self.entries
            .iter()
            .any(|e| e.action.writes() || e.action == FileAction::Deleted)
    }
}
