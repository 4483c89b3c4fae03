//! Generate command report data structures.

use genfile_core::FileAction;
use genfile_tracker::CommitReport;

use super::output::{Output, Report};

/// Report data from a generation run.
#[derive(Debug)]
pub struct GenerateReport {
    /// Output directory, as given on the command line.
    pub output_dir: String,
    /// Manifest warnings (e.g. duplicate entries).
    pub warnings: Vec<String>,
    /// Per-file outcome of the commit or plan.
    pub commit: CommitReport,
}

/// Listed actions, with their heading after a run and during a dry run.
const GROUPS: &[(FileAction, &str, &str)] = &[
    (FileAction::Created, "Created", "Would create"),
    (FileAction::Updated, "Updated", "Would update"),
    (FileAction::Deleted, "Deleted", "Would delete"),
    (
        FileAction::Preserved,
        "Kept (overwriting disabled)",
        "Would keep (overwriting disabled)",
    ),
    (
        FileAction::Retained,
        "Kept (no longer generated)",
        "Would keep (no longer generated)",
    ),
];

impl Report for GenerateReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        let commit = &self.commit;
        if commit.entries.is_empty() {
            out.preformatted("Nothing to generate.");
            return;
        }

        for (action, done, planned) in GROUPS {
            let mut entries = commit.with_action(*action).peekable();
            if entries.peek().is_none() {
                continue;
            }

            out.section(if commit.dry_run { planned } else { done });
            for entry in entries {
                let path = entry.id.to_string();
                match action {
                    FileAction::Created => out.added_item(&path),
                    FileAction::Updated => out.changed_item(&path),
                    FileAction::Deleted => out.removed_item(&path),
                    _ => out.list_item(&path),
                }
            }
        }

        out.newline();
        let unchanged = commit.count(FileAction::Unchanged);
        if unchanged > 0 {
            out.key_value("Unchanged", &unchanged.to_string());
        }
        out.key_value("Output", &self.output_dir);

        if commit.dry_run {
            out.newline();
            out.preformatted("Dry run, no files were written.");
        }
    }
}
