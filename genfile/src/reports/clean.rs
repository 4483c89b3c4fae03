//! Clean command report data structures.

use super::output::{Output, Report};

/// Report data from cleaning generated files.
#[derive(Debug, Default)]
pub struct CleanReport {
    /// Whether this was a dry run.
    pub dry_run: bool,
    /// Warning messages.
    pub warnings: Vec<String>,
    /// Deleted files (or files that would be deleted).
    pub deleted: Vec<String>,
    /// Recorded files already absent from disk.
    pub missing: Vec<String>,
}

impl CleanReport {
    /// Whether any files were deleted (or would be deleted in dry run).
    pub fn has_deletions(&self) -> bool {
        !self.deleted.is_empty()
    }
}

impl Report for CleanReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        if !self.has_deletions() && self.missing.is_empty() {
            out.preformatted("No generated files found.");
            return;
        }

        if self.has_deletions() {
            if self.dry_run {
                out.section("Would delete");
            } else {
                out.section("Deleted");
            }
            for path in &self.deleted {
                out.removed_item(path);
            }
        }

        if !self.missing.is_empty() {
            out.newline();
            out.section("Already missing");
            for path in &self.missing {
                out.list_item(&format!("! {}", path));
            }
        }
    }
}
