//! Check command report data structures.

use super::output::{Output, Report};

/// Report data from validating a manifest.
#[derive(Debug)]
pub struct CheckReport {
    /// Manifest path.
    pub path: String,
    /// Warning messages.
    pub warnings: Vec<String>,
    pub file_count: usize,
    pub project_count: usize,
    pub can_overwrite: bool,
    pub encoding: String,
    pub record: String,
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        for warning in &self.warnings {
            out.warning(warning);
        }

        out.preformatted(&format!("{} is valid", self.path));
        out.newline();
        out.key_value("Files", &self.file_count.to_string());
        out.key_value("Projects", &self.project_count.to_string());
        out.key_value(
            "Overwrite existing files",
            if self.can_overwrite { "yes" } else { "no" },
        );
        out.key_value("Encoding", &self.encoding);
        out.key_value("Record", &self.record);
    }
}
