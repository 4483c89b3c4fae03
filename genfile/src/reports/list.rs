//! List command report data structures.

use super::output::{Output, Report};

/// One recorded file.
#[derive(Debug)]
pub struct ListedFile {
    /// Display path, prefixed with the project when not the default one.
    pub path: String,
    /// Whether the file is still on disk.
    pub exists: bool,
    pub properties: Vec<(String, String)>,
}

/// Report data from listing the generation record.
#[derive(Debug)]
pub struct ListReport {
    /// Record path.
    pub record: String,
    pub files: Vec<ListedFile>,
}

impl Report for ListReport {
    fn render(&self, out: &mut dyn Output) {
        if self.files.is_empty() {
            out.preformatted(&format!("No generated files recorded in {}", self.record));
            return;
        }

        out.section(&format!("Generated files ({})", self.files.len()));
        for file in &self.files {
            if file.exists {
                out.list_item(&file.path);
            } else {
                out.list_item(&format!("{} (missing)", file.path));
            }
            for (name, value) in &file.properties {
                out.key_value_indented(name, value);
            }
        }
    }
}
