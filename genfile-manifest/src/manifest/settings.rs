use genfile_core::{Encoding, Overwrite};
use serde::Deserialize;

/// Default location of the generation record, relative to the output directory.
pub const DEFAULT_RECORD: &str = ".genfile.lock";

/// The `[settings]` table.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    /// Whether existing files may be overwritten and stale files deleted
    #[serde(default = "default_can_overwrite")]
    pub can_overwrite_existing_file: bool,

    #[serde(default)]
    pub encoding: Encoding,

    /// Text prepended to every generated file
    #[serde(default)]
    pub header: Option<String>,

    /// Text appended to every generated file
    #[serde(default)]
    pub footer: Option<String>,

    /// Generation record path, relative to the output directory
    #[serde(default = "default_record")]
    pub record: String,
}

fn default_can_overwrite() -> bool {
    true
}

fn default_record() -> String {
    DEFAULT_RECORD.to_string()
}

impl Settings {
    pub fn overwrite(&self) -> Overwrite {
        Overwrite::from_flag(self.can_overwrite_existing_file)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            can_overwrite_existing_file: default_can_overwrite(),
            encoding: Encoding::default(),
            header: None,
            footer: None,
            record: default_record(),
        }
    }
}
