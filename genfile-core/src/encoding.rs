//! Output encodings for generated files.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Byte encoding used when writing generated files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum Encoding {
    /// UTF-8 without a byte order mark
    #[default]
    #[serde(rename = "utf-8")]
    Utf8,
    /// UTF-8 prefixed with a byte order mark
    #[serde(rename = "utf-8-bom")]
    Utf8Bom,
}

impl Encoding {
    /// Returns the encoding identifier as a static string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf-8",
            Encoding::Utf8Bom => "utf-8-bom",
        }
    }

    /// Encode text into the exact bytes written to disk.
    pub fn encode(&self, content: &str) -> Vec<u8> {
        match self {
            Encoding::Utf8 => content.as_bytes().to_vec(),
            Encoding::Utf8Bom => {
                let mut bytes = Vec::with_capacity(UTF8_BOM.len() + content.len());
                bytes.extend_from_slice(UTF8_BOM);
                bytes.extend_from_slice(content.as_bytes());
                bytes
            }
        }
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Encoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "utf-8" | "utf8" => Ok(Encoding::Utf8),
            "utf-8-bom" | "utf8-bom" | "utf8bom" => Ok(Encoding::Utf8Bom),
            _ => Err(format!(
                "unknown encoding '{}', expected 'utf-8' or 'utf-8-bom'",
                s
            )),
        }
    }
}
