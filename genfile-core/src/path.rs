//! Validation and normalization of generated file names and folders.

use std::path::{Component, Path};

/// Normalize a folder to forward-slash separated form.
///
/// Backslashes are treated as separators, empty and `.` segments are dropped.
/// A leading separator is kept so rooted folders still fail
/// [`validate_folder`]. The empty string denotes the output root.
pub fn normalize_folder(folder: &str) -> String {
    let joined = folder
        .split(['/', '\\'])
        .filter(|segment| !segment.is_empty() && *segment != ".")
        .collect::<Vec<_>>()
        .join("/");
    if folder.starts_with(['/', '\\']) {
        format!("/{joined}")
    } else {
        joined
    }
}

/// Validate a generated file name.
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_file_name(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        return Some("file name is empty");
    }
    if name.contains(['/', '\\']) {
        return Some("file name must not contain path separators, use the folder instead");
    }
    if name == "." || name == ".." {
        return Some("file name must not be '.' or '..'");
    }
    None
}

/// Validate a folder relative to the output root.
/// Returns None if valid, Some(reason) if invalid.
pub fn validate_folder(folder: &str) -> Option<&'static str> {
    if folder.starts_with(['/', '\\']) || has_drive_prefix(folder) {
        return Some("folder must be relative to the output directory");
    }
    if folder.split(['/', '\\']).any(|segment| segment == "..") {
        return Some("folder must not contain '..'");
    }
    None
}

fn has_drive_prefix(folder: &str) -> bool {
    let bytes = folder.as_bytes();
    bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':'
}

/// Whether `path` lies strictly below `root`, compared lexically.
///
/// Only plain components may follow the root; `..`, `.` and rooted
/// components after it are rejected.
pub fn is_within(path: &Path, root: &Path) -> bool {
    match path.strip_prefix(root) {
        Ok(rest) => {
            rest.components().next().is_some()
                && rest.components().all(|c| matches!(c, Component::Normal(_)))
        }
        Err(_) => false,
    }
}
