//! Core types for the genfile generated-file manager.
//!
//! This crate provides the primitives shared by the manifest, the tracker
//! and the CLI: pending files and their identity, property bags, output
//! encodings and the low-level write helpers.

mod encoding;
mod file;
mod path;
mod property;

// Output encoding
pub use encoding::Encoding;
// File operations
pub use file::{
    FileAction, FileId, Overwrite, PendingFile, read_existing, remove_empty_dirs, write_file,
};
// Path validation
pub use path::{is_within, normalize_folder, validate_file_name, validate_folder};
// Property bag
pub use property::{Properties, Property, PropertyValue};
