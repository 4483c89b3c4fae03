// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Manifest and record formats for genfile.
//!
//! - [`Manifest`] describes a batch of files to generate (`genfile.toml`)
//! - [`GenerationRecord`] lists the files produced by the previous run

mod error;
mod manifest;
mod record;

pub use error::{Error, Result, SourceContext};
pub use manifest::{FileEntry, GenfileToml, Manifest, Settings, DEFAULT_RECORD};
pub use record::{GenerationRecord, RECORD_VERSION, RecordedFile};
