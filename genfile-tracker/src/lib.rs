// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

//! Generated-file tracker.
//!
//! A [`FileManager`] collects the files a template wants to emit and commits
//! them in one pass: new files are created, changed files are overwritten
//! (unless overwriting is disabled), unchanged files are left alone, and
//! files produced by a previous run that are no longer registered are
//! deleted. Metadata for every generated file is handed to a [`ProjectHost`].
//!
//! # Example
//!
//! ```ignore
//! use std::fmt::Write;
//!
//! let mut manager = FileManager::new("out", RecordHost::new("out/.genfile.lock"));
//! manager.create_new_file("PersonDto.g.cs", "", "Dtos", Properties::new())?;
//! write!(manager, "public class PersonDto {{}}")?;
//! let report = manager.commit()?;
//! ```

mod error;
mod host;
mod manager;
mod report;

pub use error::{Error, Result};
pub use host::{MemoryHost, ProjectHost, RecordHost, TrackedItem};
pub use manager::{FileManager, Options};
pub use report::{CommitEntry, CommitReport};
