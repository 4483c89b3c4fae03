//! Report data structures for commands.
//!
//! This module provides data structures that separate data collection from rendering.
//! Commands build reports, then render them to an Output target.

mod check;
mod clean;
mod generate;
mod list;
mod output;

pub use check::CheckReport;
pub use clean::CleanReport;
pub use generate::GenerateReport;
pub use list::{ListReport, ListedFile};
pub use output::{Report, TerminalOutput};
