use std::path::PathBuf;

use clap::Args;
use eyre::Result;
use genfile_manifest::GenfileToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to genfile.toml (defaults to ./genfile.toml)
    #[arg(short, long, default_value = "genfile.toml")]
    pub config: PathBuf,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let genfile = GenfileToml::open(&self.config).unwrap_or_exit();
        let report = ops::check(&genfile).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
