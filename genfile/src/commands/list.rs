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
pub struct ListCommand {
    /// Path to genfile.toml (defaults to ./genfile.toml)
    #[arg(short, long, default_value = "genfile.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
}

impl ListCommand {
    pub fn run(&self) -> Result<()> {
        let genfile = GenfileToml::open(&self.config).unwrap_or_exit();
        let report = ops::list(genfile.manifest(), &self.output).unwrap_or_exit();
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
