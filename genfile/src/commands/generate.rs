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
pub struct GenerateCommand {
    /// Path to genfile.toml (defaults to ./genfile.toml)
    #[arg(short, long, default_value = "genfile.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview what would be written and deleted without touching disk
    #[arg(long)]
    pub dry_run: bool,

    /// Never overwrite existing files or delete stale ones (overrides genfile.toml)
    #[arg(long)]
    pub no_overwrite: bool,
}

impl GenerateCommand {
    pub fn run(&self) -> Result<()> {
        let genfile = GenfileToml::open(&self.config).unwrap_or_exit();

        let report = ops::generate(
            &genfile,
            ops::generate::GenerateOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
                can_overwrite: self.no_overwrite.then_some(false),
            },
        )
        .unwrap_or_exit();

        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
