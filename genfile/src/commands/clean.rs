use std::path::PathBuf;

use clap::Args;
use dialoguer::{Confirm, theme::ColorfulTheme};
use eyre::{Context, Result};
use genfile_manifest::GenfileToml;

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CleanCommand {
    /// Path to genfile.toml (defaults to ./genfile.toml)
    #[arg(short, long, default_value = "genfile.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to current directory)
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,

    /// Preview what would be deleted without actually deleting
    #[arg(long)]
    pub dry_run: bool,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

impl CleanCommand {
    pub fn run(&self) -> Result<()> {
        let genfile = GenfileToml::open(&self.config).unwrap_or_exit();
        let manifest = genfile.manifest();

        if !self.dry_run && !self.yes && !Self::confirm()? {
            return Ok(());
        }

        let report = ops::clean(
            manifest,
            ops::clean::CleanOptions {
                output_dir: &self.output,
                dry_run: self.dry_run,
            },
        )
        .unwrap_or_exit();

        report.render(&mut TerminalOutput::new());
        Ok(())
    }

    fn confirm() -> Result<bool> {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt("Delete every file recorded by the last generation?")
            .default(false)
            .interact()
            .wrap_err("Failed to read confirmation")
    }
}
