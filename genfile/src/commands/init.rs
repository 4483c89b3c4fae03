use std::path::PathBuf;

use clap::Args;
use eyre::{Context, Result};

#[derive(Args)]
pub struct InitCommand {
    /// Where to write the starter manifest
    #[arg(default_value = "genfile.toml")]
    pub path: PathBuf,
}

const STARTER: &str = r#"[settings]
can_overwrite_existing_file = true
encoding = "utf-8"
header = "// <auto-generated />\n"

[[files]]
name = "Example.g.cs"
folder = "Generated"
content = """
namespace Example
{
    public class Example
    {
    }
}
"""

[files.properties]
CustomTool = "TextTemplatingFileGenerator"
"#;

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        if self.path.exists() {
            eyre::bail!("'{}' already exists", self.path.display());
        }

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .wrap_err_with(|| format!("Failed to create '{}'", parent.display()))?;
        }
        std::fs::write(&self.path, STARTER)
            .wrap_err_with(|| format!("Failed to write '{}'", self.path.display()))?;

        println!("Created {}", self.path.display());
        println!();
        println!("Next steps:");
        println!("  genfile generate --dry-run");
        println!("  genfile generate");
        Ok(())
    }
}
