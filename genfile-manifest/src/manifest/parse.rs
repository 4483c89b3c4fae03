//! Manifest parsing from files and strings.

use std::{path::Path, str::FromStr};

use genfile_core::{validate_file_name, validate_folder};

use super::Manifest;
use crate::{Error, Result, error::SourceContext};

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_manifest(s, "genfile.toml")
    }
}

impl Manifest {
    /// Parse a genfile.toml file from the given path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        parse_manifest(&content, &path.display().to_string())
    }

    /// Parse a genfile.toml from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_manifest(content, filename)
    }
}

/// Parse a manifest from content with the given filename for error reporting.
pub fn parse_manifest(content: &str, filename: &str) -> Result<Manifest> {
    let source_ctx = SourceContext::new(content, filename);
    let manifest: Manifest = toml::from_str(content).map_err(|e| source_ctx.parse_error(e))?;
    validate_manifest(&manifest, &source_ctx)?;
    Ok(manifest)
}

/// Validate the manifest after parsing.
fn validate_manifest(manifest: &Manifest, ctx: &SourceContext) -> Result<()> {
    if manifest.settings.record.trim().is_empty() {
        return Err(ctx.validation_error("settings.record must not be empty"));
    }

    for root in manifest.projects.values() {
        let value = root.get_ref().to_string_lossy();
        if let Some(reason) = validate_folder(&value) {
            return Err(ctx.invalid_path_error(value, "project root", reason, root.span()));
        }
    }

    for entry in &manifest.files {
        if let Some(reason) = validate_file_name(entry.name()) {
            return Err(ctx.invalid_path_error(
                entry.name(),
                "file name",
                reason,
                entry.name.span(),
            ));
        }

        if let Some(folder) = &entry.folder {
            if let Some(reason) = validate_folder(folder.get_ref()) {
                return Err(ctx.invalid_path_error(
                    folder.get_ref().as_str(),
                    "folder",
                    reason,
                    folder.span(),
                ));
            }
        }

        if let Some(project) = &entry.project {
            let name = project.get_ref();
            if !name.is_empty() && !manifest.projects.contains_key(name) {
                let known = if manifest.projects.is_empty() {
                    "none".to_string()
                } else {
                    manifest
                        .projects
                        .keys()
                        .map(String::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                return Err(ctx.unknown_project_error(name.as_str(), known, project.span()));
            }
        }

        match (&entry.content, &entry.source) {
            (Some(_), Some(_)) | (None, None) => {
                return Err(ctx.validation_error_at(
                    format!(
                        "file '{}' must set exactly one of 'content' or 'source'",
                        entry.name()
                    ),
                    entry.name.span(),
                ));
            }
            _ => {}
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_minimal() {
        let manifest = Manifest::from_str(
            r#"
            [[files]]
            name = "TestNoDelete.g.cs"
            folder = "TestOverwrite"
            content = "namespace Test {}"
            "#,
        )
        .unwrap();

        assert!(manifest.settings.can_overwrite_existing_file);
        assert_eq!(manifest.settings.record, ".genfile.lock");
        assert_eq!(manifest.files.len(), 1);
        assert_eq!(
            manifest.files[0].id().display_path(),
            "TestOverwrite/TestNoDelete.g.cs"
        );
    }

    #[test]
    fn test_parse_settings_and_properties() {
        let manifest = Manifest::from_str(
            r#"
            [settings]
            can_overwrite_existing_file = false
            encoding = "utf-8-bom"
            header = "// <auto-generated />\n"

            [projects]
            Core = "src/Core"

            [[files]]
            name = "PersonDtoWithCustom.g.cs"
            project = "Core"
            content = "class PersonDtoWithCustom {}"

            [files.properties]
            CustomTool = "TextTemplatingFileGenerator"
            "#,
        )
        .unwrap();

        assert!(!manifest.settings.can_overwrite_existing_file);
        assert_eq!(manifest.settings.encoding, genfile_core::Encoding::Utf8Bom);
        assert_eq!(
            manifest.settings.header.as_deref(),
            Some("// <auto-generated />\n")
        );
        assert_eq!(
            manifest.files[0].properties.custom_tool(),
            Some("TextTemplatingFileGenerator")
        );
        assert_eq!(
            manifest.project_root("Core"),
            Some(std::path::PathBuf::from("src/Core"))
        );
    }

    #[test]
    fn test_name_with_separator_rejected() {
        let err = Manifest::from_str(
            r#"
            [[files]]
            name = "sub/file.cs"
            content = ""
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::InvalidPath { ref kind, .. } if kind == "file name"));
    }

    #[test]
    fn test_parent_folder_rejected() {
        let err = Manifest::from_str(
            r#"
            [[files]]
            name = "file.cs"
            folder = "../outside"
            content = ""
            "#,
        )
        .unwrap_err();

        assert!(matches!(*err, Error::InvalidPath { ref kind, .. } if kind == "folder"));
    }

    #[test]
    fn test_project_root_outside_output_rejected() {
        for root in ["/etc", "../..", "src\\\\..\\\\.."] {
            let content = format!("[projects]\nCore = \"{root}\"\n");
            let err = Manifest::from_str(&content).unwrap_err();

            match *err {
                Error::InvalidPath { kind, span, .. } => {
                    assert_eq!(kind, "project root");
                    let label = &content[span.offset()..span.offset() + span.len()];
                    assert!(label.contains(root), "{label}");
                }
                other => panic!("unexpected error for {root}: {other:?}"),
            }
        }
    }

    #[test]
    fn test_unknown_project_rejected() {
        let err = Manifest::from_str(
            r#"
            [projects]
            Web = "web"

            [[files]]
            name = "file.cs"
            project = "Core"
            content = ""
            "#,
        )
        .unwrap_err();

        match *err {
            Error::UnknownProject { project, known, .. } => {
                assert_eq!(project, "Core");
                assert_eq!(known, "Web");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_content_and_source_are_exclusive() {
        let err = Manifest::from_str(
            r#"
            [[files]]
            name = "file.cs"
            content = "x"
            source = "x.txt"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));

        let err = Manifest::from_str(
            r#"
            [[files]]
            name = "file.cs"
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_unknown_field_is_parse_error() {
        let err = Manifest::from_str(
            r#"
            [settings]
            overwrite = true
            "#,
        )
        .unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }

    #[test]
    fn test_duplicate_ids() {
        let manifest = Manifest::from_str(
            r#"
            [[files]]
            name = "a.cs"
            content = "first"

            [[files]]
            name = "a.cs"
            folder = "."
            content = "second"

            [[files]]
            name = "b.cs"
            content = "b"
            "#,
        )
        .unwrap();

        let duplicates = manifest.duplicate_ids();
        assert_eq!(duplicates.len(), 1);
        assert_eq!(duplicates[0].display_path(), "a.cs");
    }
}
