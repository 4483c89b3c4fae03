use std::{
    collections::HashSet,
    fmt,
    path::{Path, PathBuf},
};

use genfile_core::{
    Encoding, FileAction, FileId, Overwrite, PendingFile, Properties, is_within, read_existing,
    remove_empty_dirs, validate_file_name, validate_folder, write_file,
};
use genfile_manifest::{Manifest, Settings};
use indexmap::IndexMap;

use crate::{CommitEntry, CommitReport, Error, ProjectHost, Result, TrackedItem};

/// Options applied to every file a [`FileManager`] commits.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Options {
    pub overwrite: Overwrite,
    pub encoding: Encoding,
    /// Text prepended to every file
    pub header: Option<String>,
    /// Text appended to every file
    pub footer: Option<String>,
}

impl From<&Settings> for Options {
    fn from(settings: &Settings) -> Self {
        Self {
            overwrite: settings.overwrite(),
            encoding: settings.encoding,
            header: settings.header.clone(),
            footer: settings.footer.clone(),
        }
    }
}

/// Collects files to generate and commits them in one pass.
///
/// Files are either registered with explicit content ([`FileManager::register`])
/// or captured as blocks: after [`FileManager::create_new_file`], everything
/// written through [`fmt::Write`] goes to that file until the next block
/// starts. Text written outside any block is the template's main output.
pub struct FileManager<H> {
    output_dir: PathBuf,
    options: Options,
    /// Project name -> root relative to `output_dir`
    projects: IndexMap<String, PathBuf>,
    host: H,
    pending: IndexMap<FileId, PendingFile>,
    current: Option<FileId>,
    main_output: String,
}

struct PlannedEntry {
    entry: CommitEntry,
    bytes: Option<Vec<u8>>,
    root: PathBuf,
}

impl<H: ProjectHost> FileManager<H> {
    pub fn new(output_dir: impl Into<PathBuf>, host: H) -> Self {
        Self {
            output_dir: output_dir.into(),
            options: Options::default(),
            projects: IndexMap::new(),
            host,
            pending: IndexMap::new(),
            current: None,
            main_output: String::new(),
        }
    }

    /// Configure a manager from a manifest's settings and projects.
    pub fn from_manifest(
        manifest: &Manifest,
        output_dir: impl Into<PathBuf>,
        host: H,
    ) -> Result<Self> {
        let mut manager =
            Self::new(output_dir, host).with_options(Options::from(&manifest.settings));
        for (name, root) in &manifest.projects {
            manager.add_project(name.as_str(), root.get_ref())?;
        }
        Ok(manager)
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn can_overwrite_existing_file(&self) -> bool {
        self.options.overwrite.can_overwrite()
    }

    /// When disabled, existing files are never touched and stale files are kept.
    pub fn set_can_overwrite_existing_file(&mut self, can_overwrite: bool) {
        self.options.overwrite = Overwrite::from_flag(can_overwrite);
    }

    /// Declare a project whose files live under `root` (relative to the output directory).
    pub fn add_project(
        &mut self,
        name: impl Into<String>,
        root: impl Into<PathBuf>,
    ) -> Result<()> {
        let name = name.into();
        let root = root.into();
        let root_str = root.to_string_lossy();
        if let Some(reason) = validate_folder(&root_str) {
            return Err(Box::new(Error::InvalidProjectRoot {
                project: name,
                root: root_str.into_owned(),
                reason: reason.to_string(),
            }));
        }
        self.projects.insert(name, root);
        Ok(())
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Pending files in commit order.
    pub fn pending(&self) -> impl Iterator<Item = &PendingFile> {
        self.pending.values()
    }

    /// Text written outside of any file block.
    pub fn main_output(&self) -> &str {
        &self.main_output
    }

    /// Register a file with explicit content.
    ///
    /// Registering an identity again replaces its content and properties;
    /// the file keeps its original position in commit order.
    pub fn register(&mut self, file: PendingFile) -> Result<()> {
        self.validate(&file.id)?;
        self.end_file();
        tracing::trace!(file = %file.id, "registered");
        self.pending.insert(file.id.clone(), file);
        Ok(())
    }

    /// Start a new file block.
    ///
    /// Closes the current block; text written afterwards becomes the content
    /// of `name` in `folder` of `project` (empty for the default project).
    pub fn create_new_file(
        &mut self,
        name: &str,
        project: &str,
        folder: &str,
        properties: Properties,
    ) -> Result<()> {
        let file = PendingFile::new(name, String::new())
            .folder(folder)
            .project(project)
            .properties(properties);
        let id = file.id.clone();
        self.register(file)?;
        self.current = Some(id);
        Ok(())
    }

    /// Close the current block; further text goes to the main output.
    pub fn end_file(&mut self) {
        self.current = None;
    }

    fn validate(&self, id: &FileId) -> Result<()> {
        if let Some(reason) = validate_file_name(id.name()) {
            return Err(Box::new(Error::InvalidName {
                name: id.name().to_string(),
                reason: reason.to_string(),
            }));
        }
        if let Some(reason) = validate_folder(id.folder()) {
            return Err(Box::new(Error::InvalidFolder {
                name: id.name().to_string(),
                folder: id.folder().to_string(),
                reason: reason.to_string(),
            }));
        }
        if self.project_root(id.project()).is_none() {
            return Err(Box::new(Error::UnknownProject {
                name: id.name().to_string(),
                project: id.project().to_string(),
            }));
        }
        Ok(())
    }

    fn project_root(&self, project: &str) -> Option<PathBuf> {
        if project.is_empty() {
            return Some(self.output_dir.clone());
        }
        self.projects.get(project).map(|root| self.output_dir.join(root))
    }

    fn render(&self, file: &PendingFile) -> Vec<u8> {
        let header = self.options.header.as_deref().unwrap_or_default();
        let footer = self.options.footer.as_deref().unwrap_or_default();
        let text = format!("{}{}{}", header, file.content, footer);
        self.options.encoding.encode(&text)
    }

    /// Compute what a commit would do without touching disk.
    pub fn plan(&self) -> Result<CommitReport> {
        let entries = self.build_plan()?.into_iter().map(|p| p.entry).collect();
        Ok(CommitReport {
            dry_run: true,
            entries,
            main_output: self.main_output.clone(),
        })
    }

    fn build_plan(&self) -> Result<Vec<PlannedEntry>> {
        let overwrite = self.options.overwrite;
        let mut planned = Vec::with_capacity(self.pending.len());
        let mut registered_paths = HashSet::with_capacity(self.pending.len());

        for file in self.pending.values() {
            let root = self
                .project_root(file.id.project())
                .ok_or_else(|| Error::UnknownProject {
                    name: file.id.name().to_string(),
                    project: file.id.project().to_string(),
                })?;
            let path = root.join(file.id.relative_path());
            registered_paths.insert(path.clone());
            let bytes = self.render(file);
            let existing = read_existing(&path).map_err(|e| Error::io(&path, e))?;
            let action = overwrite.decide(existing.as_deref(), &bytes);
            tracing::debug!(file = %file.id, %action, "planned");

            planned.push(PlannedEntry {
                entry: CommitEntry {
                    id: file.id.clone(),
                    path,
                    action,
                    properties: file.properties.clone(),
                },
                bytes: action.writes().then_some(bytes),
                root,
            });
        }

        for item in self.host.load_items()? {
            if self.pending.contains_key(&item.id) {
                continue;
            }

            let Some(root) = self.project_root(item.id.project()) else {
                tracing::warn!(
                    file = %item.id,
                    "project of previously generated file is no longer declared, keeping it"
                );
                planned.push(PlannedEntry {
                    entry: CommitEntry {
                        path: PathBuf::from(item.id.display_path()),
                        id: item.id,
                        action: FileAction::Retained,
                        properties: item.properties,
                    },
                    bytes: None,
                    root: self.output_dir.clone(),
                });
                continue;
            };

            let path = root.join(item.id.relative_path());
            if !is_within(&path, &self.output_dir) {
                tracing::warn!(
                    file = %item.id,
                    path = %path.display(),
                    "previously generated file is outside the output directory, ignoring it"
                );
                continue;
            }
            // Another identity registered this run resolves to the same file.
            if registered_paths.contains(&path) {
                continue;
            }
            if !path.exists() {
                tracing::debug!(file = %item.id, "previously generated file is already gone");
                continue;
            }

            let action = overwrite.decide_stale();
            tracing::debug!(file = %item.id, %action, "planned stale");
            planned.push(PlannedEntry {
                entry: CommitEntry {
                    id: item.id,
                    path,
                    action,
                    properties: item.properties,
                },
                bytes: None,
                root,
            });
        }

        Ok(planned)
    }

    /// Write, skip and delete files, then hand the new item set to the host.
    pub fn commit(&mut self) -> Result<CommitReport> {
        self.end_file();
        let planned = self.build_plan()?;

        for planned_entry in &planned {
            let entry = &planned_entry.entry;
            match entry.action {
                FileAction::Created | FileAction::Updated => {
                    let bytes = planned_entry.bytes.as_deref().unwrap_or_default();
                    write_file(&entry.path, bytes).map_err(|e| Error::io(&entry.path, e))?;
                }
                FileAction::Deleted => {
                    match std::fs::remove_file(&entry.path) {
                        Ok(()) => {}
                        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                        Err(e) => return Err(Error::io(&entry.path, e)),
                    }
                    if let Some(parent) = entry.path.parent() {
                        if let Err(e) = remove_empty_dirs(parent, &planned_entry.root) {
                            tracing::warn!(
                                path = %parent.display(),
                                error = %e,
                                "failed to prune empty directory"
                            );
                        }
                    }
                }
                FileAction::Unchanged | FileAction::Preserved | FileAction::Retained => {}
            }
        }

        let items: Vec<TrackedItem> = planned
            .iter()
            .filter(|p| p.entry.action.is_tracked())
            .map(|p| TrackedItem::new(p.entry.id.clone(), p.entry.properties.clone()))
            .collect();
        self.host.save_items(&items)?;

        let report = CommitReport {
            dry_run: false,
            entries: planned.into_iter().map(|p| p.entry).collect(),
            main_output: self.main_output.clone(),
        };
        tracing::info!(
            created = report.count(FileAction::Created),
            updated = report.count(FileAction::Updated),
            unchanged = report.count(FileAction::Unchanged),
            preserved = report.count(FileAction::Preserved),
            deleted = report.count(FileAction::Deleted),
            retained = report.count(FileAction::Retained),
            "commit finished"
        );
        Ok(report)
    }
}

impl<H> fmt::Write for FileManager<H> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        match &self.current {
            Some(id) => match self.pending.get_mut(id) {
                Some(file) => file.content.push_str(s),
                None => return Err(fmt::Error),
            },
            None => self.main_output.push_str(s),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{fmt::Write, fs};

    use genfile_core::Property;
    use tempfile::TempDir;

    use super::*;
    use crate::MemoryHost;

    fn manager(temp: &TempDir) -> FileManager<MemoryHost> {
        FileManager::new(temp.path(), MemoryHost::new())
    }

    #[test]
    fn test_block_capture() {
        let temp = TempDir::new().unwrap();
        let mut fm = manager(&temp);

        write!(fm, "main before").unwrap();
        fm.create_new_file("PersonDto.g.cs", "", "", Properties::new())
            .unwrap();
        write!(fm, "class PersonDto {{}}").unwrap();
        fm.create_new_file("OrderDto.g.cs", "", "Dtos", Properties::new())
            .unwrap();
        write!(fm, "class OrderDto {{}}").unwrap();
        fm.end_file();
        write!(fm, " and after").unwrap();

        let contents: Vec<&str> = fm.pending().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["class PersonDto {}", "class OrderDto {}"]);
        assert_eq!(fm.main_output(), "main before and after");
    }

    #[test]
    fn test_register_same_identity_replaces_in_place() {
        let temp = TempDir::new().unwrap();
        let mut fm = manager(&temp);

        fm.register(PendingFile::new("a.cs", "first")).unwrap();
        fm.register(PendingFile::new("b.cs", "b")).unwrap();
        fm.register(PendingFile::new("a.cs", "second")).unwrap();

        let files: Vec<(String, &str)> = fm
            .pending()
            .map(|f| (f.id.display_path(), f.content.as_str()))
            .collect();
        assert_eq!(
            files,
            vec![("a.cs".to_string(), "second"), ("b.cs".to_string(), "b")]
        );
    }

    #[test]
    fn test_register_rejects_invalid_paths() {
        let temp = TempDir::new().unwrap();
        let mut fm = manager(&temp);

        let err = fm.register(PendingFile::new("", "x")).unwrap_err();
        assert!(matches!(*err, Error::InvalidName { .. }));

        let err = fm
            .register(PendingFile::new("a.cs", "x").folder("../escape"))
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidFolder { .. }));

        let err = fm
            .register(PendingFile::new("a.cs", "x").folder("/etc"))
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidFolder { .. }));

        let err = fm
            .create_new_file("a.cs", "", "\\etc", Properties::new())
            .unwrap_err();
        assert!(matches!(*err, Error::InvalidFolder { .. }));

        let err = fm
            .register(PendingFile::new("a.cs", "x").project("Missing"))
            .unwrap_err();
        assert!(matches!(*err, Error::UnknownProject { .. }));

        assert_eq!(fm.pending().count(), 0);
    }

    #[test]
    fn test_plan_does_not_touch_disk() {
        let temp = TempDir::new().unwrap();
        let mut fm = manager(&temp);
        fm.register(PendingFile::new("a.cs", "x").folder("Models"))
            .unwrap();

        let report = fm.plan().unwrap();

        assert!(report.dry_run);
        assert_eq!(report.count(FileAction::Created), 1);
        assert!(!temp.path().join("Models").exists());
        assert!(fm.host().items().is_empty());
    }

    #[test]
    fn test_header_footer_and_bom() {
        let temp = TempDir::new().unwrap();
        let mut fm = manager(&temp).with_options(Options {
            overwrite: Overwrite::Always,
            encoding: Encoding::Utf8Bom,
            header: Some("// <auto-generated />\n".to_string()),
            footer: Some("\n// end".to_string()),
        });
        fm.register(PendingFile::new("a.cs", "class A {}")).unwrap();

        fm.commit().unwrap();

        let bytes = fs::read(temp.path().join("a.cs")).unwrap();
        assert_eq!(&bytes[..3], &[0xEF, 0xBB, 0xBF]);
        assert_eq!(
            std::str::from_utf8(&bytes[3..]).unwrap(),
            "// <auto-generated />\nclass A {}\n// end"
        );
    }

    #[test]
    fn test_projects_resolve_under_output_dir() {
        let temp = TempDir::new().unwrap();
        let mut fm = manager(&temp);
        fm.add_project("Core", "src/Core").unwrap();
        fm.register(PendingFile::new("a.cs", "x").project("Core").folder("Models"))
            .unwrap();

        fm.commit().unwrap();

        assert!(
            temp.path()
                .join("src")
                .join("Core")
                .join("Models")
                .join("a.cs")
                .exists()
        );
    }

    #[test]
    fn test_properties_reach_host_even_when_preserved() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.cs"), "hand written").unwrap();
        let mut fm = manager(&temp);
        fm.set_can_overwrite_existing_file(false);
        fm.register(
            PendingFile::new("a.cs", "generated")
                .properties(Properties::new().with(Property::CustomTool, "MyTool")),
        )
        .unwrap();

        let report = fm.commit().unwrap();

        assert_eq!(
            report.action_for(&FileId::new("a.cs", "")),
            Some(FileAction::Preserved)
        );
        assert_eq!(
            fs::read_to_string(temp.path().join("a.cs")).unwrap(),
            "hand written"
        );
        assert_eq!(
            fm.host()
                .properties(&FileId::new("a.cs", ""))
                .and_then(|p| p.custom_tool()),
            Some("MyTool")
        );
    }

    #[test]
    fn test_stale_file_in_undeclared_project_is_retained() {
        let temp = TempDir::new().unwrap();
        let stale = TrackedItem::new(
            FileId::new("old.cs", "").in_project("Gone"),
            Properties::new(),
        );
        let mut fm = FileManager::new(temp.path(), MemoryHost::with_items(vec![stale.clone()]));

        let report = fm.commit().unwrap();

        assert_eq!(report.action_for(&stale.id), Some(FileAction::Retained));
        assert_eq!(fm.host().items(), &[stale]);
    }

    #[test]
    fn test_add_project_rejects_roots_outside_output_dir() {
        let temp = TempDir::new().unwrap();
        let mut fm = manager(&temp);

        for root in ["/etc", "../..", "src/../../up"] {
            let err = fm.add_project("Core", root).unwrap_err();
            assert!(matches!(*err, Error::InvalidProjectRoot { .. }), "{root}");
        }
        let err = fm
            .register(PendingFile::new("a.cs", "x").project("Core"))
            .unwrap_err();
        assert!(matches!(*err, Error::UnknownProject { .. }));
    }

    #[test]
    fn test_stale_file_outside_output_dir_is_not_deleted() {
        let temp = TempDir::new().unwrap();
        let output = temp.path().join("out");
        fs::create_dir_all(&output).unwrap();
        let victim = temp.path().join("victim.txt");
        fs::write(&victim, "keep me").unwrap();
        let stale = TrackedItem::new(FileId::new("victim.txt", ".."), Properties::new());
        let mut fm = FileManager::new(&output, MemoryHost::with_items(vec![stale]));

        let report = fm.commit().unwrap();

        assert!(report.entries.is_empty());
        assert!(victim.exists());
        assert!(fm.host().items().is_empty());
    }

    #[test]
    fn test_stale_identity_aliasing_registered_file_is_kept() {
        let temp = TempDir::new().unwrap();
        let previous = TrackedItem::new(
            FileId::new("a.cs", "").in_project("Core"),
            Properties::new(),
        );
        let mut fm =
            FileManager::new(temp.path(), MemoryHost::with_items(vec![previous.clone()]));
        fm.add_project("Core", "src/Core").unwrap();
        fs::create_dir_all(temp.path().join("src/Core")).unwrap();
        fs::write(temp.path().join("src/Core/a.cs"), "old").unwrap();
        fm.register(PendingFile::new("a.cs", "new").folder("src/Core"))
            .unwrap();

        let report = fm.commit().unwrap();

        assert_eq!(
            report.action_for(&FileId::new("a.cs", "src/Core")),
            Some(FileAction::Updated)
        );
        assert_eq!(report.action_for(&previous.id), None);
        assert_eq!(
            fs::read_to_string(temp.path().join("src/Core/a.cs")).unwrap(),
            "new"
        );
        let tracked: Vec<&FileId> = fm.host().items().iter().map(|item| &item.id).collect();
        assert_eq!(tracked, vec![&FileId::new("a.cs", "src/Core")]);
    }

    #[test]
    fn test_stale_file_already_removed_is_forgotten() {
        let temp = TempDir::new().unwrap();
        let stale = TrackedItem::new(FileId::new("old.cs", ""), Properties::new());
        let mut fm = FileManager::new(temp.path(), MemoryHost::with_items(vec![stale]));

        let report = fm.commit().unwrap();

        assert!(report.entries.is_empty());
        assert!(fm.host().items().is_empty());
    }
}
