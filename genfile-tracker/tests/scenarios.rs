//! End-to-end scenarios: a template run is simulated by building a fresh
//! `FileManager` over the same output directory and record each time.

use std::{
    fmt::Write,
    fs,
    path::Path,
    time::{Duration, SystemTime},
};

use genfile_core::{FileAction, FileId, Properties, Property};
use genfile_tracker::{FileManager, ProjectHost, RecordHost};
use tempfile::TempDir;

const RECORD: &str = ".genfile.lock";

fn manager(output: &Path, can_overwrite: bool) -> FileManager<RecordHost> {
    let mut fm = FileManager::new(output, RecordHost::new(output.join(RECORD)));
    fm.set_can_overwrite_existing_file(can_overwrite);
    fm
}

/// Mirrors a template that emits one class file per block.
fn run_no_delete_template(output: &Path, file_name: &str, class: &str, marker: &str) {
    let mut fm = manager(output, false);
    fm.create_new_file(file_name, "", "TestOverwrite", Properties::new())
        .unwrap();
    write!(
        fm,
        "namespace Test\n{{\npublic class {class}\n{{\n{marker}\n}}\n}}\n"
    )
    .unwrap();
    fm.commit().unwrap();
}

fn read(output: &Path, relative: &str) -> String {
    fs::read_to_string(output.join(relative)).unwrap()
}

#[test]
fn generates_files_with_custom_tool() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();
    let properties =
        Properties::new().with(Property::CustomTool, "TextTemplatingFileGenerator");

    let mut fm = manager(output, true);
    for item in ["PersonDto", "OrderDto"] {
        fm.create_new_file(&format!("{item}WithCustom.g.cs"), "", "", properties.clone())
            .unwrap();
        write!(fm, "namespace Test\n{{\npublic class {item}WithCustom\n{{\n}}\n}}\n").unwrap();
    }
    let report = fm.commit().unwrap();

    assert_eq!(report.count(FileAction::Created), 2);
    assert!(read(output, "PersonDtoWithCustom.g.cs").contains("public class PersonDtoWithCustom"));
    assert!(read(output, "OrderDtoWithCustom.g.cs").contains("public class OrderDtoWithCustom"));

    let items = RecordHost::new(output.join(RECORD)).load_items().unwrap();
    let tools: Vec<(String, Option<&str>)> = items
        .iter()
        .map(|item| (item.id.display_path(), item.properties.custom_tool()))
        .collect();
    assert_eq!(
        tools,
        vec![
            (
                "PersonDtoWithCustom.g.cs".to_string(),
                Some("TextTemplatingFileGenerator")
            ),
            (
                "OrderDtoWithCustom.g.cs".to_string(),
                Some("TextTemplatingFileGenerator")
            ),
        ]
    );
}

#[test]
fn no_overwrite_keeps_renamed_files() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();

    run_no_delete_template(output, "TestNoDelete.g.cs", "TestNoDelete", "// first run template");
    assert!(output.join("TestOverwrite/TestNoDelete.g.cs").exists());

    run_no_delete_template(output, "TestNoDelete2.g.cs", "TestNoDelete2", "// first run template");

    assert!(output.join("TestOverwrite/TestNoDelete.g.cs").exists());
    assert!(output.join("TestOverwrite/TestNoDelete2.g.cs").exists());

    // The kept file is still owned by the template.
    let items = RecordHost::new(output.join(RECORD)).load_items().unwrap();
    assert_eq!(items.len(), 2);
}

#[test]
fn no_overwrite_keeps_existing_content() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();

    run_no_delete_template(output, "TestNoDelete.g.cs", "TestNoDelete", "// first run template");
    run_no_delete_template(output, "TestNoDelete.g.cs", "TestNoDelete", "// second run template");

    let content = read(output, "TestOverwrite/TestNoDelete.g.cs");
    assert!(content.contains("// first run template"));
    assert!(!content.contains("// second run template"));
}

#[test]
fn overwrite_restores_manually_edited_file() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();

    let mut fm = manager(output, true);
    fm.create_new_file("Person.g.cs", "", "Models", Properties::new())
        .unwrap();
    write!(fm, "class Person {{}}").unwrap();
    fm.commit().unwrap();

    fs::write(output.join("Models/Person.g.cs"), "edited by hand").unwrap();

    let report = fm.commit().unwrap();

    assert_eq!(
        report.action_for(&FileId::new("Person.g.cs", "Models")),
        Some(FileAction::Updated)
    );
    assert_eq!(read(output, "Models/Person.g.cs"), "class Person {}");
}

#[test]
fn overwrite_deletes_renamed_files_and_empty_folders() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();

    let mut first = manager(output, true);
    first
        .create_new_file("Old.g.cs", "", "Gen/Old", Properties::new())
        .unwrap();
    write!(first, "class Old {{}}").unwrap();
    first.commit().unwrap();
    assert!(output.join("Gen/Old/Old.g.cs").exists());

    let mut second = manager(output, true);
    second
        .create_new_file("New.g.cs", "", "Gen", Properties::new())
        .unwrap();
    write!(second, "class New {{}}").unwrap();
    let report = second.commit().unwrap();

    assert_eq!(
        report.action_for(&FileId::new("Old.g.cs", "Gen/Old")),
        Some(FileAction::Deleted)
    );
    assert!(!output.join("Gen/Old").exists());
    assert!(output.join("Gen/New.g.cs").exists());

    let items = RecordHost::new(output.join(RECORD)).load_items().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, FileId::new("New.g.cs", "Gen"));
}

#[test]
fn unchanged_files_are_not_rewritten() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();
    let path = output.join("Stable.g.cs");

    let mut fm = manager(output, true);
    fm.create_new_file("Stable.g.cs", "", "", Properties::new())
        .unwrap();
    write!(fm, "class Stable {{}}").unwrap();
    fm.commit().unwrap();

    let past = SystemTime::UNIX_EPOCH + Duration::from_secs(1_000_000_000);
    fs::File::options()
        .write(true)
        .open(&path)
        .unwrap()
        .set_modified(past)
        .unwrap();

    let report = fm.commit().unwrap();

    assert_eq!(report.count(FileAction::Unchanged), 1);
    assert!(!report.has_changes());
    assert_eq!(fs::metadata(&path).unwrap().modified().unwrap(), past);
}

#[test]
fn registering_n_files_produces_exactly_n_files() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();

    let mut fm = manager(output, true);
    for i in 0..5 {
        fm.create_new_file(&format!("File{i}.g.cs"), "", "Many", Properties::new())
            .unwrap();
        write!(fm, "// file {i}").unwrap();
    }
    fm.commit().unwrap();

    let mut names: Vec<String> = fs::read_dir(output.join("Many"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "File0.g.cs",
            "File1.g.cs",
            "File2.g.cs",
            "File3.g.cs",
            "File4.g.cs"
        ]
    );
    assert_eq!(read(output, "Many/File3.g.cs"), "// file 3");
}

#[test]
fn main_output_is_not_written_as_a_file() {
    let temp = TempDir::new().unwrap();
    let output = temp.path();

    let mut fm = manager(output, true);
    write!(fm, "// template preamble").unwrap();
    fm.create_new_file("Only.g.cs", "", "", Properties::new())
        .unwrap();
    write!(fm, "class Only {{}}").unwrap();
    let report = fm.commit().unwrap();

    assert_eq!(report.main_output, "// template preamble");
    assert_eq!(read(output, "Only.g.cs"), "class Only {}");
}

#[test]
fn tampered_record_cannot_delete_outside_output() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out");
    fs::create_dir_all(&output).unwrap();
    let victim = temp.path().join("victim.txt");
    fs::write(&victim, "not generated").unwrap();
    fs::write(
        output.join(RECORD),
        "version = 1\n\n[[files]]\npath = \"../victim.txt\"\n",
    )
    .unwrap();

    let mut fm = manager(&output, true);
    let report = fm.commit().unwrap();

    assert!(report.entries.is_empty());
    assert_eq!(read(temp.path(), "victim.txt"), "not generated");
    let items = RecordHost::new(output.join(RECORD)).load_items().unwrap();
    assert!(items.is_empty());
}
