//! Implements the command line behavior.

use codespan_reporting::{
    diagnostic::{Diagnostic, Label, LabelStyle, Severity},
    files::SimpleFiles,
    term::{
        self,
        termcolor::{ColorChoice, StandardStream},
    },
};
use log::debug;
use nodesetc_codegen::{compile_source, Compilation, CompilerConfig};
use nodesetc_dsl::core::FileId;
use nodesetc_sources::Source;
use std::{
    fs::{metadata, read_dir},
    ops::Range,
    path::{Path, PathBuf},
};

use crate::{options::CompileOptions, output::write_compilation};

/// Generates the modules for the NodeSet file and writes them to the
/// destination directory.
pub fn compile(path: &Path, options: &CompileOptions, suppress_output: bool) -> Result<(), String> {
    let config = options
        .to_config()
        .map_err(|e| report(e, None, suppress_output))?;
    let source = Source::try_from_path(path).map_err(|e| report(e, None, suppress_output))?;
    let compilation = build(&source, &config, options, suppress_output)?;

    let written = write_compilation(&compilation, &config.destination_directory, options.index)
        .map_err(|e| report(e, None, suppress_output))?;

    if !suppress_output {
        for path in written {
            println!("{}", path.display());
        }
    }
    Ok(())
}

/// Checks that the specified files generate code without writing anything.
pub fn check(paths: Vec<PathBuf>, options: &CompileOptions, suppress_output: bool) -> Result<(), String> {
    let config = options
        .to_config()
        .map_err(|e| report(e, None, suppress_output))?;

    let mut files: Vec<PathBuf> = vec![];
    for path in paths {
        files.append(&mut enumerate_files(&path)?);
    }

    let mut errors = 0;
    for file in files {
        let result = Source::try_from_path(&file)
            .map_err(|e| report(e, None, suppress_output))
            .and_then(|source| build(&source, &config, options, suppress_output));
        if result.is_err() {
            errors += 1;
        }
    }

    if errors > 0 {
        return Err(format!("Number of errors: {}", errors));
    }

    if !suppress_output {
        println!("OK");
    }
    Ok(())
}

/// Compiles the source, reporting the warnings and any error.
fn build(
    source: &Source,
    config: &CompilerConfig,
    options: &CompileOptions,
    suppress_output: bool,
) -> Result<Compilation, String> {
    let module_name = options
        .module_name(Path::new(&source.file_id().to_string()))
        .map_err(|e| report(e, Some(source), suppress_output))?;

    let compilation = compile_source(source, &module_name, config)
        .map_err(|e| report(e, Some(source), suppress_output))?;

    for warning in &compilation.diagnostics {
        handle_diagnostic(warning, Some(source), suppress_output);
    }
    Ok(compilation)
}

/// Lists the NodeSet files at the path. A directory contributes the XML
/// files directly inside it, in name order.
fn enumerate_files(path: &PathBuf) -> Result<Vec<PathBuf>, String> {
    let metadata = metadata(path).map_err(|e| format!("{}: {}", path.display(), e))?;
    if metadata.is_dir() {
        let paths = read_dir(path).map_err(|e| e.to_string())?;
        let mut paths: Vec<PathBuf> = paths
            .into_iter()
            .filter_map(|entry| match entry {
                Ok(entry) => Some(entry.path()),
                Err(_) => None,
            })
            .filter(|path| path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("xml")))
            .collect();
        paths.sort();
        debug!("Found {} files in {}", paths.len(), path.display());
        return Ok(paths);
    }
    if metadata.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    Err(format!("{} is not a file or directory", path.display()))
}

/// Prints the error and returns the message for the command result.
fn report(
    diagnostic: nodesetc_dsl::diagnostic::Diagnostic,
    source: Option<&Source>,
    suppress_output: bool,
) -> String {
    handle_diagnostic(&diagnostic, source, suppress_output);
    String::from("Number of errors: 1")
}

fn handle_diagnostic(
    diagnostic: &nodesetc_dsl::diagnostic::Diagnostic,
    source: Option<&Source>,
    suppress_output: bool,
) {
    if suppress_output {
        return;
    }

    let writer = StandardStream::stderr(ColorChoice::Auto);
    let config = codespan_reporting::term::Config::default();

    // Only the document itself has content to show. Other files, such as
    // the configuration, are named without a snippet.
    let mut files: SimpleFiles<String, &str> = SimpleFiles::new();
    let mut file_ids: Vec<FileId> = vec![];
    for file_id in diagnostic.file_ids() {
        let content = match source {
            Some(source) if source.file_id() == file_id => source.as_string(),
            _ => "",
        };
        files.add(file_id.to_string(), content);
        file_ids.push(file_id.clone());
    }

    let diagnostic = map_diagnostic(diagnostic, &file_ids);

    let _ = term::emit(&mut writer.lock(), &config, &files, &diagnostic).map_err(|err| {
        println!("Failed writing to terminal: {}", err);
        1usize
    });
}

fn map_label(
    label: &nodesetc_dsl::diagnostic::Label,
    style: LabelStyle,
    file_ids: &[FileId],
) -> Label<usize> {
    let range = match &label.location {
        nodesetc_dsl::diagnostic::Location::File => Range { start: 0, end: 0 },
        nodesetc_dsl::diagnostic::Location::OffsetRange(offset) => Range {
            start: offset.start,
            end: offset.end,
        },
    };
    let file = file_ids
        .iter()
        .position(|id| id == &label.file_id)
        .unwrap_or(0);
    Label::new(style, file, range).with_message(label.message.clone())
}

fn map_diagnostic(diagnostic: &nodesetc_dsl::diagnostic::Diagnostic, file_ids: &[FileId]) -> Diagnostic<usize> {
    let severity = match diagnostic.severity {
        nodesetc_problems::Severity::Error => Severity::Error,
        nodesetc_problems::Severity::Warning => Severity::Warning,
    };

    // Set the primary labels
    let mut labels = vec![map_label(&diagnostic.primary, LabelStyle::Primary, file_ids)];

    // Add any secondary labels
    labels.extend(
        diagnostic
            .secondary
            .iter()
            .map(|lbl| map_label(lbl, LabelStyle::Secondary, file_ids)),
    );

    Diagnostic::new(severity)
        .with_code(diagnostic.code.clone())
        .with_message(diagnostic.description())
        .with_labels(labels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nodesetc_test::shared_resource_path;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn check_when_valid_file_then_ok() {
        let paths = vec![shared_resource_path("base_object_type.xml")];
        let result = check(paths, &CompileOptions::default(), true);
        assert!(result.is_ok())
    }

    #[test]
    fn check_when_malformed_identifier_then_error() {
        let paths = vec![shared_resource_path("malformed_node_id.xml")];
        let result = check(paths, &CompileOptions::default(), true);
        assert_eq!(result, Err(String::from("Number of errors: 1")));
    }

    #[test]
    fn check_when_directory_then_checks_xml_files() {
        let dir = tempdir().unwrap();
        fs::copy(
            shared_resource_path("base_object_type.xml"),
            dir.path().join("a.xml"),
        )
        .unwrap();
        fs::copy(shared_resource_path("not_xml.xml"), dir.path().join("b.xml")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not checked").unwrap();

        let files = enumerate_files(&dir.path().to_path_buf()).unwrap();
        assert_eq!(files, vec![dir.path().join("a.xml"), dir.path().join("b.xml")]);

        let result = check(vec![dir.path().to_path_buf()], &CompileOptions::default(), true);
        assert_eq!(result, Err(String::from("Number of errors: 1")));
    }

    #[test]
    fn compile_when_valid_file_then_writes_module() {
        let dir = tempdir().unwrap();
        let options = CompileOptions {
            destination_directory: Some(dir.path().to_path_buf()),
            index: true,
            ..CompileOptions::default()
        };

        compile(&shared_resource_path("base_object_type.xml"), &options, true).unwrap();

        let contents = fs::read_to_string(dir.path().join("base_object_type.rs")).unwrap();
        assert!(contents.contains("fn add_objecttype_1(address_space: &mut AddressSpace) {"));
        assert!(dir.path().join("mod.rs").exists());
    }

    #[test]
    fn compile_when_fatal_error_then_writes_nothing() {
        let dir = tempdir().unwrap();
        let options = CompileOptions {
            destination_directory: Some(dir.path().to_path_buf()),
            ..CompileOptions::default()
        };

        let result = compile(&shared_resource_path("malformed_node_id.xml"), &options, true);

        assert!(result.is_err());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
