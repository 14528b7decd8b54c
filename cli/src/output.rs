//! Writes generated modules to the destination directory.

use std::{
    fs,
    path::{Path, PathBuf},
};

use log::debug;
use nodesetc_codegen::{Compilation, GeneratedModule};
use nodesetc_dsl::{
    core::FileId,
    diagnostic::{Diagnostic, Label},
};
use nodesetc_problems::Problem;

/// Writes every module of the compilation, and the index module when
/// requested, into the directory. Returns the paths written.
///
/// Each file is first written next to its destination and then renamed so
/// that a reader never sees a partially written module.
pub fn write_compilation(
    compilation: &Compilation,
    directory: &Path,
    include_index: bool,
) -> Result<Vec<PathBuf>, Diagnostic> {
    fs::create_dir_all(directory).map_err(|e| cannot_write(directory, e))?;

    let mut modules: Vec<&GeneratedModule> = compilation.modules.iter().collect();
    if include_index {
        modules.push(&compilation.index);
    }

    modules
        .into_iter()
        .map(|module| write_module(directory, module))
        .collect()
}

fn write_module(directory: &Path, module: &GeneratedModule) -> Result<PathBuf, Diagnostic> {
    let path = directory.join(module.file_name());
    let temporary = directory.join(format!(".{}.tmp", module.file_name()));

    debug!("Writing module {} to {}", module.name, path.display());
    fs::write(&temporary, &module.contents).map_err(|e| cannot_write(&temporary, e))?;
    fs::rename(&temporary, &path).map_err(|e| {
        let _ = fs::remove_file(&temporary);
        cannot_write(&path, e)
    })?;

    Ok(path)
}

fn cannot_write(path: &Path, err: std::io::Error) -> Diagnostic {
    Diagnostic::problem(
        Problem::CannotWriteFile,
        Label::file(FileId::from_path(path), err.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn compilation() -> Compilation {
        Compilation {
            modules: vec![
                GeneratedModule {
                    name: "base_1".to_string(),
                    contents: "// one\n".to_string(),
                },
                GeneratedModule {
                    name: "base_2".to_string(),
                    contents: "// two\n".to_string(),
                },
            ],
            index: GeneratedModule {
                name: "mod".to_string(),
                contents: "mod base_1;\nmod base_2;\n".to_string(),
            },
            diagnostics: vec![],
        }
    }

    #[test]
    fn write_compilation_when_index_then_writes_all_files() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("generated");

        let written = write_compilation(&compilation(), &out, true).unwrap();

        assert_eq!(
            written,
            vec![out.join("base_1.rs"), out.join("base_2.rs"), out.join("mod.rs")]
        );
        assert_eq!(fs::read_to_string(out.join("base_2.rs")).unwrap(), "// two\n");
        let names: Vec<String> = fs::read_dir(&out)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().to_string())
            .collect();
        assert!(names.iter().all(|name| !name.ends_with(".tmp")));
    }

    #[test]
    fn write_compilation_when_no_index_then_only_modules() {
        let dir = tempdir().unwrap();

        let written = write_compilation(&compilation(), dir.path(), false).unwrap();

        assert_eq!(written.len(), 2);
        assert!(!dir.path().join("mod.rs").exists());
    }

    #[test]
    fn write_compilation_when_directory_is_file_then_cannot_write() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("file");
        fs::write(&file, "x").unwrap();

        let err = write_compilation(&compilation(), &file, false).unwrap_err();

        assert_eq!(err.code, Problem::CannotWriteFile.code());
    }
}
