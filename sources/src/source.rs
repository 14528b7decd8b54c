//! Source document abstraction

use std::{borrow::Borrow, path::Path};

use log::{debug, trace};
use nodesetc_dsl::{
    core::FileId,
    diagnostic::{Diagnostic, Label},
};
use nodesetc_problems::Problem;

use crate::xml::{parse_node_set, UANodeSet};

/// The contents of a NodeSet document.
#[derive(Debug)]
pub struct Source {
    file_id: FileId,
    data: String,
}

impl Source {
    /// Create a new Source from content and file ID
    pub fn new(source: String, file_id: &FileId) -> Self {
        Self {
            file_id: file_id.clone(),
            data: source,
        }
    }

    /// Create a Source by reading from a file
    pub fn try_from_path(path: &Path) -> Result<Source, Diagnostic> {
        let content = read_file_content(path)?;
        Ok(Source::new(content, &FileId::from_path(path)))
    }

    /// Get the raw content as a string
    pub fn as_string(&self) -> &str {
        self.data.borrow()
    }

    /// Get the file ID
    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }

    /// Parse the content into the NodeSet schema structures
    pub fn parse(&self) -> Result<UANodeSet, Diagnostic> {
        parse_node_set(&self.data, &self.file_id)
    }
}

/// Read file content with encoding detection
fn read_file_content(path: &Path) -> Result<String, Diagnostic> {
    debug!("Reading file {}", path.display());

    let bytes = std::fs::read(path)
        .map_err(|e| diagnostic(Problem::CannotReadFile, path, e.to_string()))?;

    // We try different decoders and return the first one that matches. XML
    // documents are UTF-8 unless they say otherwise and the byte order mark
    // selects UTF-16 when present.
    let decoders: [&'static encoding_rs::Encoding; 2] =
        [encoding_rs::UTF_8, encoding_rs::WINDOWS_1252];

    let result = decoders.into_iter().find_map(move |d| {
        let (res, encoding_used, had_errors) = d.decode(&bytes);
        if had_errors {
            trace!(
                "Path {} did not match encoding {}",
                path.display(),
                encoding_used.name()
            );
            return None;
        }
        trace!(
            "Path {} matched encoding {}",
            path.display(),
            encoding_used.name()
        );
        Some(res.to_string())
    });

    match result {
        Some(res) => Ok(res),
        None => Err(diagnostic(
            Problem::UnsupportedEncoding,
            path,
            String::from("The file is not UTF-8, UTF-16 or latin1"),
        )),
    }
}

fn diagnostic(problem: Problem, path: &Path, message: String) -> Diagnostic {
    Diagnostic::problem(problem, Label::file(FileId::from_path(path), message))
}
