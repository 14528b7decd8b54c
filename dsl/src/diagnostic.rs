//! Provides definition for diagnostics, which are the errors and warnings
//! associated with compiling a NodeSet.
//!
//! The compiler never prints diagnostics itself. They are returned to the
//! caller which decides how to render them (the command line uses
//! codespan-reporting).

use std::ops::Range;

use nodesetc_problems::{Problem, Severity};

use crate::core::{FileId, SourceSpan};

/// A position marker that only has an offset in a file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OffsetRange {
    /// Byte offset from start of string (0-indexed)
    pub start: usize,
    /// Byte offset from end of string (0-indexed)
    pub end: usize,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Location {
    /// The file as a whole rather than a particular element.
    File,
    OffsetRange(OffsetRange),
}

/// A label that refers to some range in a file and possibly associated
/// with a message related to that range.
///
/// Normally this indicates the location of an error or warning along with a
/// text message describing that position.
#[derive(Clone, Debug)]
pub struct Label {
    /// The position of label.
    pub location: Location,

    /// Identifier for the file.
    pub file_id: FileId,

    /// A message describing this label.
    pub message: String,
}

impl Label {
    pub fn offset(
        file_id: impl Into<FileId>,
        offset: impl Into<Range<usize>>,
        message: impl Into<String>,
    ) -> Self {
        let range = offset.into();
        Self {
            location: Location::OffsetRange(OffsetRange {
                start: range.start,
                end: range.end,
            }),
            file_id: file_id.into(),
            message: message.into(),
        }
    }

    pub fn span(span: &SourceSpan, message: impl Into<String>) -> Self {
        Self {
            location: Location::OffsetRange(OffsetRange {
                start: span.start,
                end: span.end,
            }),
            file_id: span.file_id.clone(),
            message: message.into(),
        }
    }

    /// A "position" that is a file in its entirety rather that a particular
    /// element.
    pub fn file(file_id: impl Into<FileId>, message: impl Into<String>) -> Self {
        Self {
            location: Location::File,
            file_id: file_id.into(),
            message: message.into(),
        }
    }
}

/// A diagnostic. Diagnostic have a code that is indicative of the category,
/// a severity, a primary location and possibly non-zero set of secondary
/// locations.
#[derive(Clone, Debug)]
pub struct Diagnostic {
    /// A unique value describing the type of diagnostic.
    pub code: String,

    /// Whether the diagnostic stops compilation.
    pub severity: Severity,

    description: String,

    /// The primary or first diagnostic.
    pub primary: Label,

    /// Additional descriptions to the constant description.
    pub described: Vec<String>,

    /// Additional information about the diagnostic.
    pub secondary: Vec<Label>,
}

impl Diagnostic {
    /// Creates a diagnostic from the problem code and with the specified label.
    ///
    /// The label associates the problem to a particular element in the
    /// NodeSet document.
    pub fn problem(problem: Problem, primary: Label) -> Self {
        Self {
            code: problem.code().to_string(),
            severity: problem.severity(),
            description: problem.message().to_string(),
            primary,
            described: vec![],
            secondary: vec![],
        }
    }

    /// Adds to the problem description (primary text) additional context
    /// about the problem.
    ///
    /// This is similar to adding primary and second items except that this
    /// forms part of the main description and does not need to be related to
    /// a position in a source file.
    pub fn with_context(mut self, description: &str, item: &str) -> Self {
        self.described.push(format!("{}={}", description, item));
        self
    }

    pub fn with_secondary(mut self, label: Label) -> Self {
        self.secondary.push(label);
        self
    }

    /// Returns true when the diagnostic stops compilation of the document.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Returns the description for the diagnostic. This may add in other
    /// data in addition that is part of the diagnostic.
    pub fn description(&self) -> String {
        if self.described.is_empty() {
            self.description.clone()
        } else {
            format!("{} ({})", self.description, self.described.join(", "))
        }
    }

    /// Returns the distinct files that the labels of this diagnostic refer to.
    pub fn file_ids(&self) -> Vec<&FileId> {
        let mut ids = vec![&self.primary.file_id];
        for label in &self.secondary {
            if !ids.contains(&&label.file_id) {
                ids.push(&label.file_id);
            }
        }
        ids
    }
}
