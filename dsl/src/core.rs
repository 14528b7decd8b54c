//! Common items for locating NodeSet elements in their source document.
use core::fmt;
use std::path::Path;
use std::sync::{Arc, LazyLock};

// Static singleton for the empty FileId to avoid repeated allocations.
static EMPTY_FILE_ID: LazyLock<Arc<str>> = LazyLock::new(|| Arc::from(""));

/// FileId identifies the origin of a NodeSet document.
///
/// FileId is normally useful in the context of source positions
/// where a source position is in a file.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct FileId(Arc<str>);

impl FileId {
    /// Creates an empty file identifier.
    pub fn new() -> Self {
        FileId::default()
    }

    /// Creates a file identifier from the path.
    pub fn from_path(path: &Path) -> Self {
        FileId(Arc::from(path.to_string_lossy().as_ref()))
    }

    /// Creates a file identifier from the slice. The slice
    /// is normally the file path.
    pub fn from_string(path: &str) -> Self {
        FileId(Arc::from(path))
    }

    /// Returns the final component of the path, which is what the
    /// generated file banner records.
    pub fn file_name(&self) -> &str {
        self.0.rsplit(['/', '\\']).next().unwrap_or(&self.0)
    }
}

impl Default for FileId {
    fn default() -> Self {
        FileId(EMPTY_FILE_ID.clone())
    }
}

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Location in a file of a schema element.
///
/// The location is defined by byte indices in the source document.
#[derive(Debug, Clone)]
pub struct SourceSpan {
    /// The byte offset of the start of the element (0-indexed).
    pub start: usize,
    /// The byte offset just past the end of the element.
    pub end: usize,
    pub file_id: FileId,
}

impl SourceSpan {
    pub fn range(start: usize, end: usize) -> Self {
        Self {
            start,
            end,
            file_id: FileId::default(),
        }
    }

    pub fn with_file_id(&self, file_id: &FileId) -> Self {
        Self {
            start: self.start,
            end: self.end,
            file_id: file_id.clone(),
        }
    }
}

impl Default for SourceSpan {
    fn default() -> Self {
        SourceSpan::range(0, 0)
    }
}

impl PartialEq for SourceSpan {
    fn eq(&self, _other: &Self) -> bool {
        // Elements are compared by content. Where an element was declared
        // never makes two elements different.
        true
    }
}
impl Eq for SourceSpan {}

/// Defines an element that has a location in the source document.
pub trait Located {
    /// Get the source position of the object.
    fn span(&self) -> SourceSpan;
}
