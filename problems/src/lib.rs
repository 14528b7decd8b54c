//! The catalog of problems that the NodeSet compiler reports.
//!
//! The enumeration is generated from `resources/problem-codes.csv` so that
//! the codes stay stable and documented in one place.

/// How a problem affects the compilation of a document.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Severity {
    /// Compilation of the document stops and nothing is written.
    Error,
    /// The problem is reported and compilation continues with a default.
    Warning,
}

include!(concat!(env!("OUT_DIR"), "/problems.rs"));
