#![allow(clippy::result_large_err)]
//! Code generation for OPC UA NodeSets.
//!
//! This crate transforms the schema structures of a NodeSet document into
//! Rust source that populates an address space when it runs. The pipeline
//! is:
//!
//! 1. [`alias`]: the alias table of the document
//! 2. [`classify`]: the ordered node entries, grouped by kind
//! 3. [`partition`]: bounded slices of the entries, one per output file
//! 4. [`emit`]: a code model per partition, using [`arguments`] and
//!    [`references`] for each node
//! 5. [`render`]: the text of each code model
//!
//! # Example
//!
//! ```ignore
//! use nodesetc_codegen::{compile, CompilerConfig};
//!
//! let node_set = parse_node_set(xml, &file_id).unwrap();
//! let compilation = compile(&node_set, &file_id, "nodeset", &CompilerConfig::default()).unwrap();
//! for module in &compilation.modules {
//!     println!("{}", module.contents);
//! }
//! ```

pub mod alias;
pub mod arguments;
pub mod classify;
pub mod code;
mod compile;
pub mod config;
pub mod emit;
pub mod partition;
pub mod references;
pub mod render;

pub use compile::{compile, compile_source, Compilation, GeneratedModule};
pub use config::CompilerConfig;
