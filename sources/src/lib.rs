//! NodeSet Sources - reading NodeSet documents
//!
//! This crate turns the bytes of a NodeSet file into the typed schema
//! structures of [`xml::schema`]:
//!
//! - **Source**: a single NodeSet document, read with encoding detection
//! - **xml**: the schema structures and the roxmltree based reader that
//!   fills them, keeping the byte range of every element for diagnostics
//!
//! # Example Usage
//!
//! ```rust
//! use nodesetc_dsl::core::FileId;
//! use nodesetc_sources::Source;
//!
//! let xml = r#"<UANodeSet><UAObject NodeId="ns=1;i=1" BrowseName="1:Pump"/></UANodeSet>"#;
//! let source = Source::new(xml.to_string(), &FileId::from_string("pump.xml"));
//! let node_set = source.parse().unwrap();
//! assert_eq!(node_set.objects.len(), 1);
//! ```

// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

pub mod source;
pub mod xml;

pub use source::Source;
pub use xml::parse_node_set;
