//! NodeSet XML parsing module
//!
//! This module provides parsing support for the OPC UA `UANodeSet` schema.
//! It uses roxmltree for XML parsing with accurate position tracking and
//! fills the typed structures of [`schema`].

pub mod parse;
pub mod schema;

pub use parse::parse_node_set;
pub use schema::*;
