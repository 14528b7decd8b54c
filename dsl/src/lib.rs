//! Domain objects shared by the NodeSet compiler crates.
//!
//! - [`core`]: file identity and positions in the source document
//! - [`diagnostic`]: errors and warnings with their locations
//! - [`node_id`]: the compact node identifier literal and its parser
//! - [`node`]: the intermediate node model produced from the schema

// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

pub mod core;
pub mod diagnostic;
pub mod node;
pub mod node_id;
