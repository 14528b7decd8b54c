// Allow large errors because this is a compiler - we expect large errors.
#![allow(clippy::result_large_err)]

pub mod cli;
pub mod logger;
pub mod options;
pub mod output;
