//! river CLI library
//!
//! Command-line front end for `river-core` on top of a `river-kiln` folder:
//! argument parsing, layered configuration, the interactive branch picker and
//! terminal output.

pub mod cli;
pub mod commands;
pub mod config;
pub mod output;
pub mod picker;
