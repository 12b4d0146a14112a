//! Test support: in-memory implementations of every host port
//!
//! Enabled for this crate's own tests and, through the `test-utils` feature,
//! for downstream crates.

pub mod mocks;

pub use mocks::{MemoryKiln, RecordingSink, ScriptedChooser};
