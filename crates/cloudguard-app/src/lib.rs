//! Use case orchestration for cloudguard.
//!
//! This crate coordinates settings, the engine, and the rule registry. It is
//! intentionally thin; the CLI crate depends on it and only handles argument
//! parsing and I/O.

#![forbid(unsafe_code)]

mod scan;

pub use scan::run_scan;
