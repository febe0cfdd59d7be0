//! Settings resolution: `cloudguard.toml` plus CLI overrides.
//!
//! The config model is user-facing and intentionally permissive; resolution
//! produces the effective settings a scan runs under, rejecting invalid
//! vocabulary (trust class, verbosity) before any driver is built.

#![forbid(unsafe_code)]

mod model;
mod resolve;

pub use model::{parse_config_toml, CloudguardConfigV1};
pub use resolve::{resolve_settings, Overrides, ScanSettings, Verbosity};
