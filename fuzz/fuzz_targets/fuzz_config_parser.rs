//! Fuzz target for cloudguard.toml parsing.
//!
//! Goal: The parser should **never panic** on any input.
//! It may return errors, but panics are unacceptable.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_parser
//! ```

#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    // Only test valid UTF-8 strings (the config file must be UTF-8)
    if let Ok(text) = std::str::from_utf8(data) {
        let _ = cloudguard_settings::parse_config_toml(text);
    }
});
