//! Fuzz target for config parsing and resolution.
//!
//! Goal: parsing and resolving any config text with any overrides should
//! **never panic**. Errors are fine.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_config_resolve
//! ```

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use webglguard_settings::{Overrides, parse_config_toml, resolve_config};

#[derive(Arbitrary, Debug)]
struct ConfigInput {
    config: String,
    profile: Option<String>,
    platform: Option<String>,
}

fuzz_target!(|input: ConfigInput| {
    if input.config.len() > 16 * 1024 {
        return;
    }
    let Ok(cfg) = parse_config_toml(&input.config) else {
        return;
    };
    let _ = resolve_config(
        cfg,
        Overrides {
            profile: input.profile,
            platform: input.platform,
        },
    );
});
