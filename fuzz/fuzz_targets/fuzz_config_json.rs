//! Fuzz target: rig config JSON
//!
//! Feeds arbitrary bytes through the same parse + validate path the config
//! file adapter uses and checks:
//! - No panics under arbitrary input
//! - Any config that validates has a distinct pin per line
//! - Any config that validates has page-aligned panel height
//!
//! cargo fuzz run fuzz_config_json

#![no_main]

use libfuzzer_sys::fuzz_target;
use rigio::config::RigConfig;

fuzz_target!(|data: &[u8]| {
    let Ok(cfg) = serde_json::from_slice::<RigConfig>(data) else {
        return;
    };
    if cfg.validate().is_err() {
        return;
    }

    let pins = cfg.line_pins();
    for (i, p) in pins.iter().enumerate() {
        assert!(!pins[i + 1..].contains(p), "duplicate pin {p} passed validation");
    }
    assert_eq!(cfg.display_height % 8, 0);
});
