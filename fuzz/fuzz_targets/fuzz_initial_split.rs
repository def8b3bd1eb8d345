#![no_main]

use hotsplit_core::parse_initial_split;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Some(value) = parse_initial_split(Some(text)) {
        assert!(value.is_finite(), "non-finite initial split {value}");
    }
});
