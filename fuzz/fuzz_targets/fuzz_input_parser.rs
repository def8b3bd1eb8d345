#![no_main]

use hotsplit_core::SliderInput;
use hotsplit_core::input_parser::parse_encoded_input;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    let Ok(input) = parse_encoded_input(text) else {
        return;
    };
    // Accepted inputs always carry a finite coordinate, and presses a target.
    if let Some(x) = input.input.client_x() {
        assert!(x.is_finite(), "accepted non-finite x");
    }
    if matches!(input.input, SliderInput::Press { .. }) {
        assert!(input.widget.is_some(), "press accepted without widget");
    }
});
