#![no_main]

use fiscale::{Country, Validator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Must not panic — errors are fine, panics are bugs.
        for country in Country::supported().iter().chain([&Country::Generic]) {
            let _ = Validator::new(*country).validate_vat_number(s);
        }
    }
});
