#![no_main]

use fiscale::{Country, Validator};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        // Formatting must be total and idempotent for any input.
        for country in Country::supported().iter().chain([&Country::Generic]) {
            let v = Validator::new(*country);
            let once = v.format_tax_code(s);
            assert_eq!(v.format_tax_code(&once), once);
        }
    }
});
