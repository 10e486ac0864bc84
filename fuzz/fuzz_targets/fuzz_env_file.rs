#![no_main]

use std::path::Path;

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        // Malformed dotenv input must be an error, never a panic
        let _ = cutover::config::parse_env_file(content, Path::new("fuzz.env"));
    }
});
