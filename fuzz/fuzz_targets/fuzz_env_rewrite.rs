#![no_main]

use cutover::domain::services::rewrite_env;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(content) = std::str::from_utf8(data) {
        let values = vec![
            ("APP_NAME".to_string(), "Shop".to_string()),
            ("APP_URL".to_string(), "https://shop.example.com".to_string()),
        ];
        let rewrite = rewrite_env(content, &values);
        // Only matching lines change, so the line count is stable
        assert_eq!(
            rewrite.content.split_inclusive('\n').count(),
            content.split_inclusive('\n').count()
        );
    }
});
