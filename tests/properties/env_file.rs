//! Property tests for the dotenv parser.

use std::path::Path;

use proptest::prelude::*;

use cutover::config::parse_env_file;

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Arbitrary input is parsed or rejected, never a panic.
    #[test]
    fn property_parse_never_panics(content in "(?s).{0,200}") {
        let _ = parse_env_file(&content, Path::new("config/.env"));
    }

    /// PROPERTY: Simple unquoted pairs come back as written, in order.
    #[test]
    fn property_plain_pairs_parse_back(
        pairs in proptest::collection::vec(("[A-Z][A-Z0-9_]{0,10}", "[A-Za-z0-9_./:@-]{0,20}"), 0..10),
    ) {
        let content: String = pairs.iter().map(|(k, v)| format!("{k}={v}\n")).collect();

        let parsed = parse_env_file(&content, Path::new("config/.env")).unwrap();

        let expected: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();
        prop_assert_eq!(parsed, expected);
    }
}
