//! Property tests for the line-scoped `.env` rewrite.

use proptest::prelude::*;

use cutover::domain::services::{has_app_key, rewrite_env};

const KEYS: [&str; 4] = ["APP_NAME", "APP_ENV", "APP_DEBUG", "APP_URL"];

fn other_line() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z_]{1,12}=[A-Za-z0-9 _:#=\"'${}./-]{0,30}")
        .unwrap()
        .prop_filter("not a rewritten key", |line| {
            !KEYS.iter().any(|k| line.starts_with(&format!("{k}=")))
        })
}

fn value() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z0-9 _:#./$\"'-]{0,24}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Lines that do not start with a rewritten key are kept byte for byte.
    #[test]
    fn property_other_lines_are_untouched(
        lines in proptest::collection::vec(other_line(), 0..12),
        name in value(),
    ) {
        let content: String = lines.iter().map(|l| format!("{l}\n")).collect();
        let values = vec![("APP_NAME".to_string(), name)];

        let rewrite = rewrite_env(&content, &values);

        prop_assert_eq!(&rewrite.content, &content);
        prop_assert_eq!(rewrite.missing, vec!["APP_NAME".to_string()]);
    }

    /// PROPERTY: Every present key is rewritten in place; line count never changes.
    #[test]
    fn property_present_keys_are_rewritten(
        before in proptest::collection::vec(other_line(), 0..6),
        after in proptest::collection::vec(other_line(), 0..6),
        url in value(),
    ) {
        let mut content: String = before.iter().map(|l| format!("{l}\n")).collect();
        content.push_str("APP_URL=http://localhost\n");
        content.extend(after.iter().map(|l| format!("{l}\n")));

        let values = vec![("APP_URL".to_string(), url)];
        let rewrite = rewrite_env(&content, &values);

        prop_assert_eq!(rewrite.content.lines().count(), content.lines().count());
        prop_assert_eq!(rewrite.replaced, vec!["APP_URL".to_string()]);
        prop_assert!(rewrite.missing.is_empty());
        let rewritten = rewrite.content.lines().nth(before.len()).unwrap();
        prop_assert!(rewritten.starts_with("APP_URL="));
        for (i, line) in before.iter().enumerate() {
            prop_assert_eq!(rewrite.content.lines().nth(i).unwrap(), line.as_str());
        }
    }

    /// PROPERTY: Rewriting twice with the same values changes nothing the second time.
    #[test]
    fn property_rewrite_is_idempotent(
        lines in proptest::collection::vec(other_line(), 0..8),
        name in value(),
    ) {
        let mut content = String::from("APP_NAME=Laravel\n");
        content.extend(lines.iter().map(|l| format!("{l}\n")));
        let values = vec![("APP_NAME".to_string(), name)];

        let once = rewrite_env(&content, &values);
        let twice = rewrite_env(&once.content, &values);

        prop_assert!(!twice.changed(&once.content));
    }

    /// PROPERTY: Key detection never panics on arbitrary input.
    #[test]
    fn property_has_app_key_never_panics(content in ".*") {
        let _ = has_app_key(&content);
    }
}
