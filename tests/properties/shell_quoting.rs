//! Property tests for shell quoting of paths and arguments.

use std::process::Command;

use proptest::prelude::*;

use cutover::domain::ports::command_runner::{shell_quote, shell_word};

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 48,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A quoted word reaches the program as exactly one argument.
    #[test]
    fn property_quoted_word_survives_the_shell(word in "[ -~]{0,24}") {
        let script = format!("printf '%s' {}", shell_word(&word));
        let output = Command::new("sh").arg("-c").arg(&script).output().unwrap();

        prop_assert!(output.status.success());
        prop_assert_eq!(String::from_utf8_lossy(&output.stdout), word.as_str());
    }

    /// PROPERTY: `shell_quote` always produces a single-quoted word.
    #[test]
    fn property_shell_quote_is_single_quoted(s in ".{0,32}") {
        let quoted = shell_quote(&s);
        prop_assert!(quoted.starts_with('\''));
        prop_assert!(quoted.ends_with('\''));
    }
}
