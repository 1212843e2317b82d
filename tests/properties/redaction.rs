//! Property tests for command-line secret redaction.

use proptest::prelude::*;

use gae_deploy::domain::services::{redact, REDACTED};
use gae_deploy::redact_args;

/// Secrets long and distinctive enough that they cannot appear by accident
/// in the surrounding arguments.
fn secret() -> impl Strategy<Value = String> {
    prop_oneof![
        proptest::string::string_regex("SECRET[A-Za-z0-9]{12,32}").unwrap(),
        proptest::string::string_regex("SECRET[A-Za-z0-9]{12,24}")
            .unwrap()
            .prop_map(|inner| format!("{{\n  \"key\": {{\"private\": \"{inner}\"}},\n  \"n\": [1, 2]\n}}")),
    ]
}

/// Plain arguments that never contain the secret marker or a flag that
/// carries a secret.
fn plain_arg() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9./_=-]{1,16}")
        .unwrap()
        .prop_filter("not a secret flag", |s| s != "-E" && !s.starts_with("--oauth2"))
}

fn env_key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Z][A-Z0-9_]{0,12}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 128,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: no access token value survives redaction, wherever the flag sits.
    #[test]
    fn property_access_token_never_logged(
        before in proptest::collection::vec(plain_arg(), 0..4),
        after in proptest::collection::vec(plain_arg(), 0..4),
        token in secret(),
    ) {
        let mut args = before.clone();
        args.push("--oauth2_access_token".to_string());
        args.push(token.clone());
        args.extend(after.clone());

        let line = redact_args(&args);

        prop_assert!(!line.contains("SECRET"));
        let expected = format!("--oauth2_access_token {REDACTED}");
        prop_assert!(line.contains(&expected));
    }

    /// PROPERTY: `-E KEY:VALUE` keeps the key and hides the whole value.
    #[test]
    fn property_environment_values_never_logged(
        pairs in proptest::collection::vec((env_key(), secret()), 1..4),
        tail in proptest::collection::vec(plain_arg(), 0..3),
    ) {
        let mut args = Vec::new();
        for (key, value) in &pairs {
            args.push("-E".to_string());
            args.push(format!("{key}:{value}"));
        }
        args.extend(tail.clone());

        let line = redact_args(&args);

        prop_assert!(!line.contains("SECRET"));
        for (key, _) in &pairs {
            let expected = format!("-E {key}:{REDACTED}");
            prop_assert!(line.contains(&expected));
        }
    }

    /// PROPERTY: arguments without secret flags pass through unchanged.
    #[test]
    fn property_plain_arguments_unchanged(
        args in proptest::collection::vec(plain_arg(), 0..8),
    ) {
        prop_assert_eq!(redact(&args), args.clone());
        prop_assert_eq!(redact_args(&args), args.join(" "));
    }

    /// PROPERTY: redaction never changes the number of arguments.
    #[test]
    fn property_redaction_preserves_arity(
        args in proptest::collection::vec("(?s).{0,32}", 0..12),
    ) {
        prop_assert_eq!(redact(&args).len(), args.len());
    }
}
