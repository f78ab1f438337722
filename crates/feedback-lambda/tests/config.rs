use std::collections::HashMap;
use std::time::Duration;

use feedback_lambda::config::{Config, DEFAULT_MAX_BODY_BYTES, DEFAULT_SENDER, DEFAULT_TIMEOUT_SECS};

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> + use<> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn minimal_config_uses_defaults() {
    let config = Config::from_lookup(lookup(&[
        ("RESEND_API_KEY", "re_test"),
        ("FEEDBACK_RECIPIENT", "support@example.com"),
    ]))
    .unwrap();

    assert_eq!(config.resend_api_key, "re_test");
    assert_eq!(config.recipient, "support@example.com");
    assert_eq!(config.sender, DEFAULT_SENDER);
    assert_eq!(config.resend_api_base, "https://api.resend.com");
    assert_eq!(config.resend_timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    assert_eq!(config.max_body_bytes, DEFAULT_MAX_BODY_BYTES);
}

#[test]
fn api_key_is_required() {
    let err = Config::from_lookup(lookup(&[("FEEDBACK_RECIPIENT", "support@example.com")])).unwrap_err();
    assert!(err.to_string().contains("RESEND_API_KEY"));

    let err = Config::from_lookup(lookup(&[
        ("RESEND_API_KEY", "   "),
        ("FEEDBACK_RECIPIENT", "support@example.com"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("RESEND_API_KEY"));
}

#[test]
fn recipient_is_required() {
    let err = Config::from_lookup(lookup(&[("RESEND_API_KEY", "re_test")])).unwrap_err();
    assert!(err.to_string().contains("FEEDBACK_RECIPIENT"));
}

#[test]
fn overrides_are_applied() {
    let config = Config::from_lookup(lookup(&[
        ("RESEND_API_KEY", "re_test"),
        ("FEEDBACK_RECIPIENT", "support@example.com"),
        ("FEEDBACK_SENDER", "Feedback <feedback@example.com>"),
        ("RESEND_API_BASE", "http://localhost:8025"),
        ("RESEND_TIMEOUT_SECS", "5"),
        ("FEEDBACK_MAX_BODY_BYTES", "1024"),
    ]))
    .unwrap();

    assert_eq!(config.sender, "Feedback <feedback@example.com>");
    assert_eq!(config.resend_api_base, "http://localhost:8025");
    assert_eq!(config.resend_timeout, Duration::from_secs(5));
    assert_eq!(config.max_body_bytes, 1024);
}

#[test]
fn bad_numbers_are_rejected() {
    let err = Config::from_lookup(lookup(&[
        ("RESEND_API_KEY", "re_test"),
        ("FEEDBACK_RECIPIENT", "support@example.com"),
        ("FEEDBACK_MAX_BODY_BYTES", "lots"),
    ]))
    .unwrap_err();
    assert!(err.to_string().contains("FEEDBACK_MAX_BODY_BYTES"));
}

#[test]
fn debug_output_hides_the_api_key() {
    let config = Config::from_lookup(lookup(&[
        ("RESEND_API_KEY", "re_secret_value"),
        ("FEEDBACK_RECIPIENT", "support@example.com"),
    ]))
    .unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("re_secret_value"));
    assert!(debug.contains("<redacted>"));
}
