//! Tri-state boolean filter parameter tests.

use wayfinder::api::params::parse_flag;

#[test]
fn absent_or_empty_means_no_filter() {
    assert_eq!(parse_flag(None), None);
    assert_eq!(parse_flag(Some("")), None);
    assert_eq!(parse_flag(Some("   ")), None);
}

#[test]
fn recognized_falsy_tokens_mean_false() {
    for token in ["0", "f", "F", "false", "False", "FALSE", "off", "Off", "OFF"] {
        assert_eq!(parse_flag(Some(token)), Some(false), "token {token:?}");
    }
}

#[test]
fn everything_else_means_true() {
    for token in ["1", "true", "t", "yes", "anything-else"] {
        assert_eq!(parse_flag(Some(token)), Some(true), "token {token:?}");
    }
}
