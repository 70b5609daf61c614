use super::*;

// =============================================================================
// env_bool: uses unique env var names to avoid races with parallel tests.
// =============================================================================

#[test]
fn env_bool_true_variants() {
    for (i, val) in ["1", "true", "yes", "on"].iter().enumerate() {
        let key = format!("__TEST_EB_TRUE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(true), "expected true for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_false_variants() {
    for (i, val) in ["0", "false", "no", "off"].iter().enumerate() {
        let key = format!("__TEST_EB_FALSE_{i}__");
        unsafe { std::env::set_var(&key, val) };
        assert_eq!(env_bool(&key), Some(false), "expected false for {val:?}");
        unsafe { std::env::remove_var(&key) };
    }
}

#[test]
fn env_bool_case_insensitive_and_trimmed() {
    let key = "__TEST_EB_CI_771__";
    unsafe { std::env::set_var(key, "  TRUE ") };
    assert_eq!(env_bool(key), Some(true));
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_bool_invalid_or_unset_returns_none() {
    let key = "__TEST_EB_INVALID_9823__";
    unsafe { std::env::set_var(key, "maybe") };
    assert_eq!(env_bool(key), None);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_bool("__TEST_EB_SURELY_UNSET_XYZ_42__"), None);
}

// =============================================================================
// env_parse / env_nonempty
// =============================================================================

#[test]
fn env_parse_reads_value() {
    let key = "__TEST_EP_VALUE_311__";
    unsafe { std::env::set_var(key, " 42 ") };
    assert_eq!(env_parse::<u32>(key, 7), 42);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_falls_back_on_garbage() {
    let key = "__TEST_EP_GARBAGE_312__";
    unsafe { std::env::set_var(key, "lots") };
    assert_eq!(env_parse::<u32>(key, 7), 7);
    unsafe { std::env::remove_var(key) };
    assert_eq!(env_parse::<u64>("__TEST_EP_UNSET_313__", 9), 9);
}

#[test]
fn env_nonempty_treats_blank_as_unset() {
    let key = "__TEST_NE_BLANK_314__";
    unsafe { std::env::set_var(key, "   ") };
    assert_eq!(env_nonempty(key), None);
    unsafe { std::env::set_var(key, " sk_test ") };
    assert_eq!(env_nonempty(key), Some("sk_test".to_owned()));
    unsafe { std::env::remove_var(key) };
}

// =============================================================================
// URLs
// =============================================================================

#[test]
fn absolute_url_joins_without_double_slash() {
    assert_eq!(absolute_url("https://app.example.com/", "/settings"), "https://app.example.com/settings");
    assert_eq!(absolute_url("https://app.example.com", "settings"), "https://app.example.com/settings");
}

#[test]
fn normalize_base_url_strips_trailing_slashes() {
    assert_eq!(normalize_base_url(" http://localhost:3000// "), "http://localhost:3000");
}
