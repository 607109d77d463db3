use std::collections::HashMap;
use std::env::VarError;

use super::*;

fn lookup_from_map<'a>(
    map: &'a HashMap<&'a str, &'a str>,
) -> impl Fn(&str) -> Result<String, VarError> + 'a {
    move |key| {
        map.get(key)
            .map(|v| (*v).to_string())
            .ok_or(VarError::NotPresent)
    }
}

#[test]
fn build_app_config_uses_defaults_when_nothing_is_set() {
    let map: HashMap<&str, &str> = HashMap::new();
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.max_pages, 1);
    assert_eq!(cfg.max_concurrent_urls, 1);
    assert!(cfg.report_malformed);
    assert_eq!(cfg.output_path, PathBuf::from("reviews.csv"));
    assert_eq!(cfg.preview_rows, 10);
}

#[test]
fn build_app_config_reads_overrides() {
    let mut map = HashMap::new();
    map.insert("REVIEWSCOPE_LOG_LEVEL", "debug");
    map.insert("REVIEWSCOPE_REQUEST_TIMEOUT_SECS", "5");
    map.insert("REVIEWSCOPE_USER_AGENT", "reviewscope-test/0.1");
    map.insert("REVIEWSCOPE_MAX_PAGES", "3");
    map.insert("REVIEWSCOPE_MAX_CONCURRENT_URLS", "4");
    map.insert("REVIEWSCOPE_REPORT_MALFORMED", "no");
    map.insert("REVIEWSCOPE_OUTPUT_PATH", "/tmp/out.csv");
    map.insert("REVIEWSCOPE_PREVIEW_ROWS", "25");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.user_agent, "reviewscope-test/0.1");
    assert_eq!(cfg.max_pages, 3);
    assert_eq!(cfg.max_concurrent_urls, 4);
    assert!(!cfg.report_malformed);
    assert_eq!(cfg.output_path, PathBuf::from("/tmp/out.csv"));
    assert_eq!(cfg.preview_rows, 25);
}

#[test]
fn build_app_config_rejects_zero_pages() {
    let mut map = HashMap::new();
    map.insert("REVIEWSCOPE_MAX_PAGES", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVIEWSCOPE_MAX_PAGES"),
        "expected InvalidEnvVar(REVIEWSCOPE_MAX_PAGES), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_non_numeric_timeout() {
    let mut map = HashMap::new();
    map.insert("REVIEWSCOPE_REQUEST_TIMEOUT_SECS", "soon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVIEWSCOPE_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(REVIEWSCOPE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_timeout() {
    let mut map = HashMap::new();
    map.insert("REVIEWSCOPE_REQUEST_TIMEOUT_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, ref reason }) if var == "REVIEWSCOPE_REQUEST_TIMEOUT_SECS" && reason == "must be at least 1"),
        "expected InvalidEnvVar(REVIEWSCOPE_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_unknown_bool() {
    let mut map = HashMap::new();
    map.insert("REVIEWSCOPE_REPORT_MALFORMED", "maybe");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "REVIEWSCOPE_REPORT_MALFORMED"),
        "expected InvalidEnvVar(REVIEWSCOPE_REPORT_MALFORMED), got: {result:?}"
    );
}

#[test]
fn build_app_config_clamps_zero_concurrency_to_one() {
    let mut map = HashMap::new();
    map.insert("REVIEWSCOPE_MAX_CONCURRENT_URLS", "0");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.max_concurrent_urls, 1);
}

#[test]
fn parse_flag_accepts_common_spellings() {
    assert_eq!(parse_flag("TRUE"), Some(true));
    assert_eq!(parse_flag(" 1 "), Some(true));
    assert_eq!(parse_flag("yes"), Some(true));
    assert_eq!(parse_flag("false"), Some(false));
    assert_eq!(parse_flag("0"), Some(false));
    assert_eq!(parse_flag("No"), Some(false));
    assert_eq!(parse_flag("later"), None);
}
