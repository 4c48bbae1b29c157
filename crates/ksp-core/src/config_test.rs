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
fn parse_language_english() {
    assert_eq!(parse_language("en").unwrap(), Language::English);
    assert_eq!(parse_language("English").unwrap(), Language::English);
}

#[test]
fn parse_language_hebrew() {
    assert_eq!(parse_language("he").unwrap(), Language::Hebrew);
    assert_eq!(parse_language(" HE ").unwrap(), Language::Hebrew);
}

#[test]
fn parse_language_unknown_fails() {
    let err = parse_language("fr").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnvVar { ref var, .. } if var == "KSP_LANGUAGE"));
}

#[test]
fn language_code_matches_header_value() {
    assert_eq!(Language::English.code(), "en");
    assert_eq!(Language::Hebrew.code(), "he");
    assert_eq!(Language::Hebrew.to_string(), "he");
}

#[test]
fn build_app_config_uses_defaults_when_env_is_empty() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.language, Language::English);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, DEFAULT_USER_AGENT);
    assert_eq!(cfg.poll_interval_secs, 2);
}

#[test]
fn build_app_config_applies_overrides() {
    let mut map = HashMap::new();
    map.insert("KSP_BASE_URL", "http://localhost:8080/api/");
    map.insert("KSP_LANGUAGE", "he");
    map.insert("KSP_LOG_LEVEL", "debug");
    map.insert("KSP_REQUEST_TIMEOUT_SECS", "5");
    map.insert("KSP_USER_AGENT", "restock-watch/2.0");
    map.insert("KSP_POLL_INTERVAL_SECS", "10");

    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.base_url, "http://localhost:8080/api/");
    assert_eq!(cfg.language, Language::Hebrew);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.request_timeout_secs, 5);
    assert_eq!(cfg.user_agent, "restock-watch/2.0");
    assert_eq!(cfg.poll_interval_secs, 10);
}

#[test]
fn build_app_config_rejects_invalid_timeout() {
    let mut map = HashMap::new();
    map.insert("KSP_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KSP_REQUEST_TIMEOUT_SECS"),
        "expected InvalidEnvVar(KSP_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_invalid_language() {
    let mut map = HashMap::new();
    map.insert("KSP_LANGUAGE", "klingon");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KSP_LANGUAGE"),
        "expected InvalidEnvVar(KSP_LANGUAGE), got: {result:?}"
    );
}

#[test]
fn build_app_config_rejects_zero_poll_interval() {
    let mut map = HashMap::new();
    map.insert("KSP_POLL_INTERVAL_SECS", "0");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "KSP_POLL_INTERVAL_SECS"),
        "expected InvalidEnvVar(KSP_POLL_INTERVAL_SECS), got: {result:?}"
    );
}
