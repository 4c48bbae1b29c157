use super::*;

fn test_client(base_url: &str) -> KspClient {
    KspClient::with_base_url(base_url, Language::English, 5, "ksp-test/0.1")
        .expect("client construction should not fail")
}

#[test]
fn endpoint_appends_segments_to_api_root() {
    let client = test_client("https://ksp.co.il/m_action/api/");
    let url = client.endpoint(&["item", "211111"]).unwrap();
    assert_eq!(url.as_str(), "https://ksp.co.il/m_action/api/item/211111");
}

#[test]
fn endpoint_handles_root_without_trailing_slash() {
    let client = test_client("https://ksp.co.il/m_action/api");
    let url = client.endpoint(&["mlay", "12345"]).unwrap();
    assert_eq!(url.as_str(), "https://ksp.co.il/m_action/api/mlay/12345");
}

#[test]
fn endpoint_handles_bare_host() {
    let client = test_client("http://127.0.0.1:8080");
    let url = client.endpoint(&["item", "1"]).unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:8080/item/1");
}

#[test]
fn endpoint_empty_trailing_segment_keeps_slash() {
    let client = test_client("https://ksp.co.il/m_action/api/");
    let url = client.endpoint(&["category", ""]).unwrap();
    assert_eq!(url.as_str(), "https://ksp.co.il/m_action/api/category/");
}

#[test]
fn endpoint_percent_encodes_segments() {
    let client = test_client("https://ksp.co.il/m_action/api/");
    let url = client.endpoint(&["mlay", "a/b c"]).unwrap();
    assert_eq!(url.as_str(), "https://ksp.co.il/m_action/api/mlay/a%2Fb%20c");
}

#[test]
fn with_base_url_rejects_relative_url() {
    let result = KspClient::with_base_url("not-a-url", Language::English, 5, "ksp-test/0.1");
    let err = result.unwrap_err();
    assert!(
        matches!(err, KspError::InvalidBaseUrl { .. }),
        "expected InvalidBaseUrl, got: {err:?}"
    );
}

#[test]
fn with_base_url_rejects_non_hierarchical_url() {
    let result = KspClient::with_base_url("mailto:shop@ksp.test", Language::English, 5, "ua");
    assert!(matches!(result, Err(KspError::InvalidBaseUrl { .. })));
}

#[test]
fn from_config_uses_configured_language() {
    let config = AppConfig {
        base_url: "https://ksp.co.il/m_action/api/".to_owned(),
        language: Language::Hebrew,
        log_level: "info".to_owned(),
        request_timeout_secs: 5,
        user_agent: "ksp-test/0.1".to_owned(),
        poll_interval_secs: 2,
    };
    let client = KspClient::from_config(&config).unwrap();
    assert_eq!(client.language(), Language::Hebrew);
}
