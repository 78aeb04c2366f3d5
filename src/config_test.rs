use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn from_lookup_uses_local_defaults() {
    let cfg = AppConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
    assert_eq!(cfg.admin_base_url, DEFAULT_ADMIN_BASE_URL);
}

#[test]
fn from_lookup_applies_overrides_and_trims_slashes() {
    let cfg = AppConfig::from_lookup(lookup_from(&[
        (API_BASE_URL_VAR, "https://api.example.test/v1/"),
        (ADMIN_BASE_URL_VAR, "https://admin.example.test/"),
    ]))
    .unwrap();
    assert_eq!(cfg.api_base_url, "https://api.example.test/v1");
    assert_eq!(cfg.admin_base_url, "https://admin.example.test");
}

#[test]
fn from_lookup_treats_blank_as_unset() {
    let cfg = AppConfig::from_lookup(lookup_from(&[(API_BASE_URL_VAR, "   ")])).unwrap();
    assert_eq!(cfg.api_base_url, DEFAULT_API_BASE_URL);
}

#[test]
fn from_lookup_rejects_relative_url() {
    let err = AppConfig::from_lookup(lookup_from(&[(ADMIN_BASE_URL_VAR, "/admin")])).unwrap_err();
    assert_eq!(err, ConfigError::InvalidUrl { var: ADMIN_BASE_URL_VAR, value: "/admin".to_owned() });
}

#[test]
fn from_lookup_rejects_non_http_scheme() {
    let err = AppConfig::from_lookup(lookup_from(&[(API_BASE_URL_VAR, "ftp://files.example.test")])).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedScheme { var: API_BASE_URL_VAR, .. }));
}

#[test]
fn admin_origin_drops_path_and_keeps_port() {
    let cfg = AppConfig {
        api_base_url: DEFAULT_API_BASE_URL.to_owned(),
        admin_base_url: "http://localhost:3001/panel".to_owned(),
    };
    assert_eq!(cfg.admin_origin().as_deref(), Some("http://localhost:3001"));
}

#[test]
fn origin_of_omits_default_port() {
    assert_eq!(origin_of("https://admin.example.test:443/x").as_deref(), Some("https://admin.example.test"));
}

#[test]
fn origin_of_rejects_garbage() {
    assert_eq!(origin_of("not a url"), None);
}
