use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn from_lookup_defaults() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("HOME", "/home/student")])).unwrap();
    assert_eq!(cfg.base_url, DEFAULT_BASE_URL);
    assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
    assert_eq!(cfg.connect_timeout_secs, DEFAULT_CONNECT_TIMEOUT_SECS);
    assert_eq!(cfg.storage_path, PathBuf::from("/home/student/.campus/storage.json"));
    assert_eq!(cfg.login_path, "/login");
}

#[test]
fn from_lookup_without_home_uses_relative_storage() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
    assert_eq!(cfg.storage_path, PathBuf::from(DEFAULT_STORAGE_FILE));
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[
        ("CAMPUS_BASE_URL", "https://campus.example.edu/api/"),
        ("CAMPUS_TIMEOUT_MS", "2500"),
        ("CAMPUS_CONNECT_TIMEOUT_SECS", "3"),
        ("CAMPUS_STORAGE_PATH", "/tmp/campus.json"),
        ("CAMPUS_LOGIN_PATH", "/auth/login"),
    ]))
    .unwrap();
    assert_eq!(cfg.base_url, "https://campus.example.edu/api");
    assert_eq!(cfg.timeout_ms, 2500);
    assert_eq!(cfg.connect_timeout_secs, 3);
    assert_eq!(cfg.storage_path, PathBuf::from("/tmp/campus.json"));
    assert_eq!(cfg.login_path, "/auth/login");
}

#[test]
fn from_lookup_bad_numbers_fall_back() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("CAMPUS_TIMEOUT_MS", "soon")])).unwrap();
    assert_eq!(cfg.timeout_ms, DEFAULT_TIMEOUT_MS);
}

#[test]
fn from_lookup_relative_login_path_falls_back() {
    let cfg = ClientConfig::from_lookup(lookup_from(&[("CAMPUS_LOGIN_PATH", "login")])).unwrap();
    assert_eq!(cfg.login_path, DEFAULT_LOGIN_PATH);
}

#[test]
fn from_lookup_relative_base_url_errors() {
    let err = ClientConfig::from_lookup(lookup_from(&[("CAMPUS_BASE_URL", "/api")])).unwrap_err();
    assert!(err.to_string().contains("must be absolute"));
}

#[test]
fn url_joins_with_and_without_slash() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.url("/courses"), "http://127.0.0.1:8080/api/courses");
    assert_eq!(cfg.url("courses/3"), "http://127.0.0.1:8080/api/courses/3");
}

#[test]
fn default_storage_path_matches_from_env_rule() {
    let cfg = ClientConfig::default();
    assert_eq!(cfg.storage_path, default_storage_path(std::env::var("HOME").ok()));
    assert!(cfg.storage_path.ends_with(DEFAULT_STORAGE_FILE));
}

#[test]
fn default_agrees_with_empty_lookup_given_same_home() {
    let home = std::env::var("HOME").ok();
    let cfg = ClientConfig::from_lookup(move |key: &str| if key == "HOME" { home.clone() } else { None }).unwrap();
    assert_eq!(cfg, ClientConfig::default());
}
