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

/// Returns a map with all required env vars populated with valid defaults.
fn full_env<'a>() -> HashMap<&'a str, &'a str> {
    let mut m = HashMap::new();
    m.insert("LEADFINDER_BACKEND_URL", "http://127.0.0.1:8000");
    m
}

#[test]
fn parse_environment_development() {
    assert_eq!(parse_environment("development"), Environment::Development);
}

#[test]
fn parse_environment_test() {
    assert_eq!(parse_environment("test"), Environment::Test);
}

#[test]
fn parse_environment_production() {
    assert_eq!(parse_environment("production"), Environment::Production);
}

#[test]
fn parse_environment_unknown_defaults_to_development() {
    assert_eq!(parse_environment("unknown"), Environment::Development);
}

#[test]
fn build_app_config_fails_without_backend_url() {
    let map: HashMap<&str, &str> = HashMap::new();
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(result, Err(ConfigError::MissingEnvVar(ref v)) if v == "LEADFINDER_BACKEND_URL"),
        "expected MissingEnvVar(LEADFINDER_BACKEND_URL), got: {result:?}"
    );
}

#[test]
fn build_app_config_succeeds_with_all_required_vars() {
    let map = full_env();
    let result = build_app_config(lookup_from_map(&map));
    assert!(result.is_ok(), "expected Ok, got: {result:?}");
    let cfg = result.unwrap();
    assert_eq!(cfg.backend_url, "http://127.0.0.1:8000");
    assert_eq!(cfg.env, Environment::Development);
    assert_eq!(cfg.log_level, "info");
    assert_eq!(cfg.request_timeout_secs, 30);
    assert_eq!(cfg.user_agent, "leadfinder/0.1 (lead-generation)");
    assert_eq!(cfg.default_radius_meters, 5000);
}

#[test]
fn build_app_config_fails_with_invalid_timeout() {
    let mut map = full_env();
    map.insert("LEADFINDER_REQUEST_TIMEOUT_SECS", "not-a-number");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADFINDER_REQUEST_TIMEOUT_SECS"
        ),
        "expected InvalidEnvVar(LEADFINDER_REQUEST_TIMEOUT_SECS), got: {result:?}"
    );
}

#[test]
fn build_app_config_fails_with_invalid_radius() {
    let mut map = full_env();
    map.insert("LEADFINDER_DEFAULT_RADIUS_M", "-5");
    let result = build_app_config(lookup_from_map(&map));
    assert!(
        matches!(
            result,
            Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "LEADFINDER_DEFAULT_RADIUS_M"
        ),
        "expected InvalidEnvVar(LEADFINDER_DEFAULT_RADIUS_M), got: {result:?}"
    );
}

#[test]
fn build_app_config_respects_overrides() {
    let mut map = full_env();
    map.insert("LEADFINDER_ENV", "production");
    map.insert("LEADFINDER_LOG_LEVEL", "debug");
    map.insert("LEADFINDER_REQUEST_TIMEOUT_SECS", "120");
    map.insert("LEADFINDER_DEFAULT_RADIUS_M", "12000");
    let cfg = build_app_config(lookup_from_map(&map)).unwrap();
    assert_eq!(cfg.env, Environment::Production);
    assert_eq!(cfg.log_level, "debug");
    assert_eq!(cfg.request_timeout_secs, 120);
    assert_eq!(cfg.default_radius_meters, 12000);
}
