use super::*;

fn client_for(base_url: &str) -> SearchClient {
    SearchClient::new(base_url, 5, "leadfinder-test/0.1")
        .expect("failed to build test SearchClient")
}

#[test]
fn endpoint_appends_path() {
    let client = client_for("http://127.0.0.1:8000");
    assert_eq!(
        client.endpoint(ZIP_SEARCH_PATH),
        "http://127.0.0.1:8000/search_zip_codes"
    );
    assert_eq!(
        client.endpoint(REGION_SEARCH_PATH),
        "http://127.0.0.1:8000/search_carwashes_regions"
    );
}

#[test]
fn endpoint_strips_trailing_slash() {
    let client = client_for("http://127.0.0.1:8000/");
    assert_eq!(
        client.endpoint(ZIP_SEARCH_PATH),
        "http://127.0.0.1:8000/search_zip_codes"
    );
}

#[test]
fn from_config_uses_backend_url() {
    let config = leadfinder_core::AppConfig {
        backend_url: "http://backend.internal/".to_owned(),
        env: leadfinder_core::Environment::Test,
        log_level: "info".to_owned(),
        request_timeout_secs: 30,
        user_agent: "leadfinder-test/0.1".to_owned(),
        default_radius_meters: 5000,
    };
    let client = SearchClient::from_config(&config).unwrap();
    assert_eq!(
        client.endpoint(ZIP_SEARCH_PATH),
        "http://backend.internal/search_zip_codes"
    );
    assert_eq!(client.request_timeout_secs, 30);
}
