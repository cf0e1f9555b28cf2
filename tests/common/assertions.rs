//! Assertion helpers for tests.

use axum::http::StatusCode;
use pretty_assertions::assert_eq;

use super::app::TestResponse;

/// Assert response has expected status code
pub fn assert_status(response: &TestResponse, expected: StatusCode) {
    assert_eq!(
        response.status,
        expected,
        "Expected status {}, got {}. Body: {}",
        expected,
        response.status,
        response.text()
    );
}

/// Assert response is OK (200)
pub fn assert_ok(response: &TestResponse) {
    assert_status(response, StatusCode::OK);
}

/// Assert response is a JSON error with the given status and message
pub fn assert_error(response: &TestResponse, expected: StatusCode, message: &str) {
    assert_status(response, expected);
    let json: serde_json::Value = response.json();
    assert_eq!(
        json["error"].as_str(),
        Some(message),
        "Unexpected error body: {}",
        response.text()
    );
}

/// Assert a signed URL has the CDN wire shape
pub fn assert_signed_url_shape(signed_url: &str) {
    let token = super::fixtures::token_of(signed_url);
    assert!(
        !token.is_empty() && !token.contains(&['+', '/', '='][..]),
        "Token is not URL-safe base64: {token}"
    );

    let token_at = signed_url.find("token=").expect("token parameter");
    let expires_at = signed_url.find("&expires=").expect("expires parameter");
    assert!(token_at < expires_at, "token must come before expires");
    assert!(
        signed_url.starts_with("https://cdn.example.net/"),
        "Unexpected base: {signed_url}"
    );
}
