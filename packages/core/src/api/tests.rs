use crate::api::{AttendanceApi, auth_value};

#[test]
fn test_base_url_defaults_to_https() {
    let api = AttendanceApi::new("attendance.example.com").unwrap();
    let url = api.endpoint("api/settings").unwrap();
    assert_eq!(url.as_str(), "https://attendance.example.com/api/settings");
}

#[test]
fn test_base_url_keeps_explicit_scheme() {
    let api = AttendanceApi::new("http://localhost:4000").unwrap();
    let url = api.endpoint("/api/clock/in").unwrap();
    assert_eq!(url.as_str(), "http://localhost:4000/api/clock/in");
}

#[test]
fn test_base_url_trailing_slash_is_idempotent() {
    let with = AttendanceApi::new("https://attendance.example.com/").unwrap();
    let without = AttendanceApi::new("https://attendance.example.com").unwrap();

    assert_eq!(
        with.endpoint("api/stats").unwrap(),
        without.endpoint("api/stats").unwrap()
    );
}

#[test]
fn test_invalid_url_is_rejected() {
    assert!(AttendanceApi::new("https://in valid").is_err());
}

#[test]
fn test_auth_value_prefixes_bare_tokens() {
    assert_eq!(auth_value("abc123"), "Bearer abc123");
    assert_eq!(auth_value("Bearer abc123"), "Bearer abc123");
}
