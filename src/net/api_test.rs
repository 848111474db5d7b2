use super::*;

#[test]
fn api_error_display_transport() {
    let err = ApiError::Transport("connection reset".into());
    assert_eq!(err.to_string(), "transport failure: connection reset");
}

#[test]
fn api_error_display_decode() {
    let err = ApiError::Decode("missing field `id`".into());
    assert_eq!(err.to_string(), "malformed response: missing field `id`");
}

#[test]
fn api_error_display_status() {
    let err = ApiError::Status(503);
    assert_eq!(err.to_string(), "server rejected request with status 503");
}

#[test]
fn api_error_is_cloneable_for_cache_storage() {
    let err = ApiError::Status(401);
    assert_eq!(err.clone(), err);
}
