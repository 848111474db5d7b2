use serde_json::json;

use super::*;

// =============================================================================
// AuthSession
// =============================================================================

#[test]
fn auth_session_deserializes_with_optional_fields_absent() {
    let session: AuthSession = serde_json::from_value(json!({
        "id": "42",
        "token": "tok-abc"
    }))
    .unwrap();
    assert_eq!(session.id, "42");
    assert_eq!(session.token, "tok-abc");
    assert_eq!(session.name, None);
    assert_eq!(session.nickname, None);
    assert_eq!(session.image, None);
}

#[test]
fn auth_session_round_trip() {
    let session = AuthSession {
        id: "7".into(),
        name: Some("alice".into()),
        nickname: Some("ali".into()),
        image: Some("https://example.com/a.png".into()),
        token: "tok".into(),
    };
    let raw = serde_json::to_string(&session).unwrap();
    let restored: AuthSession = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, session);
}

#[test]
fn auth_session_default_is_unauthenticated() {
    let session = AuthSession::default();
    assert!(session.id.is_empty());
    assert!(session.token.is_empty());
}

// =============================================================================
// UserDetail
// =============================================================================

#[test]
fn user_detail_round_trip() {
    let detail = UserDetail {
        id: 42,
        name: "alice".into(),
        nickname: None,
        image: None,
        role: "superadmin".into(),
    };
    let raw = serde_json::to_string(&detail).unwrap();
    let restored: UserDetail = serde_json::from_str(&raw).unwrap();
    assert_eq!(restored, detail);
}

// =============================================================================
// RemoteConfig / ThemePreference
// =============================================================================

#[test]
fn remote_config_deserializes_lowercase_theme() {
    let config: RemoteConfig = serde_json::from_value(json!({
        "theme": "system",
        "language": "zh"
    }))
    .unwrap();
    assert_eq!(config.theme, Some(ThemePreference::System));
    assert_eq!(config.language.as_deref(), Some("zh"));
}

#[test]
fn remote_config_empty_object_is_all_none() {
    let config: RemoteConfig = serde_json::from_value(json!({})).unwrap();
    assert_eq!(config, RemoteConfig::default());
    assert_eq!(config.theme, None);
    assert_eq!(config.language, None);
}

#[test]
fn remote_config_rejects_unknown_theme() {
    let result: Result<RemoteConfig, _> = serde_json::from_value(json!({ "theme": "sepia" }));
    assert!(result.is_err());
}

#[test]
fn theme_preference_serializes_lowercase() {
    assert_eq!(serde_json::to_value(ThemePreference::Light).unwrap(), json!("light"));
    assert_eq!(serde_json::to_value(ThemePreference::Dark).unwrap(), json!("dark"));
    assert_eq!(serde_json::to_value(ThemePreference::System).unwrap(), json!("system"));
}

#[test]
fn remote_config_skips_absent_fields_when_serializing() {
    let raw = serde_json::to_string(&RemoteConfig::default()).unwrap();
    assert_eq!(raw, "{}");
}
