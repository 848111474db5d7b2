//! Wire DTOs for the session/identity boundary.
//!
//! DESIGN
//! ======
//! These types mirror the external payloads exactly so serde round-trips
//! stay lossless. Theme preferences are a closed enum rather than free
//! strings; anything outside `light`/`dark`/`system` is a decode error.

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::{Deserialize, Serialize};

/// Externally-issued session object from the authentication provider.
///
/// Absence of a session is represented as `None` at the call site, never as
/// an empty struct.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthSession {
    /// Opaque user identifier.
    pub id: String,
    /// Display name, if the provider supplies one.
    pub name: Option<String>,
    /// Short display handle, if the provider supplies one.
    pub nickname: Option<String>,
    /// Avatar image reference, if available.
    pub image: Option<String>,
    /// Opaque session credential; empty means unauthenticated.
    pub token: String,
}

/// Full user record returned by the `users.detail` query.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    /// Numeric user identifier.
    pub id: i64,
    /// Display name.
    pub name: String,
    /// Short display handle, if set.
    pub nickname: Option<String>,
    /// Avatar image reference, if set.
    pub image: Option<String>,
    /// Role tag (e.g. `"superadmin"`).
    pub role: String,
}

/// Remote preference configuration applied during first-load reconciliation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RemoteConfig {
    /// Preferred display theme; `system` defers to the OS preference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemePreference>,
    /// Preferred language tag (e.g. `"en"`, `"zh"`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

/// Closed set of valid remote theme preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    /// Always use the light theme.
    Light,
    /// Always use the dark theme.
    Dark,
    /// Follow the OS/browser dark-mode preference at reconciliation time.
    System,
}
