//! Transport contract for remote identity queries.
//!
//! ERROR HANDLING
//! ==============
//! Implementations surface failures as [`ApiError`] values; the store's
//! query caches capture them as per-query state and never raise them to
//! callers, so no transport failure is ever fatal.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use async_trait::async_trait;

use super::types::{RemoteConfig, UserDetail};

/// Errors surfaced by the remote-call transport.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// The call never reached the server or the connection dropped.
    #[error("transport failure: {0}")]
    Transport(String),
    /// The server answered with a payload that failed to decode.
    #[error("malformed response: {0}")]
    Decode(String),
    /// The server rejected the call outright.
    #[error("server rejected request with status {0}")]
    Status(u16),
}

/// Remote-call transport consumed by the session store.
///
/// Implementations own the actual RPC mechanism; the store only depends on
/// these three calls.
#[async_trait]
pub trait Api: Send + Sync {
    /// `users.detail` — full record for a numeric user id.
    async fn user_detail(&self, id: i64) -> Result<UserDetail, ApiError>;

    /// `users.canRegister` — whether open registration is currently allowed.
    async fn can_register(&self) -> Result<bool, ApiError>;

    /// Remote preference configuration for first-load reconciliation.
    async fn app_config(&self) -> Result<RemoteConfig, ApiError>;
}
