//! sessionkit — client-side session/identity core.
//!
//! ARCHITECTURE
//! ============
//! Reconciles an externally-issued auth session into one canonical, reactive
//! identity record; exposes a one-time readiness gate that arbitrary code can
//! await before doing identity-dependent work; applies first-load preferences
//! (theme, language) exactly once per login; and resets all identity state on
//! a global sign-out broadcast, except on routes exempt from forced redirect.
//!
//! External collaborators (auth provider, RPC transport, theme engine,
//! localization, router, browser storage) stay behind the [`net::api::Api`]
//! and [`platform::Platform`] traits. The host constructs one
//! [`state::session::SessionStore`], wires the collaborators in, and calls
//! [`state::session::SessionStore::bind`] on mount.

pub mod event;
pub mod net;
pub mod platform;
pub mod state;
pub mod util;

pub use event::{EventBus, SubscriptionId, Topic};
pub use net::api::{Api, ApiError};
pub use net::types::{AuthSession, RemoteConfig, ThemePreference, UserDetail};
pub use platform::Platform;
pub use state::query::{Query, QueryStatus};
pub use state::session::{Identity, SessionBinding, SessionStore};
pub use util::prefs::Theme;
