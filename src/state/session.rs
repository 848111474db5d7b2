//! Session store — canonical identity record and lifecycle coordination.
//!
//! ARCHITECTURE
//! ============
//! One `SessionStore` exists per application, shared by `Arc` and injected
//! into consumers (no ambient globals). Only the store's own transition
//! handlers mutate the identity record; every mutation goes through a
//! `watch` channel so observers are notified on each write. Three external
//! lifecycle events drive it: an auth session becoming available, a theme
//! change, and the global sign-out broadcast.
//!
//! Ordering matters: `handle_session` finishes copying identity fields
//! before publishing readiness, and the event bus delivers synchronously,
//! so a woken waiter always sees a fully-populated record.
//!
//! TRADE-OFFS
//! ==========
//! `wait` has no timeout: a caller waiting while the user never logs in
//! pends for the life of the process. Each call registers its own one-shot
//! subscription, so resolved waits leave nothing behind.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use std::sync::{Arc, Mutex, PoisonError, Weak};

use serde_json::Value;
use tokio::sync::{oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::event::{EventBus, SubscriptionId, Topic};
use crate::net::api::Api;
use crate::net::types::{AuthSession, RemoteConfig, UserDetail};
use crate::platform::{Platform, chrome_color};
use crate::state::query::Query;
use crate::util::prefs::{self, Theme};

/// Role tag granting super-admin rights.
pub const SUPER_ADMIN_ROLE: &str = "superadmin";
/// Route navigated to after a non-exempt sign-out.
pub const SIGNIN_PATH: &str = "/signin";
/// Persisted credential keys removed on sign-out.
const CREDENTIAL_KEYS: [&str; 2] = ["username", "password"];

/// Routes on which a sign-out broadcast is ignored outright: no state
/// change, no navigation.
#[must_use]
pub fn is_signout_exempt(path: &str) -> bool {
    path == "/signup" || path == "/api-doc" || path.contains("/share")
}

/// Canonical in-memory record of the current user session.
///
/// Empty strings mean "unset"; an empty `token` means unauthenticated.
/// Consumers read snapshots and must never write back — mutation belongs to
/// the store's transition handlers alone.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Identity {
    /// Opaque user identifier; empty while unauthenticated.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short display handle.
    pub nickname: String,
    /// Avatar image reference.
    pub image: String,
    /// Opaque session credential; empty while unauthenticated.
    pub token: String,
    /// Role tag; see [`SUPER_ADMIN_ROLE`].
    pub role: String,
    /// Last theme observed from the theme engine.
    pub theme: Theme,
    /// True once first-load preference reconciliation has run this login.
    pub is_setup: bool,
}

impl Identity {
    /// True iff a session credential is present, independent of any other
    /// field.
    #[must_use]
    pub fn is_login(&self) -> bool {
        !self.token.is_empty()
    }

    /// True iff the role tag grants super-admin rights.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.role == SUPER_ADMIN_ROLE
    }

    /// Readiness: identity is fully populated for dependent work.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        !self.id.is_empty() && !self.token.is_empty()
    }
}

/// Central identity/readiness store.
///
/// Construct once via [`SessionStore::new`], share by `Arc`, and drive it
/// through [`SessionStore::bind`] (or the individual handlers in tests).
pub struct SessionStore {
    identity: watch::Sender<Identity>,
    bus: Arc<EventBus>,
    api: Arc<dyn Api>,
    platform: Arc<dyn Platform>,
    /// `users.detail` cache, keyed by the numeric user id.
    pub user_detail: Query<i64, UserDetail>,
    /// `users.canRegister` cache.
    pub can_register: Query<(), bool>,
}

impl SessionStore {
    /// Build a store wired to its collaborators.
    #[must_use]
    pub fn new(bus: Arc<EventBus>, api: Arc<dyn Api>, platform: Arc<dyn Platform>) -> Arc<Self> {
        let user_detail = {
            let api = api.clone();
            Query::new(move |id| {
                let api = api.clone();
                async move { api.user_detail(id).await }
            })
        };
        let can_register = {
            let api = api.clone();
            Query::new(move |()| {
                let api = api.clone();
                async move { api.can_register().await }
            })
        };
        Arc::new(Self {
            identity: watch::Sender::new(Identity::default()),
            bus,
            api,
            platform,
            user_detail,
            can_register,
        })
    }

    /// Clone of the current identity record.
    #[must_use]
    pub fn snapshot(&self) -> Identity {
        self.identity.borrow().clone()
    }

    /// Observe every identity mutation. The receiver starts at the current
    /// value and is marked changed on each write.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Identity> {
        self.identity.subscribe()
    }

    /// True iff a session credential is present.
    #[must_use]
    pub fn is_login(&self) -> bool {
        self.identity.borrow().is_login()
    }

    /// True iff the current role grants super-admin rights.
    #[must_use]
    pub fn is_super_admin(&self) -> bool {
        self.identity.borrow().is_super_admin()
    }

    /// Resolve with the store once identity is ready.
    ///
    /// Fast path: already logged in resolves immediately, no signal
    /// round-trip. Otherwise this registers a fresh one-shot readiness
    /// subscription (removed automatically after it fires) and resolves at
    /// the next readiness transition. Concurrent callers each get their own
    /// registration and all resolve at that same transition.
    ///
    /// Never errors; if readiness never occurs this pends forever.
    pub async fn wait(self: &Arc<Self>) -> Arc<Self> {
        if self.is_login() {
            return self.clone();
        }
        let (tx, rx) = oneshot::channel();
        let tx = Mutex::new(Some(tx));
        let id = self.bus.subscribe_once(Topic::UserReady, move |_| {
            if let Some(tx) = tx.lock().unwrap_or_else(PoisonError::into_inner).take() {
                let _ = tx.send(());
            }
        });
        // Re-check after registering: on a multi-threaded host the ready
        // publish can land between the fast path and the subscription.
        if self.is_login() {
            self.bus.unsubscribe(id);
            return self.clone();
        }
        let _ = rx.await;
        self.clone()
    }

    /// Adopt an externally-observed session: the sole write path for `id`,
    /// `token`, and the display fields.
    ///
    /// No-op while already logged in or when no session is present. After
    /// the copy, readiness is published (once per login), first-load
    /// preferences are applied, and the `users.detail` query is issued with
    /// the numeric form of the id.
    pub async fn handle_session(&self, session: Option<&AuthSession>) {
        let Some(session) = session else { return };
        if self.is_login() {
            return;
        }
        info!(id = %session.id, "adopting external session");
        self.identity.send_modify(|identity| {
            identity.id = session.id.clone();
            identity.name = session.name.clone().unwrap_or_default();
            identity.nickname = session.nickname.clone().unwrap_or_default();
            identity.image = session.image.clone().unwrap_or_default();
            identity.token = session.token.clone();
        });
        // Waiters woken by this publish must observe the fully-populated
        // record, so it happens strictly after the copy above. A session
        // missing id or token is adopted but never becomes ready.
        if self.identity.borrow().is_ready() {
            self.bus.publish(Topic::UserReady, &Value::Null);
        }
        self.setup_preferences().await;
        let id = self.identity.borrow().id.clone();
        match id.parse::<i64>() {
            Ok(id) => {
                self.user_detail.call(id).await;
            }
            Err(_) => warn!(%id, "user id is not numeric, skipping detail query"),
        }
    }

    /// Apply first-load preferences (theme, language) from the remote
    /// config, at most once per login session.
    ///
    /// Re-runs when the configured language stops matching the active
    /// locale. A failed config fetch degrades to defaults rather than
    /// skipping reconciliation. Sets the setup flag last, unconditionally,
    /// once the gate has admitted the run.
    pub async fn setup_preferences(&self) {
        let config = match self.api.app_config().await {
            Ok(config) => config,
            Err(error) => {
                warn!(%error, "config fetch failed, reconciling with defaults");
                RemoteConfig::default()
            }
        };
        let locale = self.platform.current_locale();
        if !prefs::should_reconcile(self.identity.borrow().is_setup, &locale, &config) {
            return;
        }
        let theme = prefs::effective_theme(config.theme, self.platform.prefers_dark_mode());
        self.platform.set_theme(theme);
        self.platform.change_locale(&prefs::effective_language(&config));
        self.identity.send_modify(|identity| identity.is_setup = true);
        debug!(theme = theme.as_str(), "first-load preferences applied");
    }

    /// Record a theme-engine change and refresh the chrome color hints.
    /// Independent of login state; may fire before or after login.
    pub fn handle_theme_change(&self, theme: Theme) {
        self.identity.send_modify(|identity| identity.theme = theme);
        self.platform.set_chrome_theme_color(chrome_color(theme));
    }

    /// React to the global sign-out broadcast.
    ///
    /// Exempt routes ignore the broadcast entirely. Otherwise the persisted
    /// credentials are dropped, the record is cleared, and the router is
    /// sent to [`SIGNIN_PATH`].
    pub fn handle_signout(&self) {
        let route = self.platform.current_route();
        if is_signout_exempt(&route) {
            debug!(%route, "sign-out broadcast ignored on exempt route");
            return;
        }
        info!(%route, "signing out");
        for key in CREDENTIAL_KEYS {
            self.platform.remove_credential(key);
        }
        self.clear();
        self.platform.navigate(SIGNIN_PATH);
    }

    /// Reset the identity record to its logged-out state.
    ///
    /// `theme` survives: it echoes the theme engine, not the login session.
    pub fn clear(&self) {
        debug!("clearing identity state");
        self.identity.send_modify(|identity| {
            identity.id.clear();
            identity.token.clear();
            identity.name.clear();
            identity.nickname.clear();
            identity.image.clear();
            identity.role.clear();
            identity.is_setup = false;
        });
    }

    /// Lifecycle entry point: wire the three reactive subscriptions.
    ///
    /// Spawns one task per external watch channel (the value already present
    /// at bind time is processed first, then every change) and registers a
    /// persistent sign-out subscription on the bus. Dropping the returned
    /// binding aborts the tasks and removes the subscription — component
    /// teardown semantics.
    #[must_use]
    pub fn bind(
        self: &Arc<Self>,
        mut sessions: watch::Receiver<Option<AuthSession>>,
        mut themes: watch::Receiver<Theme>,
    ) -> SessionBinding {
        let store = self.clone();
        let session_task = tokio::spawn(async move {
            loop {
                let current = sessions.borrow_and_update().clone();
                store.handle_session(current.as_ref()).await;
                if sessions.changed().await.is_err() {
                    break;
                }
            }
        });
        let store = self.clone();
        let theme_task = tokio::spawn(async move {
            loop {
                let current = *themes.borrow_and_update();
                store.handle_theme_change(current);
                if themes.changed().await.is_err() {
                    break;
                }
            }
        });
        // Weak reference: the bus must not keep the store alive through its
        // own subscriber list.
        let weak = Arc::downgrade(self);
        let signout_sub = self.bus.subscribe(Topic::UserSignout, move |_| {
            if let Some(store) = Weak::upgrade(&weak) {
                store.handle_signout();
            }
        });
        SessionBinding {
            tasks: vec![session_task, theme_task],
            signout_sub,
            bus: self.bus.clone(),
        }
    }
}

/// Keeps the lifecycle subscriptions alive. Dropping it aborts the watch
/// tasks and removes the sign-out subscription.
pub struct SessionBinding {
    tasks: Vec<JoinHandle<()>>,
    signout_sub: SubscriptionId,
    bus: Arc<EventBus>,
}

impl Drop for SessionBinding {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
        self.bus.unsubscribe(self.signout_sub);
    }
}
