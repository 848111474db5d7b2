//! First-load preference reconciliation decisions.
//!
//! DESIGN
//! ======
//! These are the pure halves of reconciliation: whether it should run, and
//! which theme/language win. The side effects (theme engine, localization,
//! the setup flag) stay in `SessionStore::setup_preferences` so everything
//! here is trivially testable.

#[cfg(test)]
#[path = "prefs_test.rs"]
mod prefs_test;

use crate::net::types::{RemoteConfig, ThemePreference};

/// Language applied when the remote config carries none.
pub const DEFAULT_LANGUAGE: &str = "en";

/// A resolved display theme. `system` never survives resolution; it is
/// collapsed against the OS preference in [`effective_theme`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stable lowercase name, as handed to theme engines.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

/// Whether reconciliation should run at all.
///
/// Runs on first load (`!is_setup`) and again whenever the active locale no
/// longer matches the configured language. A config without a language never
/// matches the active locale, so it re-runs until setup completes.
#[must_use]
pub fn should_reconcile(is_setup: bool, current_locale: &str, config: &RemoteConfig) -> bool {
    !is_setup || config.language.as_deref() != Some(current_locale)
}

/// Resolve the effective theme from the remote preference and the
/// point-in-time system preference.
#[must_use]
pub fn effective_theme(preference: Option<ThemePreference>, system_dark: bool) -> Theme {
    let system = if system_dark { Theme::Dark } else { Theme::Light };
    match preference {
        Some(ThemePreference::Light) => Theme::Light,
        Some(ThemePreference::Dark) => Theme::Dark,
        Some(ThemePreference::System) | None => system,
    }
}

/// Effective language: the configured tag, or [`DEFAULT_LANGUAGE`].
#[must_use]
pub fn effective_language(config: &RemoteConfig) -> String {
    config
        .language
        .clone()
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_owned())
}
