//! Host-environment collaborator consumed by the session store.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything the store touches outside its own state goes through this
//! trait: theme engine, localization engine, router, persisted credentials,
//! and the chrome color hints. Hosts bridge it to their actual environment
//! (web-sys, a desktop shell, or plain mocks in tests), which keeps the
//! lifecycle logic itself browser-free.

#[cfg(test)]
#[path = "platform_test.rs"]
mod platform_test;

use crate::util::prefs::Theme;

/// Chrome color hint written while the dark theme is active.
pub const CHROME_DARK: &str = "#1C1C1E";
/// Chrome color hint written for any non-dark theme.
pub const CHROME_LIGHT: &str = "#F8F8F8";

/// Map a resolved theme to the status-bar / PWA chrome color hint.
#[must_use]
pub fn chrome_color(theme: Theme) -> &'static str {
    match theme {
        Theme::Dark => CHROME_DARK,
        Theme::Light => CHROME_LIGHT,
    }
}

/// Host environment hooks, injected as `Arc<dyn Platform>`.
///
/// All calls are synchronous; reads are point-in-time (nothing here is
/// subscribed to).
pub trait Platform: Send + Sync {
    /// OS/browser dark-mode preference, read at call time.
    fn prefers_dark_mode(&self) -> bool;

    /// Hand the resolved theme to the theme engine.
    fn set_theme(&self, theme: Theme);

    /// Switch the localization engine to `language`.
    fn change_locale(&self, language: &str);

    /// Locale currently active in the localization engine.
    fn current_locale(&self) -> String;

    /// Write both environment color hints (status bar and PWA chrome).
    fn set_chrome_theme_color(&self, hex: &str);

    /// Remove one persisted browser credential by key.
    fn remove_credential(&self, key: &str);

    /// Navigate the router to `path`.
    fn navigate(&self, path: &str);

    /// Path of the route currently displayed.
    fn current_route(&self) -> String;
}
