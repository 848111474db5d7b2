use super::*;

fn config(theme: Option<ThemePreference>, language: Option<&str>) -> RemoteConfig {
    RemoteConfig { theme, language: language.map(str::to_owned) }
}

// =============================================================================
// should_reconcile
// =============================================================================

#[test]
fn reconciles_before_setup() {
    assert!(should_reconcile(false, "en", &config(None, Some("en"))));
}

#[test]
fn skips_when_setup_and_locale_matches() {
    assert!(!should_reconcile(true, "en", &config(None, Some("en"))));
}

#[test]
fn reconciles_again_when_language_changed() {
    assert!(should_reconcile(true, "en", &config(None, Some("fr"))));
}

#[test]
fn reconciles_when_config_has_no_language() {
    // `None` never matches a concrete locale, so setup alone does not gate.
    assert!(should_reconcile(true, "en", &config(None, None)));
}

// =============================================================================
// effective_theme
// =============================================================================

#[test]
fn system_preference_with_dark_os_resolves_dark() {
    assert_eq!(effective_theme(Some(ThemePreference::System), true), Theme::Dark);
}

#[test]
fn system_preference_with_light_os_resolves_light() {
    assert_eq!(effective_theme(Some(ThemePreference::System), false), Theme::Light);
}

#[test]
fn explicit_dark_ignores_system() {
    assert_eq!(effective_theme(Some(ThemePreference::Dark), false), Theme::Dark);
}

#[test]
fn explicit_light_ignores_system() {
    assert_eq!(effective_theme(Some(ThemePreference::Light), true), Theme::Light);
}

#[test]
fn absent_preference_falls_back_to_system() {
    assert_eq!(effective_theme(None, false), Theme::Light);
    assert_eq!(effective_theme(None, true), Theme::Dark);
}

// =============================================================================
// effective_language / Theme
// =============================================================================

#[test]
fn configured_language_wins() {
    assert_eq!(effective_language(&config(None, Some("zh"))), "zh");
}

#[test]
fn missing_language_falls_back_to_default() {
    assert_eq!(effective_language(&config(None, None)), DEFAULT_LANGUAGE);
}

#[test]
fn theme_default_is_light() {
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn theme_as_str_is_lowercase() {
    assert_eq!(Theme::Light.as_str(), "light");
    assert_eq!(Theme::Dark.as_str(), "dark");
}
