//! Pure helpers shared across the identity core.

pub mod prefs;
