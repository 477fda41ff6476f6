//! The preferences window.

pub mod models;
pub mod prefs_dialog;

#[cfg(feature = "gtk-ui")]
pub mod gtk_prefs;
