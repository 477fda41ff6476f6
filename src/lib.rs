#![warn(missing_docs)]

//! The preferences of volti, a tray volume control.
//!
//! The preferences live in a flat string mapping (`prefs`), which is
//! persisted in an INI style config file (`config_store`). The
//! preferences dialog (`ui::prefs_dialog`) edits that mapping and
//! pushes every change to the running application via the traits in
//! `app_state`, `audio` and `notif`.
//!
//! The default build has no system dependencies. The alsa backend and
//! the GTK dialog are behind the `alsa-backend` and `gtk-ui` features.

pub extern crate flexi_logger;
#[macro_use]
pub extern crate log;

#[macro_use]
pub extern crate error_chain;

#[cfg(feature = "alsa-backend")]
pub extern crate alsa;
#[cfg(feature = "gtk-ui")]
pub extern crate gdk_pixbuf;
#[cfg(feature = "gtk-ui")]
pub extern crate glib;
#[cfg(feature = "gtk-ui")]
pub extern crate gtk;
pub extern crate which;
pub extern crate xdg;

#[macro_use]
pub mod errors;

pub mod app_state;
pub mod audio;
pub mod config_store;
pub mod ini;
pub mod notif;
pub mod prefs;
pub mod support;
pub mod ui;

#[cfg(test)]
mod test_utils;
