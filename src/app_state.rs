#![allow(missing_docs)] // MainControl setters

//! Global application state.
//!
//! `AppS` owns the preferences mapping and the preferences dialog
//! instance (if open). It is created once by the application and passed
//! around by reference, wrapped in an `Rc`, to everything that needs it.


use crate::audio::MixerControl;
use crate::config_store::ConfigStore;
use crate::errors::*;
use crate::notif::Notifier;
use crate::prefs::*;
use crate::ui::prefs_dialog::{PrefsDialog, PrefsViewBuilder};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;



const XDG_PREFIX: &str = "volti";
const CONFIG_FILE_NAME: &str = "config";
/// The UI description of the preferences window, inside the
/// resource directory.
pub const GLADE_FILE: &str = "preferences.glade";



/// The main application, i.e. tray icon, popup scale and friends.
/// Owns the live settings, which the preferences dialog keeps in sync
/// with the preferences mapping.
pub trait MainControl {
    fn set_control(&self, control: &str);
    fn set_mixer(&self, mixer: &str);
    fn set_scale_increment(&self, increment: f64);
    fn set_show_tooltip(&self, show: bool);
    fn set_scale_draw_value(&self, draw: bool);
    fn set_run_in_terminal(&self, run: bool);
    fn set_icon_theme(&self, theme: &str);
    fn set_toggle(&self, mode: ToggleMode);
    fn set_keys(&self, enabled: bool);
    fn set_show_notify(&self, show: bool);
    fn set_notify_timeout(&self, timeout: f64);
    fn set_notify_position(&self, position: bool);
    fn set_notify_body(&self, body: &str);
    fn set_mixer_internal(&self, internal: bool);

    /// Re-read card and control from the preferences and refresh
    /// everything depending on them.
    fn update(&self, prefs: &Prefs);

    /// Current volume, between 0 and 100.
    fn get_volume(&self) -> f64;

    /// Redraw the tray icon.
    fn update_icon(&self, volume: f64, icon: &str);

    fn update_tooltip(&self, volume: f64);

    fn set_tooltip_text(&self, text: &str);

    /// Show or refresh the volume notification.
    fn update_notify(&self, volume: f64, icon: &str);

    /// Sync the mute item of the popup menu.
    fn set_mute_check(&self, muted: bool);

    /// (Re-)grab or release the global hotkeys.
    fn init_keys_events(&self);

    /// (Re-)initialize the notification backend.
    fn init_notify(&self);

    /// The notification backend, if notifications are initialized.
    fn notifier(&self) -> Option<Rc<dyn Notifier>>;

    /// Whether global hotkeys can be grabbed at all.
    fn hotkeys_supported(&self) -> bool;
}



#[derive(Clone, Debug, PartialEq)]
/// Filesystem locations used by the preferences.
pub struct Paths {
    /// The config file.
    pub config_file: PathBuf,
    /// Directory holding the glade file and the `icons` directory.
    pub res_dir: PathBuf,
}

impl Paths {
    /// Resolve the locations via the XDG base directories.
    pub fn from_xdg() -> Result<Paths> {
        let xdg_dirs = get_xdg_dirs()?;
        let config_file = xdg_dirs.get_config_file(CONFIG_FILE_NAME);
        let res_dir = xdg_dirs
            .find_data_file(GLADE_FILE)
            .and_then(|p| p.parent().map(|d| d.to_path_buf()))
            .unwrap_or_else(|| PathBuf::from("./data"));

        debug!("Config file: {:?}, resources: {:?}", config_file, res_dir);

        return Ok(Paths {
            config_file,
            res_dir,
        });
    }
}


/// Get the set of XDG directories, relative to our project.
fn get_xdg_dirs() -> Result<xdg::BaseDirectories> {
    return Ok(xdg::BaseDirectories::with_prefix(XDG_PREFIX)?);
}



/// The application state.
pub struct AppS {
    /// The preferences mapping, shared with the main application.
    pub prefs: RefCell<Prefs>,
    pub paths: Paths,
    pub main: Rc<dyn MainControl>,
    pub mixer: Rc<dyn MixerControl>,
    /// Creates the widgets of the preferences dialog.
    pub ui: Box<dyn PrefsViewBuilder>,
    pub(crate) prefs_dialog: RefCell<Option<PrefsDialog>>,
}

impl AppS {
    /// Create the application state. The config file is created from
    /// `prefs` if it doesn't exist and then read back into `prefs`.
    pub fn new(
        paths: Paths,
        prefs: Prefs,
        main: Rc<dyn MainControl>,
        mixer: Rc<dyn MixerControl>,
        ui: Box<dyn PrefsViewBuilder>,
    ) -> Result<AppS> {
        let mut prefs = prefs;
        let mut store = ConfigStore::new(&paths.config_file, &prefs)?;
        store.ensure_exists(&prefs)?;
        store.load(&mut prefs)?;

        debug!("Preferences at startup:\n{}", prefs);

        return Ok(AppS {
            prefs: RefCell::new(prefs),
            paths,
            main,
            mixer,
            ui,
            prefs_dialog: RefCell::new(None),
        });
    }


    /// Whether the preferences dialog is currently open.
    pub fn prefs_dialog_open(&self) -> bool {
        return self.prefs_dialog.borrow().is_some();
    }
}
