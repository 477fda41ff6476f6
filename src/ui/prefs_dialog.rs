//! The preferences dialog.
//!
//! There is at most one dialog at a time, owned by `AppS`. Opening it
//! reads the config file, builds the widgets through a
//! `PrefsViewBuilder` and shows them. Every widget change arrives as a
//! `PrefsEvent` via `dispatch()`, which updates the preferences mapping,
//! pushes the value to the main application and triggers immediate
//! side effects where needed. Closing writes the config file and
//! destroys the window.


use crate::app_state::*;
use crate::audio::icon_name;
use crate::config_store::ConfigStore;
use crate::errors::*;
use crate::notif::NotifyCaps;
use crate::prefs::*;
use crate::support::cmd::browse_start_dir;
use crate::support::themes::icon_themes;
use crate::ui::models::*;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;


const VERSION: &str = env!("CARGO_PKG_VERSION");



#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
/// Widgets whose sensitivity depends on other settings.
pub enum PrefsWidget {
    MixerEntry,
    BrowseButton,
    TerminalCheck,
    MixerValuesCheck,
    NotifyTimeoutSpin,
    NotifyPositionCheck,
    NotifyBodyText,
    KeysCheck,
}


#[derive(Clone, Debug, PartialEq)]
/// A user interaction with the preferences dialog.
pub enum PrefsEvent {
    /// A row of the card combo box was activated.
    CardChanged(usize),
    /// The radio toggle of a mixer list row was clicked.
    MixerToggled(usize),
    /// A row of the icon theme combo box was activated.
    ThemeChanged(usize),
    MixerEntryChanged(String),
    BrowseClicked,
    ScaleIncrementChanged(f64),
    TooltipToggled(bool),
    DrawValueToggled(bool),
    TerminalToggled(bool),
    MixerInternalToggled(bool),
    MixerValuesToggled(bool),
    /// One of the middle click radio buttons became active.
    ToggleModeActivated(ToggleMode),
    KeysToggled(bool),
    NotifyToggled(bool),
    NotifyPositionToggled(bool),
    NotifyTimeoutChanged(f64),
    CloseClicked,
}



/// The widgets of the preferences dialog, as driven by this module.
/// Implemented by the toolkit layer.
pub trait PrefsView {
    fn show(&self);

    /// Raise an already shown window.
    fn present(&self);

    fn destroy(&self);

    fn set_sensitive(&self, widget: PrefsWidget, sensitive: bool);

    /// Replace the rows of the mixer list.
    fn set_mixer_rows(&self, rows: &[MixerRow]);

    fn set_mixer_entry_text(&self, text: &str);

    /// The current content of the notification body text area.
    fn notify_body(&self) -> String;

    /// Run a modal file chooser for the external mixer, starting in
    /// `start_dir`. Returns `None` if the user cancelled.
    fn choose_external_mixer(&self, start_dir: &Path) -> Option<PathBuf>;
}


/// Creates the widgets of a new preferences dialog, filled with the
/// given initial state, and connects their signals to `dispatch()`.
pub trait PrefsViewBuilder {
    fn build(
        &self,
        appstate: &Rc<AppS>,
        init: &PrefsViewInit,
    ) -> Result<Rc<dyn PrefsView>>;
}


#[derive(Clone, Debug, PartialEq)]
/// Everything needed to fill the widgets of a new dialog.
pub struct PrefsViewInit {
    pub version: String,
    pub cards: CardListModel,
    /// Row of the active card in `cards`.
    pub active_card: usize,
    pub mixers: MixerListModel,
    pub themes: ThemeListModel,
    pub active_theme: Option<usize>,
    pub mixer: String,
    pub scale_increment: f64,
    pub show_tooltip: bool,
    pub run_in_terminal: bool,
    pub scale_show_value: bool,
    pub show_notify: bool,
    pub notify_body: String,
    pub notify_position: bool,
    pub notify_timeout: f64,
    pub mixer_internal: bool,
    pub mixer_show_values: bool,
    pub keys: bool,
    /// Whether the hotkeys check button can be used at all.
    pub keys_available: bool,
    pub toggle: ToggleMode,
}



/// An open preferences dialog.
pub struct PrefsDialog {
    view: Rc<dyn PrefsView>,
    store: ConfigStore,
    cards: CardListModel,
    mixers: MixerListModel,
    themes: ThemeListModel,
}

impl PrefsDialog {
    pub fn mixers(&self) -> &MixerListModel {
        return &self.mixers;
    }
}



/// Open the preferences dialog, or raise it if it's already open.
pub fn open_prefs_dialog(appstate: &Rc<AppS>) -> Result<()> {
    if let Ok(view) = dialog_view(appstate) {
        debug!("Preferences dialog already open, presenting it");
        view.present();
        return Ok(());
    }

    debug!("Opening preferences dialog");

    let (store, init) = {
        let mut prefs = appstate.prefs.borrow_mut();
        let mut store = ConfigStore::new(&appstate.paths.config_file, &prefs)?;
        store.ensure_exists(&prefs)?;
        store.load(&mut prefs)?;
        let init = init_view_state(appstate, &mut prefs, &mut store)?;
        (store, init)
    };

    let view = appstate.ui.build(appstate, &init)?;

    if !init.keys_available {
        view.set_sensitive(PrefsWidget::KeysCheck, false);
    }
    set_notify_sensitive(appstate, view.as_ref(), init.show_notify);
    set_mixer_sensitive(view.as_ref(), init.mixer_internal);

    let PrefsViewInit {
        cards,
        mixers,
        themes,
        ..
    } = init;
    *appstate.prefs_dialog.borrow_mut() = Some(PrefsDialog {
        view: view.clone(),
        store,
        cards,
        mixers,
        themes,
    });

    view.show();

    return Ok(());
}


/// Read the models and widget values from the preferences. Fixes up
/// a card index or control that doesn't exist (anymore).
fn init_view_state(
    appstate: &AppS,
    prefs: &mut Prefs,
    store: &mut ConfigStore,
) -> Result<PrefsViewInit> {
    let cards = CardListModel::new(appstate.mixer.card_names()?);
    let first_card = cards.get(0).map(|c| c.index).ok_or("No sound cards found")?;

    let card_index = prefs.get_int(CARD_INDEX)?;
    let active_card = match cards.position_of(card_index) {
        Some(pos) => pos,
        None => {
            warn!("Card {} not found, falling back to card {}",
                  card_index,
                  first_card);
            prefs.set_int(CARD_INDEX, first_card);
            store.set_section(first_card);
            if let Some(control) = store.card_control() {
                prefs.set(CONTROL, control);
            }
            0
        }
    };
    let card_index = prefs.get_int(CARD_INDEX)?;

    let mixer_names = appstate.mixer.mixer_names(card_index)?;
    ensure!(!mixer_names.is_empty(), ErrorKind::NoMixers(card_index));

    let control = String::from(prefs.get(CONTROL)?);
    let mut mixers = MixerListModel::new(&mixer_names, &control);
    if mixers.selected_name().is_none() {
        warn!("Control {} not found on card {}, using {}",
              control,
              card_index,
              mixer_names[0]);
        prefs.set(CONTROL, mixer_names[0].as_str());
        mixers.rebuild(&mixer_names, &mixer_names[0]);
    }

    let themes = ThemeListModel::new(icon_themes(&appstate.paths.res_dir)?);
    let active_theme = themes.position_of(prefs.get(ICON_THEME)?);

    let keys_available = appstate.main.hotkeys_supported();

    return Ok(PrefsViewInit {
        version: format!("Volti {}", VERSION),
        cards,
        active_card,
        mixers,
        themes,
        active_theme,
        mixer: String::from(prefs.get(MIXER)?),
        scale_increment: prefs.get_float(SCALE_INCREMENT)?,
        show_tooltip: prefs.get_bool(SHOW_TOOLTIP)?,
        run_in_terminal: prefs.get_bool(RUN_IN_TERMINAL)?,
        scale_show_value: prefs.get_bool(SCALE_SHOW_VALUE)?,
        show_notify: prefs.get_bool(SHOW_NOTIFY)?,
        notify_body: String::from(prefs.get(NOTIFY_BODY)?),
        notify_position: prefs.get_bool(NOTIFY_POSITION)?,
        notify_timeout: prefs.get_float(NOTIFY_TIMEOUT)?,
        mixer_internal: prefs.get_bool(MIXER_INTERNAL)?,
        mixer_show_values: prefs.get_bool(MIXER_SHOW_VALUES)?,
        keys: keys_available && prefs.get_bool(KEYS)?,
        keys_available,
        toggle: prefs.get_toggle()?,
    });
}


/// Close the preferences dialog, storing the preferences in the config
/// file. Does nothing if the dialog is not open.
pub fn close_prefs_dialog(appstate: &AppS) -> Result<()> {
    /* take it out first, destroying the window will get us here again */
    let taken = appstate.prefs_dialog.borrow_mut().take();
    let mut dialog = match taken {
        Some(d) => d,
        None => {
            debug!("Preferences dialog not open, nothing to close");
            return Ok(());
        }
    };

    debug!("Closing preferences dialog");

    let body = dialog.view.notify_body();
    appstate.prefs.borrow_mut().set(NOTIFY_BODY, body.as_str());
    appstate.main.set_notify_body(&body);

    let saved = dialog.store.save(&appstate.prefs.borrow());
    if let Err(e) = saved {
        *appstate.prefs_dialog.borrow_mut() = Some(dialog);
        return Err(e);
    }

    dialog.view.destroy();

    return Ok(());
}


/// Handle a user interaction with the open dialog.
pub fn dispatch(appstate: &AppS, event: PrefsEvent) -> Result<()> {
    debug!("Preferences event {:?}", event);

    if !appstate.prefs_dialog_open() {
        bail!(ErrorKind::DialogClosed);
    }

    match event {
        PrefsEvent::CardChanged(row) => on_card_changed(appstate, row),
        PrefsEvent::MixerToggled(row) => on_mixer_toggled(appstate, row),
        PrefsEvent::ThemeChanged(row) => on_theme_changed(appstate, row),
        PrefsEvent::MixerEntryChanged(text) => {
            on_mixer_entry_changed(appstate, &text)
        }
        PrefsEvent::BrowseClicked => on_browse_clicked(appstate),
        PrefsEvent::ScaleIncrementChanged(v) => {
            on_scale_increment_changed(appstate, v)
        }
        PrefsEvent::TooltipToggled(a) => on_tooltip_toggled(appstate, a),
        PrefsEvent::DrawValueToggled(a) => on_draw_value_toggled(appstate, a),
        PrefsEvent::TerminalToggled(a) => on_terminal_toggled(appstate, a),
        PrefsEvent::MixerInternalToggled(a) => {
            on_mixer_internal_toggled(appstate, a)
        }
        PrefsEvent::MixerValuesToggled(a) => {
            on_mixer_values_toggled(appstate, a)
        }
        PrefsEvent::ToggleModeActivated(mode) => {
            on_toggle_mode_activated(appstate, mode)
        }
        PrefsEvent::KeysToggled(a) => on_keys_toggled(appstate, a),
        PrefsEvent::NotifyToggled(a) => on_notify_toggled(appstate, a),
        PrefsEvent::NotifyPositionToggled(a) => {
            on_notify_position_toggled(appstate, a)
        }
        PrefsEvent::NotifyTimeoutChanged(v) => {
            on_notify_timeout_changed(appstate, v)
        }
        PrefsEvent::CloseClicked => close_prefs_dialog(appstate),
    }
}


/// The view of the open dialog. The dialog is not borrowed anymore
/// when this returns, so view calls may re-enter `dispatch()`.
fn dialog_view(appstate: &AppS) -> Result<Rc<dyn PrefsView>> {
    return appstate
        .prefs_dialog
        .borrow()
        .as_ref()
        .map(|d| d.view.clone())
        .ok_or_else(|| ErrorKind::DialogClosed.into());
}


fn with_dialog<F, T>(appstate: &AppS, f: F) -> Result<T>
where
    F: FnOnce(&mut PrefsDialog) -> Result<T>,
{
    let mut guard = appstate.prefs_dialog.borrow_mut();
    let dialog = guard.as_mut().ok_or(ErrorKind::DialogClosed)?;
    return f(dialog);
}



/*  DEVICE  */

fn on_card_changed(appstate: &AppS, row: usize) -> Result<()> {
    let card_index = with_dialog(appstate, |d| {
        d.cards.get(row).map(|c| c.index).ok_or_else(|| {
            Error::from(format!("No card in row {}", row))
        })
    })?;

    let mixer_names = appstate.mixer.mixer_names(card_index)?;
    ensure!(!mixer_names.is_empty(), ErrorKind::NoMixers(card_index));

    let rows = with_dialog(appstate, |d| {
        d.store.set_section(card_index);
        let control = d.store
            .card_control()
            .filter(|c| mixer_names.contains(c))
            .unwrap_or_else(|| mixer_names[0].clone());

        {
            let mut prefs = appstate.prefs.borrow_mut();
            prefs.set_int(CARD_INDEX, card_index);
            prefs.set(CONTROL, control.as_str());
        }

        d.mixers.rebuild(&mixer_names, &control);
        return Ok(d.mixers.rows().to_vec());
    })?;

    appstate.main.update(&appstate.prefs.borrow());
    dialog_view(appstate)?.set_mixer_rows(&rows);

    return Ok(());
}


/// Selecting a mixer is stored right away, not only when the
/// dialog closes.
fn on_mixer_toggled(appstate: &AppS, row: usize) -> Result<()> {
    let selected = with_dialog(appstate, |d| {
        return Ok(d.mixers
                      .select(row)
                      .map(|name| (name, d.mixers.rows().to_vec())));
    })?;
    let (control, rows) = match selected {
        Some(s) => s,
        None => {
            debug!("Mixer row {} is already active", row);
            return Ok(());
        }
    };

    dialog_view(appstate)?.set_mixer_rows(&rows);

    appstate.prefs.borrow_mut().set(CONTROL, control.as_str());
    appstate.main.set_control(&control);
    appstate.main.update(&appstate.prefs.borrow());
    appstate.main.set_mute_check(appstate.mixer.is_muted()?);

    with_dialog(appstate, |d| d.store.save(&appstate.prefs.borrow()))?;

    return Ok(());
}


fn on_mixer_entry_changed(appstate: &AppS, mixer: &str) -> Result<()> {
    appstate.prefs.borrow_mut().set(MIXER, mixer);
    appstate.main.set_mixer(mixer);

    return Ok(());
}


fn on_browse_clicked(appstate: &AppS) -> Result<()> {
    let start_dir = {
        let prefs = appstate.prefs.borrow();
        browse_start_dir(prefs.get(MIXER)?)
    };

    let view = dialog_view(appstate)?;
    match view.choose_external_mixer(&start_dir) {
        Some(path) => {
            let mixer = path.to_string_lossy().into_owned();
            debug!("External mixer chosen: {}", mixer);
            view.set_mixer_entry_text(&mixer);
            appstate.prefs.borrow_mut().set(MIXER, mixer.as_str());
            appstate.main.set_mixer(&mixer);
        }
        None => debug!("No external mixer chosen"),
    }

    return Ok(());
}


fn on_terminal_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(RUN_IN_TERMINAL, active);
    appstate.main.set_run_in_terminal(active);

    return Ok(());
}


fn on_mixer_internal_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(MIXER_INTERNAL, active);
    appstate.main.set_mixer_internal(active);
    set_mixer_sensitive(dialog_view(appstate)?.as_ref(), active);

    return Ok(());
}


fn on_mixer_values_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(MIXER_SHOW_VALUES, active);

    return Ok(());
}



/*  VIEW  */

fn on_theme_changed(appstate: &AppS, row: usize) -> Result<()> {
    let theme = with_dialog(appstate, |d| {
        d.themes.name(row).map(String::from).ok_or_else(|| {
            Error::from(format!("No icon theme in row {}", row))
        })
    })?;

    appstate.prefs.borrow_mut().set(ICON_THEME, theme.as_str());
    appstate.main.set_icon_theme(&theme);

    let volume = appstate.main.get_volume();
    appstate.main.update_icon(volume, icon_name(volume));

    return Ok(());
}


fn on_scale_increment_changed(appstate: &AppS, increment: f64) -> Result<()> {
    appstate.prefs.borrow_mut().set_float(SCALE_INCREMENT, increment);
    appstate.main.set_scale_increment(increment);

    return Ok(());
}


fn on_tooltip_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(SHOW_TOOLTIP, active);
    appstate.main.set_show_tooltip(active);

    if active {
        appstate.main.update_tooltip(appstate.main.get_volume());
    } else {
        appstate.main.set_tooltip_text("");
    }

    return Ok(());
}


fn on_draw_value_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(SCALE_SHOW_VALUE, active);
    appstate.main.set_scale_draw_value(active);

    return Ok(());
}



/*  BEHAVIOR  */

fn on_toggle_mode_activated(appstate: &AppS, mode: ToggleMode) -> Result<()> {
    appstate.prefs.borrow_mut().set_toggle(mode);
    appstate.main.set_toggle(mode);

    return Ok(());
}


fn on_keys_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(KEYS, active);
    appstate.main.set_keys(active);
    appstate.main.init_keys_events();

    return Ok(());
}



/*  NOTIFICATIONS  */

fn on_notify_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(SHOW_NOTIFY, active);
    appstate.main.set_show_notify(active);
    appstate.main.init_notify();

    set_notify_sensitive(appstate, dialog_view(appstate)?.as_ref(), active);

    if active && appstate.main.notifier().is_some() {
        let volume = appstate.main.get_volume();
        appstate.main.update_notify(volume, icon_name(volume));
    }

    return Ok(());
}


fn on_notify_position_toggled(appstate: &AppS, active: bool) -> Result<()> {
    appstate.prefs.borrow_mut().set_bool(NOTIFY_POSITION, active);
    appstate.main.set_notify_position(active);

    if let Some(notifier) = appstate.main.notifier() {
        notifier.close()?;
        let volume = appstate.main.get_volume();
        appstate.main.update_notify(volume, icon_name(volume));
    }

    return Ok(());
}


fn on_notify_timeout_changed(appstate: &AppS, timeout: f64) -> Result<()> {
    appstate.prefs.borrow_mut().set_float(NOTIFY_TIMEOUT, timeout);
    appstate.main.set_notify_timeout(timeout);

    return Ok(());
}



/*  SENSITIVITY  */

/// Sensitivity of the notification sub-controls. Timeout and position
/// additionally need the notification server to support both.
pub fn notify_sensitivity(
    active: bool,
    caps: NotifyCaps,
) -> [(PrefsWidget, bool); 3] {
    let capable = active && caps.all();
    return [
        (PrefsWidget::NotifyTimeoutSpin, capable),
        (PrefsWidget::NotifyPositionCheck, capable),
        (PrefsWidget::NotifyBodyText, active),
    ];
}


/// Sensitivity of the mixer controls. The internal mixer and an
/// external mixer command exclude each other.
pub fn mixer_sensitivity(internal: bool) -> [(PrefsWidget, bool); 4] {
    return [
        (PrefsWidget::MixerValuesCheck, internal),
        (PrefsWidget::MixerEntry, !internal),
        (PrefsWidget::BrowseButton, !internal),
        (PrefsWidget::TerminalCheck, !internal),
    ];
}


fn set_notify_sensitive(appstate: &AppS, view: &dyn PrefsView, active: bool) {
    let caps = if active {
        appstate
            .main
            .notifier()
            .map(|n| n.capabilities())
            .unwrap_or_default()
    } else {
        NotifyCaps::default()
    };

    for &(widget, sensitive) in notify_sensitivity(active, caps).iter() {
        view.set_sensitive(widget, sensitive);
    }
}


fn set_mixer_sensitive(view: &dyn PrefsView, internal: bool) {
    for &(widget, sensitive) in mixer_sensitivity(internal).iter() {
        view.set_sensitive(widget, sensitive);
    }
}
