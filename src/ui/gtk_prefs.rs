//! The GTK preferences window, built from `preferences.glade`.


use crate::app_state::*;
use crate::errors::*;
use crate::prefs::ToggleMode;
use crate::support::cmd::is_known_mixer;
use crate::ui::models::*;
use crate::ui::prefs_dialog::*;
use gdk_pixbuf::Pixbuf;
use glib::prelude::*;
use gtk::prelude::*;
use std::cell::Cell;
use std::path::Path;
use std::path::PathBuf;
use std::rc::Rc;



const TRANSLATION_DOMAIN: &str = "volti";
const WINDOW_ICON: &str = "multimedia-volume-control";
const WINDOW_ICON_SIZE: i32 = 48;
const CARD_ICON: &str = "audio-card";
const CARD_ICON_SIZE: i32 = 22;



macro_rules! create_builder_item {
    ($sname:ident, $($element: ident: $ty: ty),+) => {
        struct $sname {
            $(
               $element: $ty
             ),+
        }

        impl $sname {
            fn new(builder: &gtk::Builder) -> Result<$sname> {
                return Ok($sname {
                    $(
                        $element: builder
                            .object(stringify!($element))
                            .ok_or_else(|| format!("No widget '{}' in the UI description",
                                                   stringify!($element)))?
                    ),+
                });
            }
        }
    }
}


create_builder_item!(PrefsWidgets,
                     window: gtk::Window,
                     version_label: gtk::Label,
                     button_close: gtk::Button,
                     button_browse: gtk::Button,
                     mixer_entry: gtk::Entry,
                     scale_spinbutton: gtk::SpinButton,
                     tooltip_checkbutton: gtk::CheckButton,
                     terminal_checkbutton: gtk::CheckButton,
                     draw_value_checkbutton: gtk::CheckButton,
                     notify_checkbutton: gtk::CheckButton,
                     notify_body_text: gtk::TextView,
                     position_checkbutton: gtk::CheckButton,
                     timeout_spinbutton: gtk::SpinButton,
                     mixer_internal_checkbutton: gtk::CheckButton,
                     mixer_values_checkbutton: gtk::CheckButton,
                     keys_checkbutton: gtk::CheckButton,
                     radiobutton_mute: gtk::RadioButton,
                     radiobutton_mixer: gtk::RadioButton,
                     card_combobox: gtk::ComboBox,
                     theme_combobox: gtk::ComboBox,
                     scrolledwindow: gtk::ScrolledWindow);



/// Builds `GtkPrefsView`s.
pub struct GtkPrefsBuilder;

impl PrefsViewBuilder for GtkPrefsBuilder {
    fn build(
        &self,
        appstate: &Rc<AppS>,
        init: &PrefsViewInit,
    ) -> Result<Rc<dyn PrefsView>> {
        let view = GtkPrefsView::new(&appstate.paths.res_dir, init)?;
        view.connect(appstate);

        return Ok(Rc::new(view));
    }
}



/// The preferences window.
pub struct GtkPrefsView {
    widgets: PrefsWidgets,
    mixer_store: gtk::ListStore,
    mixer_toggle: gtk::CellRendererToggle,
}

impl GtkPrefsView {
    fn new(res_dir: &Path, init: &PrefsViewInit) -> Result<GtkPrefsView> {
        let builder = gtk::Builder::new();
        builder.set_translation_domain(Some(TRANSLATION_DOMAIN));

        let glade_file = res_dir.join(GLADE_FILE);
        if let Err(e) = builder.add_from_file(&glade_file) {
            warn!("Could not load UI description {:?}: {}", glade_file, e);
        }

        let widgets = PrefsWidgets::new(&builder)?;

        if let Some(icon) = load_icon(res_dir, WINDOW_ICON, WINDOW_ICON_SIZE) {
            widgets.window.set_icon(Some(&icon));
        }
        widgets.version_label.set_text(&init.version);

        /* device */
        init_card_combo(&widgets.card_combobox, res_dir, init);
        let (mixer_store, mixer_toggle) =
            init_mixer_list(&widgets.scrolledwindow, init.mixers.rows());
        widgets.mixer_entry.set_text(&init.mixer);
        widgets.terminal_checkbutton.set_active(init.run_in_terminal);
        widgets
            .mixer_internal_checkbutton
            .set_active(init.mixer_internal);
        widgets
            .mixer_values_checkbutton
            .set_active(init.mixer_show_values);

        /* view */
        init_theme_combo(&widgets.theme_combobox, init);
        widgets.scale_spinbutton.set_value(init.scale_increment);
        widgets.tooltip_checkbutton.set_active(init.show_tooltip);
        widgets
            .draw_value_checkbutton
            .set_active(init.scale_show_value);

        /* behavior */
        match init.toggle {
            ToggleMode::Mute => widgets.radiobutton_mute.set_active(true),
            ToggleMode::Mixer => widgets.radiobutton_mixer.set_active(true),
        }
        widgets.keys_checkbutton.set_active(init.keys);

        /* notifications */
        widgets.notify_checkbutton.set_active(init.show_notify);
        widgets.position_checkbutton.set_active(init.notify_position);
        widgets.timeout_spinbutton.set_value(init.notify_timeout);
        if let Some(buffer) = widgets.notify_body_text.buffer() {
            buffer.set_text(&init.notify_body);
        }

        return Ok(GtkPrefsView {
            widgets,
            mixer_store,
            mixer_toggle,
        });
    }


    /// Connect all widget signals to `dispatch()`. Done after the
    /// widgets got their initial values, so that doesn't fire events.
    fn connect(&self, appstate: &Rc<AppS>) {
        let w = &self.widgets;

        /* window.connect_destroy */
        {
            let apps = appstate.clone();
            w.window.connect_destroy(move |_| {
                try_w!(close_prefs_dialog(&apps));
            });
        }

        /* button_close.connect_clicked */
        {
            let apps = appstate.clone();
            w.button_close.connect_clicked(move |_| {
                try_w!(dispatch(&apps, PrefsEvent::CloseClicked));
            });
        }

        /*  DEVICE  */

        /* card_combobox.connect_changed */
        {
            let apps = appstate.clone();
            w.card_combobox.connect_changed(move |combo| {
                let row = try_w!(combo.active().ok_or("No active card row"));
                try_w!(dispatch(&apps, PrefsEvent::CardChanged(row as usize)));
            });
        }

        /* mixer_toggle.connect_toggled */
        {
            let apps = appstate.clone();
            self.mixer_toggle.connect_toggled(move |_, path| {
                let row = try_w!(path.indices()
                                     .first()
                                     .cloned()
                                     .ok_or("Empty tree path"));
                try_w!(dispatch(&apps, PrefsEvent::MixerToggled(row as usize)));
            });
        }

        /* mixer_entry.connect_changed */
        {
            let apps = appstate.clone();
            w.mixer_entry.connect_changed(move |entry| {
                let text = entry.text().to_string();
                try_w!(dispatch(&apps, PrefsEvent::MixerEntryChanged(text)));
            });
        }

        /* button_browse.connect_clicked */
        {
            let apps = appstate.clone();
            w.button_browse.connect_clicked(move |_| {
                try_w!(dispatch(&apps, PrefsEvent::BrowseClicked));
            });
        }

        connect_check(appstate,
                      &w.terminal_checkbutton,
                      PrefsEvent::TerminalToggled);
        connect_check(appstate,
                      &w.mixer_internal_checkbutton,
                      PrefsEvent::MixerInternalToggled);
        connect_check(appstate,
                      &w.mixer_values_checkbutton,
                      PrefsEvent::MixerValuesToggled);

        /*  VIEW  */

        /* theme_combobox.connect_changed */
        {
            let apps = appstate.clone();
            w.theme_combobox.connect_changed(move |combo| {
                let row = try_w!(combo.active().ok_or("No active theme row"));
                try_w!(dispatch(&apps, PrefsEvent::ThemeChanged(row as usize)));
            });
        }

        connect_spin(appstate,
                     &w.scale_spinbutton,
                     PrefsEvent::ScaleIncrementChanged);
        connect_check(appstate,
                      &w.tooltip_checkbutton,
                      PrefsEvent::TooltipToggled);
        connect_check(appstate,
                      &w.draw_value_checkbutton,
                      PrefsEvent::DrawValueToggled);

        /*  BEHAVIOR  */

        connect_radio(appstate, &w.radiobutton_mute, ToggleMode::Mute);
        connect_radio(appstate, &w.radiobutton_mixer, ToggleMode::Mixer);
        connect_check(appstate, &w.keys_checkbutton, PrefsEvent::KeysToggled);

        /*  NOTIFICATIONS  */

        connect_check(appstate,
                      &w.notify_checkbutton,
                      PrefsEvent::NotifyToggled);
        connect_check(appstate,
                      &w.position_checkbutton,
                      PrefsEvent::NotifyPositionToggled);
        connect_spin(appstate,
                     &w.timeout_spinbutton,
                     PrefsEvent::NotifyTimeoutChanged);
    }
}

impl PrefsView for GtkPrefsView {
    fn show(&self) {
        self.widgets.window.show_all();
    }

    fn present(&self) {
        self.widgets.window.present();
    }

    fn destroy(&self) {
        unsafe {
            self.widgets.window.destroy();
        }
    }

    fn set_sensitive(&self, widget: PrefsWidget, sensitive: bool) {
        let w = &self.widgets;
        match widget {
            PrefsWidget::MixerEntry => w.mixer_entry.set_sensitive(sensitive),
            PrefsWidget::BrowseButton => w.button_browse.set_sensitive(sensitive),
            PrefsWidget::TerminalCheck => {
                w.terminal_checkbutton.set_sensitive(sensitive)
            }
            PrefsWidget::MixerValuesCheck => {
                w.mixer_values_checkbutton.set_sensitive(sensitive)
            }
            PrefsWidget::NotifyTimeoutSpin => {
                w.timeout_spinbutton.set_sensitive(sensitive)
            }
            PrefsWidget::NotifyPositionCheck => {
                w.position_checkbutton.set_sensitive(sensitive)
            }
            PrefsWidget::NotifyBodyText => {
                w.notify_body_text.set_sensitive(sensitive)
            }
            PrefsWidget::KeysCheck => w.keys_checkbutton.set_sensitive(sensitive),
        }
    }

    fn set_mixer_rows(&self, rows: &[MixerRow]) {
        fill_mixer_store(&self.mixer_store, rows);
    }

    fn set_mixer_entry_text(&self, text: &str) {
        self.widgets.mixer_entry.set_text(text);
    }

    fn notify_body(&self) -> String {
        let buffer = match self.widgets.notify_body_text.buffer() {
            Some(b) => b,
            None => return String::new(),
        };
        let (start, end) = buffer.bounds();

        return buffer
            .text(&start, &end, false)
            .map(|s| s.to_string())
            .unwrap_or_default();
    }

    fn choose_external_mixer(&self, start_dir: &Path) -> Option<PathBuf> {
        let dialog = gtk::FileChooserDialog::with_buttons(
            Some("Choose external mixer"),
            Some(&self.widgets.window),
            gtk::FileChooserAction::Open,
            &[("_Cancel", gtk::ResponseType::Cancel),
              ("_Open", gtk::ResponseType::Accept)],
        );
        dialog.set_modal(true);
        dialog.set_current_folder(start_dir);

        let mixers = gtk::FileFilter::new();
        mixers.set_name(Some("Sound Mixers"));
        mixers.add_custom(gtk::FileFilterFlags::FILENAME, |info| {
            return info.filename().map(is_known_mixer).unwrap_or(false);
        });
        dialog.add_filter(&mixers);

        let all = gtk::FileFilter::new();
        all.set_name(Some("All files"));
        all.add_pattern("*");
        dialog.add_filter(&all);

        let response: Rc<Cell<Option<gtk::ResponseType>>> =
            Rc::new(Cell::new(None));
        {
            let response = response.clone();
            dialog.connect_response(move |_, r| response.set(Some(r)));
        }

        dialog.show();
        while response.get().is_none() {
            gtk::main_iteration();
        }

        let chosen = match response.get() {
            Some(gtk::ResponseType::Accept) => dialog.filename(),
            _ => None,
        };
        unsafe {
            dialog.destroy();
        }

        return chosen;
    }
}



fn connect_check<F>(appstate: &Rc<AppS>, button: &gtk::CheckButton, event: F)
where
    F: Fn(bool) -> PrefsEvent + 'static,
{
    let apps = appstate.clone();
    button.connect_toggled(move |b| {
        try_w!(dispatch(&apps, event(b.is_active())));
    });
}


fn connect_spin<F>(appstate: &Rc<AppS>, spin: &gtk::SpinButton, event: F)
where
    F: Fn(f64) -> PrefsEvent + 'static,
{
    let apps = appstate.clone();
    spin.connect_value_changed(move |s| {
        try_w!(dispatch(&apps, event(s.value())));
    });
}


/// Only the radio button becoming active acts, the one
/// becoming inactive is ignored.
fn connect_radio(appstate: &Rc<AppS>, radio: &gtk::RadioButton, mode: ToggleMode) {
    let apps = appstate.clone();
    radio.connect_toggled(move |r| {
        if r.is_active() {
            try_w!(dispatch(&apps, PrefsEvent::ToggleModeActivated(mode)));
        }
    });
}



fn init_card_combo(combo: &gtk::ComboBox, res_dir: &Path, init: &PrefsViewInit) {
    let store = gtk::ListStore::new(&[Pixbuf::static_type(), glib::Type::STRING]);
    let icon = load_icon(res_dir, CARD_ICON, CARD_ICON_SIZE);
    for card in init.cards.rows() {
        store.insert_with_values(None, &[(0, &icon), (1, &card.name)]);
    }
    combo.set_model(Some(&store));

    let icon_cell = gtk::CellRendererPixbuf::new();
    combo.pack_start(&icon_cell, false);
    combo.add_attribute(&icon_cell, "pixbuf", 0);
    let text_cell = gtk::CellRendererText::new();
    combo.pack_start(&text_cell, true);
    combo.add_attribute(&text_cell, "text", 1);

    combo.set_active(Some(init.active_card as u32));
}


fn init_theme_combo(combo: &gtk::ComboBox, init: &PrefsViewInit) {
    let store = gtk::ListStore::new(&[glib::Type::STRING]);
    for theme in init.themes.themes() {
        store.insert_with_values(None, &[(0, theme)]);
    }
    combo.set_model(Some(&store));

    let cell = gtk::CellRendererText::new();
    combo.pack_start(&cell, true);
    combo.add_attribute(&cell, "text", 0);

    combo.set_active(init.active_theme.map(|i| i as u32));
}


/// The mixer list: a radio toggle plus the control name, bold if selected.
fn init_mixer_list(
    scrolled: &gtk::ScrolledWindow,
    rows: &[MixerRow],
) -> (gtk::ListStore, gtk::CellRendererToggle) {
    let store = gtk::ListStore::new(&[glib::Type::BOOL,
                                      glib::Type::STRING,
                                      glib::Type::I32]);
    fill_mixer_store(&store, rows);

    let treeview = gtk::TreeView::with_model(&store);
    treeview.set_headers_visible(false);

    let toggle = gtk::CellRendererToggle::new();
    toggle.set_radio(true);
    toggle.set_activatable(true);
    let toggle_column = gtk::TreeViewColumn::new();
    CellLayoutExt::pack_start(&toggle_column, &toggle, false);
    CellLayoutExt::add_attribute(&toggle_column, &toggle, "active", 0);
    treeview.append_column(&toggle_column);

    let text = gtk::CellRendererText::new();
    let text_column = gtk::TreeViewColumn::new();
    CellLayoutExt::pack_start(&text_column, &text, true);
    CellLayoutExt::add_attribute(&text_column, &text, "text", 1);
    CellLayoutExt::add_attribute(&text_column, &text, "weight", 2);
    treeview.append_column(&text_column);

    scrolled.add(&treeview);

    return (store, toggle);
}


fn fill_mixer_store(store: &gtk::ListStore, rows: &[MixerRow]) {
    store.clear();
    for row in rows {
        store.insert_with_values(None,
                                 &[(0, &row.selected),
                                   (1, &row.name),
                                   (2, &row.weight)]);
    }
}


/// Look up an icon in the current icon theme, falling back to
/// `<res_dir>/icons/<name>.svg`.
fn load_icon(res_dir: &Path, name: &str, size: i32) -> Option<Pixbuf> {
    if let Some(pixbuf) = pixbuf_new_from_theme(name, size) {
        return Some(pixbuf);
    }

    let path = res_dir.join("icons").join(format!("{}.svg", name));
    let pixbuf = try_wr!(Pixbuf::from_file_at_size(&path, size, size),
                         None,
                         "Could not load icon {:?}",
                         path);

    return Some(pixbuf);
}


fn pixbuf_new_from_theme(name: &str, size: i32) -> Option<Pixbuf> {
    let theme = gtk::IconTheme::default()?;
    let pixbuf = try_r!(theme.load_icon(name, size, gtk::IconLookupFlags::empty()),
                        None);
    debug!("Loaded icon {} from the icon theme", name);

    return pixbuf;
}
