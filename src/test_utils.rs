//! Recording fakes of the collaborators of the preferences dialog,
//! shared by the unit tests.


use crate::app_state::*;
use crate::audio::MixerControl;
use crate::errors::*;
use crate::notif::{NotifyCaps, Notifier};
use crate::prefs::*;
use crate::ui::models::MixerRow;
use crate::ui::prefs_dialog::*;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tempfile::TempDir;



pub struct FakeMixer {
    pub cards: Vec<Option<String>>,
    pub mixers: BTreeMap<i32, Vec<String>>,
    pub muted: Cell<bool>,
}

impl MixerControl for FakeMixer {
    fn card_names(&self) -> Result<Vec<Option<String>>> {
        return Ok(self.cards.clone());
    }

    fn mixer_names(&self, card_index: i32) -> Result<Vec<String>> {
        return self.mixers
            .get(&card_index)
            .cloned()
            .ok_or_else(|| format!("No card {}", card_index).into());
    }

    fn is_muted(&self) -> Result<bool> {
        return Ok(self.muted.get());
    }
}



pub struct FakeNotifier {
    pub caps: NotifyCaps,
    pub closed: Cell<u32>,
}

impl Notifier for FakeNotifier {
    fn capabilities(&self) -> NotifyCaps {
        return self.caps;
    }

    fn close(&self) -> Result<()> {
        self.closed.set(self.closed.get() + 1);
        return Ok(());
    }
}



/// Records every call changing state as a line like `set_control PCM`.
/// Queries are not recorded.
pub struct FakeMain {
    calls: RefCell<Vec<String>>,
    pub volume: Cell<f64>,
    pub hotkeys: Cell<bool>,
    notifier: RefCell<Option<Rc<FakeNotifier>>>,
}

impl FakeMain {
    pub fn new(hotkeys: bool) -> FakeMain {
        return FakeMain {
            calls: RefCell::new(vec![]),
            volume: Cell::new(50.0),
            hotkeys: Cell::new(hotkeys),
            notifier: RefCell::new(None),
        };
    }

    pub fn set_notifier(&self, caps: NotifyCaps) -> Rc<FakeNotifier> {
        let notifier = Rc::new(FakeNotifier {
            caps,
            closed: Cell::new(0),
        });
        *self.notifier.borrow_mut() = Some(notifier.clone());
        return notifier;
    }

    pub fn calls(&self) -> Vec<String> {
        return self.calls.borrow().clone();
    }

    /// Whether a recorded call starts with `prefix`.
    pub fn called(&self, prefix: &str) -> bool {
        return self.calls.borrow().iter().any(|c| c.starts_with(prefix));
    }

    fn record(&self, call: String) {
        self.calls.borrow_mut().push(call);
    }
}

impl MainControl for FakeMain {
    fn set_control(&self, control: &str) {
        self.record(format!("set_control {}", control));
    }

    fn set_mixer(&self, mixer: &str) {
        self.record(format!("set_mixer {}", mixer));
    }

    fn set_scale_increment(&self, increment: f64) {
        self.record(format!("set_scale_increment {}", increment));
    }

    fn set_show_tooltip(&self, show: bool) {
        self.record(format!("set_show_tooltip {}", show));
    }

    fn set_scale_draw_value(&self, draw: bool) {
        self.record(format!("set_scale_draw_value {}", draw));
    }

    fn set_run_in_terminal(&self, run: bool) {
        self.record(format!("set_run_in_terminal {}", run));
    }

    fn set_icon_theme(&self, theme: &str) {
        self.record(format!("set_icon_theme {}", theme));
    }

    fn set_toggle(&self, mode: ToggleMode) {
        self.record(format!("set_toggle {}", mode.as_str()));
    }

    fn set_keys(&self, enabled: bool) {
        self.record(format!("set_keys {}", enabled));
    }

    fn set_show_notify(&self, show: bool) {
        self.record(format!("set_show_notify {}", show));
    }

    fn set_notify_timeout(&self, timeout: f64) {
        self.record(format!("set_notify_timeout {}", timeout));
    }

    fn set_notify_position(&self, position: bool) {
        self.record(format!("set_notify_position {}", position));
    }

    fn set_notify_body(&self, body: &str) {
        self.record(format!("set_notify_body {}", body));
    }

    fn set_mixer_internal(&self, internal: bool) {
        self.record(format!("set_mixer_internal {}", internal));
    }

    fn update(&self, prefs: &Prefs) {
        self.record(format!("update {}", prefs.get(CONTROL).unwrap_or("")));
    }

    fn get_volume(&self) -> f64 {
        return self.volume.get();
    }

    fn update_icon(&self, volume: f64, icon: &str) {
        self.record(format!("update_icon {} {}", volume, icon));
    }

    fn update_tooltip(&self, volume: f64) {
        self.record(format!("update_tooltip {}", volume));
    }

    fn set_tooltip_text(&self, text: &str) {
        self.record(format!("set_tooltip_text {}", text));
    }

    fn update_notify(&self, volume: f64, icon: &str) {
        self.record(format!("update_notify {} {}", volume, icon));
    }

    fn set_mute_check(&self, muted: bool) {
        self.record(format!("set_mute_check {}", muted));
    }

    fn init_keys_events(&self) {
        self.record(String::from("init_keys_events"));
    }

    fn init_notify(&self) {
        self.record(String::from("init_notify"));
    }

    fn notifier(&self) -> Option<Rc<dyn Notifier>> {
        return self.notifier
            .borrow()
            .clone()
            .map(|n| n as Rc<dyn Notifier>);
    }

    fn hotkeys_supported(&self) -> bool {
        return self.hotkeys.get();
    }
}



#[derive(Default)]
/// Keeps the state the controller pushes into the widgets.
pub struct FakeView {
    pub sensitive: RefCell<BTreeMap<PrefsWidget, bool>>,
    pub rows: RefCell<Vec<MixerRow>>,
    pub entry: RefCell<String>,
    pub body: RefCell<String>,
    /// What the file chooser returns.
    pub chosen: RefCell<Option<PathBuf>>,
    /// Where the file chooser was started.
    pub chooser_dir: RefCell<Option<PathBuf>>,
    pub shown: Cell<u32>,
    pub presented: Cell<u32>,
    pub destroyed: Cell<bool>,
}

impl FakeView {
    pub fn is_sensitive(&self, widget: PrefsWidget) -> Option<bool> {
        return self.sensitive.borrow().get(&widget).cloned();
    }
}

impl PrefsView for FakeView {
    fn show(&self) {
        self.shown.set(self.shown.get() + 1);
    }

    fn present(&self) {
        self.presented.set(self.presented.get() + 1);
    }

    fn destroy(&self) {
        self.destroyed.set(true);
    }

    fn set_sensitive(&self, widget: PrefsWidget, sensitive: bool) {
        self.sensitive.borrow_mut().insert(widget, sensitive);
    }

    fn set_mixer_rows(&self, rows: &[MixerRow]) {
        *self.rows.borrow_mut() = rows.to_vec();
    }

    fn set_mixer_entry_text(&self, text: &str) {
        *self.entry.borrow_mut() = String::from(text);
    }

    fn notify_body(&self) -> String {
        return self.body.borrow().clone();
    }

    fn choose_external_mixer(&self, start_dir: &Path) -> Option<PathBuf> {
        *self.chooser_dir.borrow_mut() = Some(start_dir.to_path_buf());
        return self.chosen.borrow().clone();
    }
}


/// Hands out the same `FakeView` on every build, filled from the
/// initial state.
pub struct FakeBuilder {
    view: Rc<FakeView>,
    builds: Rc<Cell<u32>>,
    last_init: Rc<RefCell<Option<PrefsViewInit>>>,
}

impl PrefsViewBuilder for FakeBuilder {
    fn build(
        &self,
        _appstate: &Rc<AppS>,
        init: &PrefsViewInit,
    ) -> Result<Rc<dyn PrefsView>> {
        self.builds.set(self.builds.get() + 1);
        *self.last_init.borrow_mut() = Some(init.clone());

        self.view.destroyed.set(false);
        *self.view.rows.borrow_mut() = init.mixers.rows().to_vec();
        *self.view.entry.borrow_mut() = init.mixer.clone();
        *self.view.body.borrow_mut() = init.notify_body.clone();

        return Ok(self.view.clone());
    }
}



pub struct FixtureOpts {
    pub cards: Vec<Option<String>>,
    /// Controls per card index.
    pub mixers: BTreeMap<i32, Vec<String>>,
    pub hotkeys: bool,
    /// Initial content of the config file.
    pub config: Option<&'static str>,
}


fn names(names: &[&str]) -> Vec<String> {
    return names.iter().map(|n| String::from(*n)).collect();
}

impl Default for FixtureOpts {
    fn default() -> FixtureOpts {
        let mut mixers = BTreeMap::new();
        mixers.insert(0, names(&["Master", "PCM"]));
        mixers.insert(2, names(&["Speaker", "Mic"]));

        return FixtureOpts {
            cards: vec![Some(String::from("HDA Intel")),
                        None,
                        Some(String::from("USB Audio"))],
            mixers,
            hotkeys: true,
            config: None,
        };
    }
}


/// An application state wired to fakes, with the config file and the
/// resource directory in a temporary directory.
pub struct Fixture {
    pub appstate: Rc<AppS>,
    pub main: Rc<FakeMain>,
    pub mixer: Rc<FakeMixer>,
    pub view: Rc<FakeView>,
    pub builds: Rc<Cell<u32>>,
    pub last_init: Rc<RefCell<Option<PrefsViewInit>>>,
    pub _dir: TempDir,
}


pub fn fixture() -> Fixture {
    return fixture_with(FixtureOpts::default());
}


/// By default cards 0 and 2 exist, with the controls `Master`/`PCM`
/// and `Speaker`/`Mic`. Icon themes are `blue` and `white`.
pub fn fixture_with(opts: FixtureOpts) -> Fixture {
    let dir = TempDir::new().unwrap();
    let res_dir = dir.path().join("data");
    fs::create_dir_all(res_dir.join("icons").join("blue")).unwrap();
    fs::create_dir_all(res_dir.join("icons").join("white")).unwrap();

    let config_file = dir.path().join("volti").join("config");
    if let Some(content) = opts.config {
        fs::create_dir_all(config_file.parent().unwrap()).unwrap();
        fs::write(&config_file, content).unwrap();
    }

    let mixer = Rc::new(FakeMixer {
        cards: opts.cards,
        mixers: opts.mixers,
        muted: Cell::new(false),
    });

    let main = Rc::new(FakeMain::new(opts.hotkeys));
    let view = Rc::new(FakeView::default());
    let builds = Rc::new(Cell::new(0));
    let last_init = Rc::new(RefCell::new(None));
    let builder = FakeBuilder {
        view: view.clone(),
        builds: builds.clone(),
        last_init: last_init.clone(),
    };

    let paths = Paths {
        config_file,
        res_dir,
    };
    let appstate = AppS::new(paths,
                             Prefs::default(),
                             main.clone(),
                             mixer.clone(),
                             Box::new(builder))
        .unwrap();

    return Fixture {
        appstate: Rc::new(appstate),
        main,
        mixer,
        view,
        builds,
        last_init,
        _dir: dir,
    };
}
