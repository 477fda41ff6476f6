use getopts::Options;
use log::LevelFilter;
use std::env;
use std::path::PathBuf;
use std::process;
use std::rc::Rc;
use voltilib::app_state::*;
use voltilib::audio::alsa::AlsaMixerControl;
use voltilib::audio::icon_name;
use voltilib::errors::*;
use voltilib::notif::Notifier;
use voltilib::prefs::*;
use voltilib::ui::gtk_prefs::GtkPrefsBuilder;
use voltilib::ui::prefs_dialog::open_prefs_dialog;
use voltilib::{try_w, try_wr};

#[macro_use]
extern crate log;



/// Stands in for the tray application when the preferences run on
/// their own: keeps the alsa backend on the selected control and
/// logs everything else.
struct StandaloneMain {
    mixer: Rc<AlsaMixerControl>,
}

impl MainControl for StandaloneMain {
    fn set_control(&self, control: &str) {
        debug!("Control: {}", control);
    }

    fn set_mixer(&self, mixer: &str) {
        debug!("External mixer: {}", mixer);
    }

    fn set_scale_increment(&self, increment: f64) {
        debug!("Scale increment: {}", increment);
    }

    fn set_show_tooltip(&self, show: bool) {
        debug!("Show tooltip: {}", show);
    }

    fn set_scale_draw_value(&self, draw: bool) {
        debug!("Draw scale value: {}", draw);
    }

    fn set_run_in_terminal(&self, run: bool) {
        debug!("Run mixer in terminal: {}", run);
    }

    fn set_icon_theme(&self, theme: &str) {
        debug!("Icon theme: {}", theme);
    }

    fn set_toggle(&self, mode: ToggleMode) {
        debug!("Middle click: {}", mode.as_str());
    }

    fn set_keys(&self, enabled: bool) {
        debug!("Hotkeys: {}", enabled);
    }

    fn set_show_notify(&self, show: bool) {
        debug!("Notifications: {}", show);
    }

    fn set_notify_timeout(&self, timeout: f64) {
        debug!("Notification timeout: {}", timeout);
    }

    fn set_notify_position(&self, position: bool) {
        debug!("Notification position: {}", position);
    }

    fn set_notify_body(&self, body: &str) {
        debug!("Notification body: {}", body);
    }

    fn set_mixer_internal(&self, internal: bool) {
        debug!("Internal mixer: {}", internal);
    }

    fn update(&self, prefs: &Prefs) {
        let card_index = try_w!(prefs.get_int(CARD_INDEX));
        let control = try_w!(prefs.get(CONTROL));
        self.mixer.select(card_index, control);
    }

    fn get_volume(&self) -> f64 {
        return try_wr!(self.mixer.playback_volume(), 0.0);
    }

    fn update_icon(&self, volume: f64, icon: &str) {
        debug!("Icon for volume {}: {}", volume, icon);
    }

    fn update_tooltip(&self, volume: f64) {
        debug!("Tooltip for volume {}", volume);
    }

    fn set_tooltip_text(&self, text: &str) {
        debug!("Tooltip: {:?}", text);
    }

    fn update_notify(&self, volume: f64, icon: &str) {
        debug!("Notification for volume {}: {}", volume, icon);
    }

    fn set_mute_check(&self, muted: bool) {
        debug!("Muted: {}", muted);
    }

    fn init_keys_events(&self) {}

    fn init_notify(&self) {}

    fn notifier(&self) -> Option<Rc<dyn Notifier>> {
        return None;
    }

    fn hotkeys_supported(&self) -> bool {
        return false;
    }
}



fn main() {
    let args: Vec<String> = env::args().collect();

    let mut opts = Options::new();
    opts.optflag("h", "help", "Show help");
    opts.optopt("", "log-to-file",
                "Log files to the specified dir instead of stderr",
                "DIRECTORY");
    opts.optflagopt("l", "log-level",
                "Set the log level (trace/debug/info/warn/error/off)",
                "LEVEL");
    opts.optopt("c", "config", "Use the given config file", "FILE");
    opts.optopt("r", "res-dir",
                "Directory with the UI description and icon themes",
                "DIRECTORY");

    let matches = match opts.parse(&args[1..]) {
        Ok(m) => m,
        Err(f) => {
            eprintln!("{}", f);
            print_usage(opts);
            process::exit(2);
        }
    };

    if matches.opt_present("h") {
        print_usage(opts);
        return;
    }

    let log_dir = matches.opt_str("log-to-file");
    let log_level = matches.opt_default("log-level", "debug").map(|s| {
        match s.to_lowercase().as_str() {
            "trace" => LevelFilter::Trace,
            "debug" => LevelFilter::Debug,
            "info"  => LevelFilter::Info,
            "warn"  => LevelFilter::Warn,
            "error" => LevelFilter::Error,
            "off"   => LevelFilter::Off,
            _       => LevelFilter::Debug,
        }
    }).unwrap_or(LevelFilter::Warn);

    let mut flogger = flexi_logger::Logger::with(
        flexi_logger::LogSpecification::builder().default(log_level).build());

    if let Some(dir) = log_dir {
        flogger = flogger
            .log_to_file(flexi_logger::FileSpec::default().directory(dir));
    }

    let _logger = match flogger.start() {
        Ok(handle) => handle,
        Err(e) => {
            eprintln!("Logger initialization failed with {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run(matches.opt_str("config"), matches.opt_str("res-dir")) {
        error!("{}", e);
        for cause in e.iter().skip(1) {
            error!("Caused by: {}", cause);
        }
        process::exit(1);
    }
}


fn run(config: Option<String>, res_dir: Option<String>) -> Result<()> {
    gtk::init().chain_err(|| "Gtk initialization failed")?;

    let mut paths = Paths::from_xdg()?;
    if let Some(file) = config {
        paths.config_file = PathBuf::from(file);
    }
    if let Some(dir) = res_dir {
        paths.res_dir = PathBuf::from(dir);
    }

    let defaults = Prefs::default();
    let mixer = Rc::new(AlsaMixerControl::new(defaults.get_int(CARD_INDEX)?,
                                              defaults.get(CONTROL)?));
    let main = Rc::new(StandaloneMain { mixer: mixer.clone() });

    let appstate = Rc::new(AppS::new(paths,
                                     defaults,
                                     main.clone(),
                                     mixer,
                                     Box::new(GtkPrefsBuilder))?);
    main.update(&appstate.prefs.borrow());

    let volume = main.get_volume();
    info!("Volume {:.0}% ({})", volume, icon_name(volume));

    open_prefs_dialog(&appstate)?;
    while appstate.prefs_dialog_open() {
        gtk::main_iteration();
    }

    return Ok(());
}


fn print_usage(opts: Options) {
    let brief = format!("Usage: volti-prefs [options]");
    print!("{}", opts.usage(&brief));
}
