#![allow(missing_docs)]

//! The preferences subsystem.
//!
//! These are the global application preferences, which can be set
//! by the user. They are kept as a flat mapping from option name to
//! its string representation, read from the config file, presented
//! in the preferences dialog and written back to the file on close.
//!
//! Booleans are stored as `"0"`/`"1"`, floats always carry a decimal
//! point and integers are plain decimal.


use crate::errors::*;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Formatter;
use std::str::FromStr;



pub const CARD_INDEX: &str = "card_index";
pub const CONTROL: &str = "control";
pub const ICON_THEME: &str = "icon_theme";
pub const KEYS: &str = "keys";
pub const MIXER: &str = "mixer";
pub const MIXER_INTERNAL: &str = "mixer_internal";
pub const MIXER_SHOW_VALUES: &str = "mixer_show_values";
pub const NOTIFY_BODY: &str = "notify_body";
pub const NOTIFY_POSITION: &str = "notify_position";
pub const NOTIFY_TIMEOUT: &str = "notify_timeout";
pub const RUN_IN_TERMINAL: &str = "run_in_terminal";
pub const SCALE_INCREMENT: &str = "scale_increment";
pub const SCALE_SHOW_VALUE: &str = "scale_show_value";
pub const SHOW_NOTIFY: &str = "show_notify";
pub const SHOW_TOOLTIP: &str = "show_tooltip";
pub const TOGGLE: &str = "toggle";


/// Hard-coded defaults, present before the config file is read.
const DEFAULTS: [(&str, &str); 16] = [
    (CARD_INDEX, "0"),
    (CONTROL, "Master"),
    (ICON_THEME, "Default"),
    (KEYS, "0"),
    (MIXER, "alsamixer"),
    (MIXER_INTERNAL, "1"),
    (MIXER_SHOW_VALUES, "1"),
    (NOTIFY_BODY, "<span font_desc=\"14\">{card}\n{mixer}</span>"),
    (NOTIFY_POSITION, "0"),
    (NOTIFY_TIMEOUT, "2.0"),
    (RUN_IN_TERMINAL, "1"),
    (SCALE_INCREMENT, "1.0"),
    (SCALE_SHOW_VALUE, "0"),
    (SHOW_NOTIFY, "0"),
    (SHOW_TOOLTIP, "1"),
    (TOGGLE, "mute"),
];



#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// What a middle click on the tray icon does.
pub enum ToggleMode {
    Mute,
    Mixer,
}

impl ToggleMode {
    pub fn as_str(&self) -> &'static str {
        match *self {
            ToggleMode::Mute => "mute",
            ToggleMode::Mixer => "mixer",
        }
    }
}

impl Default for ToggleMode {
    fn default() -> ToggleMode {
        return ToggleMode::Mute;
    }
}

impl FromStr for ToggleMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<ToggleMode> {
        match s {
            "mute" => Ok(ToggleMode::Mute),
            "mixer" => Ok(ToggleMode::Mixer),
            _ => bail!(ErrorKind::InvalidPref(String::from(TOGGLE),
                                              String::from(s))),
        }
    }
}



#[derive(Debug, Clone, PartialEq)]
/// The preferences mapping. Created once at application start,
/// mutated in place by every preference change and never replaced.
pub struct Prefs {
    map: BTreeMap<String, String>,
}

impl Default for Prefs {
    fn default() -> Prefs {
        let mut prefs = Prefs::empty();
        for &(key, val) in DEFAULTS.iter() {
            prefs.set(key, val);
        }

        return prefs;
    }
}

impl Prefs {
    /// A mapping without any options, not even the defaults.
    pub fn empty() -> Prefs {
        return Prefs { map: BTreeMap::new() };
    }


    /// Get the raw string value of an option.
    pub fn get(&self, key: &str) -> Result<&str> {
        return self.map
            .get(key)
            .map(|s| s.as_str())
            .ok_or_else(|| ErrorKind::MissingPref(String::from(key)).into());
    }


    /// Set the raw string value of an option.
    pub fn set<V>(&mut self, key: &str, val: V)
    where
        V: Into<String>,
    {
        self.map.insert(String::from(key), val.into());
    }


    pub fn contains_key(&self, key: &str) -> bool {
        return self.map.contains_key(key);
    }


    /// Boolean options are integers, anything but zero is `true`.
    pub fn get_bool(&self, key: &str) -> Result<bool> {
        let val = self.get(key)?;
        let i = val.trim().parse::<i64>().map_err(|_| {
            Error::from(ErrorKind::InvalidPref(String::from(key),
                                               String::from(val)))
        })?;

        return Ok(i != 0);
    }


    pub fn set_bool(&mut self, key: &str, val: bool) {
        self.set(key, if val { "1" } else { "0" });
    }


    pub fn get_int(&self, key: &str) -> Result<i32> {
        let val = self.get(key)?;
        return val.trim().parse::<i32>().map_err(|_| {
            ErrorKind::InvalidPref(String::from(key), String::from(val)).into()
        });
    }


    pub fn set_int(&mut self, key: &str, val: i32) {
        self.set(key, val.to_string());
    }


    pub fn get_float(&self, key: &str) -> Result<f64> {
        let val = self.get(key)?;
        return val.trim().parse::<f64>().map_err(|_| {
            ErrorKind::InvalidPref(String::from(key), String::from(val)).into()
        });
    }


    pub fn set_float(&mut self, key: &str, val: f64) {
        self.set(key, float_to_string(val));
    }


    pub fn get_toggle(&self) -> Result<ToggleMode> {
        return self.get(TOGGLE)?.trim().parse();
    }


    pub fn set_toggle(&mut self, mode: ToggleMode) {
        self.set(TOGGLE, mode.as_str());
    }


    /// Iterate over all options, sorted by key.
    pub fn iter(&self) -> btree_map::Iter<String, String> {
        return self.map.iter();
    }


    /// Convert the current preferences to a viewable String.
    pub fn to_str(&self) -> String {
        let mut s = String::new();
        for (key, val) in self.map.iter() {
            s.push_str(&format!("{} = {:?}\n", key, val));
        }

        return s;
    }
}

impl Display for Prefs {
    fn fmt(
        &self,
        f: &mut Formatter,
    ) -> std::result::Result<(), std::fmt::Error> {
        let s = self.to_str();
        return write!(f, "{}", s);
    }
}


/// Floats always keep their decimal point, e.g. `1.0` instead of `1`.
fn float_to_string(val: f64) -> String {
    return format!("{:?}", val);
}
