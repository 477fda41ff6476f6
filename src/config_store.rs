//! The config file backing the preferences.
//!
//! The file has a `global` section holding every option except the
//! active mixer control, plus one `card-<index>` section per visited
//! card, holding that card's `control`:
//!
//! ```ini
//! [global]
//! show_tooltip = 1
//!
//! [card-0]
//! control = Master
//! ```


use crate::errors::*;
use crate::ini::Ini;
use crate::prefs::*;
use std::fs;
use std::io::ErrorKind as IoErrorKind;
use std::path::Path;
use std::path::PathBuf;



const GLOBAL_SECTION: &str = "global";


/// Name of the config section holding the control of the given card.
pub fn card_section(card_index: i32) -> String {
    return format!("card-{}", card_index);
}



/// Reads and writes the config file, merging it with the in-memory
/// preferences. The parsed document is kept around, so sections of
/// cards other than the current one survive a save.
pub struct ConfigStore {
    path: PathBuf,
    ini: Ini,
    section: String,
}

impl ConfigStore {
    /// Create a store for the file at `path`, with the card section
    /// selected from the `card_index` preference.
    pub fn new<P>(path: P, prefs: &Prefs) -> Result<ConfigStore>
    where
        P: AsRef<Path>,
    {
        let card_index = prefs.get_int(CARD_INDEX)?;
        return Ok(ConfigStore {
            path: path.as_ref().to_path_buf(),
            ini: Ini::new(),
            section: card_section(card_index),
        });
    }


    /// The currently selected card section, e.g. `card-0`.
    pub fn section(&self) -> &str {
        return &self.section;
    }


    /// Select the card section for the given card.
    pub fn set_section(&mut self, card_index: i32) {
        self.section = card_section(card_index);
    }


    /// Whether a section for the current card is known, either from the
    /// file or from a previous save.
    pub fn has_card_section(&self) -> bool {
        return self.ini.has_section(&self.section);
    }


    /// The stored `control` of the current card, if any.
    pub fn card_control(&self) -> Option<String> {
        return self.ini
            .get(&self.section, CONTROL)
            .map(|s| String::from(s.trim()));
    }


    /// Create the config directory and the config file from the
    /// current preferences, unless they exist already.
    pub fn ensure_exists(&mut self, prefs: &Prefs) -> Result<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                if let Err(e) = fs::create_dir_all(dir) {
                    debug!("Could not create config directory {:?}: {}",
                           dir,
                           e);
                }
            }
        }

        if !self.path.is_file() {
            debug!("No config file present, creating one with defaults.");
            self.save(prefs)?;
        }

        return Ok(());
    }


    /// Read the config file into `prefs`. Every option of the `global`
    /// section is copied, then `control` is taken from the section of
    /// the card index just read. A missing file leaves `prefs` untouched.
    pub fn load(&mut self, prefs: &mut Prefs) -> Result<()> {
        let content = match fs::read_to_string(&self.path) {
            Ok(c) => c,
            Err(ref e) if e.kind() == IoErrorKind::NotFound => {
                debug!("No config file at {:?}, keeping defaults", self.path);
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        debug!("Config file present at {:?}, using it.", self.path);
        self.ini.read_str(&content).chain_err(|| {
            format!("Could not parse config file {:?}", self.path)
        })?;

        if let Some(global) = self.ini.section(GLOBAL_SECTION) {
            for &(ref key, ref val) in global.entries() {
                prefs.set(&key.to_lowercase(), val.trim());
            }
        }
        self.set_section(prefs.get_int(CARD_INDEX)?);

        /* a card index from a previous run may refer to a card that
         * was never visited or is gone by now */
        match self.card_control() {
            Some(control) => prefs.set(CONTROL, control),
            None => {
                warn!("No control stored in section [{}], keeping '{}'",
                      self.section,
                      prefs.get(CONTROL).unwrap_or(""))
            }
        }

        return Ok(());
    }


    /// Write all preferences to the config file, replacing it.
    /// `control` goes to the current card section, everything
    /// else to `global`.
    pub fn save(&mut self, prefs: &Prefs) -> Result<()> {
        let section = self.section.clone();
        self.ini.add_section(&section);
        self.ini.add_section(GLOBAL_SECTION);

        for (key, val) in prefs.iter() {
            if key == CONTROL {
                self.ini.set(&section, key, val);
            } else {
                self.ini.set(GLOBAL_SECTION, key, val);
            }
        }

        debug!("Storing config in {:?}", self.path);
        fs::write(&self.path, self.ini.serialize()).chain_err(|| {
            format!("Could not write to config file {:?}", self.path)
        })?;

        return Ok(());
    }
}
