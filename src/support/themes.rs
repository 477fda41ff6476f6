//! Icon themes shipped in the resource directory.


use crate::errors::*;
use std::fs;
use std::path::Path;



/// The theme that uses the system icon theme.
pub const DEFAULT_THEME: &str = "Default";


/// All available icon themes: `Default` first, then every
/// sub-directory of `<res_dir>/icons`, sorted by name.
pub fn icon_themes<P>(res_dir: P) -> Result<Vec<String>>
where
    P: AsRef<Path>,
{
    let icons_dir = res_dir.as_ref().join("icons");
    let entries = fs::read_dir(&icons_dir).chain_err(|| {
        format!("Could not read icon themes from {:?}", icons_dir)
    })?;

    let mut themes = vec![];
    for entry in entries {
        let entry = entry?;
        if !entry.file_type()?.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                if name != DEFAULT_THEME {
                    themes.push(name);
                }
            }
            Err(name) => warn!("Skipping icon theme with invalid name {:?}", name),
        }
    }
    themes.sort();
    themes.insert(0, String::from(DEFAULT_THEME));

    debug!("Found icon themes {:?}", themes);

    return Ok(themes);
}
