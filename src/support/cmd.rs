//! Helper functions around the external mixer command.


use std::path::Path;
use std::path::PathBuf;



/// Base names of common mixer applications, offered by the
/// "Sound Mixers" filter of the file chooser.
const KNOWN_MIXERS: [&str; 7] = [
    "aumix",
    "alsamixer",
    "alsamixergui",
    "gamix",
    "gmixer",
    "gnome-alsamixer",
    "gnome-volume-control",
];

const DEFAULT_BROWSE_DIR: &str = "/usr/bin";



/// Whether the base name of `path` is one of the known mixer
/// applications.
pub fn is_known_mixer<P>(path: P) -> bool
where
    P: AsRef<Path>,
{
    return path.as_ref()
        .file_name()
        .and_then(|n| n.to_str())
        .map(|n| KNOWN_MIXERS.contains(&n))
        .unwrap_or(false);
}


/// The directory the file chooser for the external mixer starts in:
/// where the current mixer command lives, falling back to `/usr/bin`.
pub fn browse_start_dir(mixer_cmd: &str) -> PathBuf {
    let program = match mixer_cmd.split_whitespace().next() {
        Some(p) => p,
        None => return PathBuf::from(DEFAULT_BROWSE_DIR),
    };

    return which::which(program)
        .ok()
        .and_then(|p| p.parent().map(|d| d.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_BROWSE_DIR));
}
