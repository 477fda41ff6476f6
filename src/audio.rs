#![allow(missing_docs)] // enums

//! High-level audio subsystem, as far as the preferences are concerned.
//!
//! The preferences dialog never talks to the sound system directly,
//! only through the `MixerControl` trait, which enumerates cards and
//! their mixer controls.


use crate::errors::*;

#[cfg(feature = "alsa-backend")]
pub mod alsa;



#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// The volume level of the current audio configuration.
pub enum VolLevel {
    Muted,
    Low,
    Medium,
    High,
}

impl VolLevel {
    /// Classify a volume between 0 and 100.
    pub fn from_volume(volume: f64) -> VolLevel {
        if volume <= 0.0 {
            return VolLevel::Muted;
        } else if volume < 34.0 {
            return VolLevel::Low;
        } else if volume < 67.0 {
            return VolLevel::Medium;
        } else {
            return VolLevel::High;
        }
    }

    /// The themed icon name for this level.
    pub fn icon_name(&self) -> &'static str {
        match *self {
            VolLevel::Muted => "audio-volume-muted",
            VolLevel::Low => "audio-volume-low",
            VolLevel::Medium => "audio-volume-medium",
            VolLevel::High => "audio-volume-high",
        }
    }
}


/// The icon name used for the tray icon and notifications at the
/// given volume.
pub fn icon_name(volume: f64) -> &'static str {
    return VolLevel::from_volume(volume).icon_name();
}



/// Enumerates audio cards and their mixer controls. Implemented
/// by the audio backend, e.g. alsa.
pub trait MixerControl {
    /// All cards, in index order. Cards whose name can't be
    /// determined are `None`, so the position stays the card index.
    fn card_names(&self) -> Result<Vec<Option<String>>>;

    /// The mixer control names of the given card.
    fn mixer_names(&self, card_index: i32) -> Result<Vec<String>>;

    /// Whether the currently active control is muted.
    fn is_muted(&self) -> Result<bool>;
}
