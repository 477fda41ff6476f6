//! Alsa implementation of `MixerControl`.
//!
//! This is the only place interacting directly with the alsa bindings.


use ::alsa::card::Card;
use ::alsa::mixer::{Mixer, Selem, SelemChannelId};
use crate::audio::MixerControl;
use crate::errors::*;
use std::cell::Cell;
use std::cell::RefCell;



/// Get all alsa cards, in the order alsa reports them.
pub fn get_alsa_cards() -> ::alsa::card::Iter {
    return ::alsa::card::Iter::new();
}


/// Get the mixer of the given card.
pub fn get_mixer(card: &Card) -> Result<Mixer> {
    return Ok(Mixer::new(&format!("hw:{}", card.get_index()), false)?);
}


/// Get the names of all simple elements of the given mixer.
pub fn get_selem_names(mixer: &Mixer) -> Vec<String> {
    let mut vec = vec![];
    for selem in mixer.iter().filter_map(Selem::new) {
        let n = selem.get_id().get_name().map(String::from);
        match n {
            Ok(name) => vec.push(name),
            _ => (),
        }
    }

    return vec;
}


/// Look up a simple element by name.
pub fn get_selem_by_name<'a>(mixer: &'a Mixer, name: &str) -> Result<Selem<'a>> {
    for selem in mixer.iter().filter_map(Selem::new) {
        let n = selem.get_id().get_name().map(String::from)?;

        if n == name {
            return Ok(selem);
        }
    }
    bail!("Not found a matching selem named {}", name);
}


/// Convert a raw alsa volume to a percentage.
pub fn vol_to_percent(vol: i64, range: (i64, i64)) -> f64 {
    let (min, max) = range;
    if max <= min {
        return 0.0;
    }
    return ((vol - min) as f64) / ((max - min) as f64) * 100.0;
}



/// The alsa backend. Remembers the active card and control, which
/// the main application updates whenever the preferences change.
pub struct AlsaMixerControl {
    card_index: Cell<i32>,
    control: RefCell<String>,
}

impl AlsaMixerControl {
    pub fn new(card_index: i32, control: &str) -> AlsaMixerControl {
        return AlsaMixerControl {
            card_index: Cell::new(card_index),
            control: RefCell::new(String::from(control)),
        };
    }


    /// Switch to another card/control.
    pub fn select(&self, card_index: i32, control: &str) {
        debug!("Selecting card {} with control {}", card_index, control);
        self.card_index.set(card_index);
        *self.control.borrow_mut() = String::from(control);
    }


    fn mixer(&self) -> Result<Mixer> {
        return get_mixer(&Card::new(self.card_index.get()));
    }


    /// Playback volume of the active control, between 0 and 100.
    pub fn playback_volume(&self) -> Result<f64> {
        let mixer = self.mixer()?;
        let selem = get_selem_by_name(&mixer, &self.control.borrow())?;
        let range = selem.get_playback_volume_range();
        let vol = selem.get_playback_volume(SelemChannelId::FrontRight)?;

        return Ok(vol_to_percent(vol, range));
    }
}

impl MixerControl for AlsaMixerControl {
    fn card_names(&self) -> Result<Vec<Option<String>>> {
        let mut names: Vec<Option<String>> = vec![];
        for r_card in get_alsa_cards() {
            let card = r_card?;
            let index = card.get_index();
            if index < 0 {
                continue;
            }
            while names.len() <= index as usize {
                names.push(None);
            }

            /* cards without any mixer controls are useless here */
            let usable = get_mixer(&card)
                .map(|m| !get_selem_names(&m).is_empty())
                .unwrap_or(false);
            if usable {
                names[index as usize] = card.get_name().ok();
            }
        }

        return Ok(names);
    }

    fn mixer_names(&self, card_index: i32) -> Result<Vec<String>> {
        let mixer = get_mixer(&Card::new(card_index))?;
        return Ok(get_selem_names(&mixer));
    }

    fn is_muted(&self) -> Result<bool> {
        let mixer = self.mixer()?;
        let selem = get_selem_by_name(&mixer, &self.control.borrow())?;
        if !selem.has_playback_switch() {
            return Ok(false);
        }
        let switch = selem.get_playback_switch(SelemChannelId::FrontRight)?;

        return Ok(switch == 0);
    }
}
