//! List models backing the card combo box, the mixer list and the
//! icon theme combo box of the preferences dialog.
//!
//! These are plain data; the toolkit layer mirrors them into its own
//! list stores.


/// Pango weight of an unselected mixer row.
pub const WEIGHT_NORMAL: i32 = 400;
/// Pango weight of the selected mixer row.
pub const WEIGHT_BOLD: i32 = 700;



#[derive(Clone, Debug, PartialEq)]
/// A row of the card combo box.
pub struct CardRow {
    /// The card index, as understood by the audio backend.
    pub index: i32,
    pub name: String,
}


#[derive(Clone, Debug, Default, PartialEq)]
/// The audio cards, as enumerated when the dialog opened.
pub struct CardListModel {
    rows: Vec<CardRow>,
}

impl CardListModel {
    /// Build the model from the backend's card list, where the position
    /// is the card index. Unnamed cards are skipped.
    pub fn new(names: Vec<Option<String>>) -> CardListModel {
        let rows = names
            .into_iter()
            .enumerate()
            .filter_map(|(i, name)| {
                name.map(|name| {
                    CardRow {
                        index: i as i32,
                        name,
                    }
                })
            })
            .collect();

        return CardListModel { rows };
    }

    pub fn rows(&self) -> &[CardRow] {
        return &self.rows;
    }

    pub fn get(&self, row: usize) -> Option<&CardRow> {
        return self.rows.get(row);
    }

    /// The row showing the card with the given index.
    pub fn position_of(&self, card_index: i32) -> Option<usize> {
        return self.rows.iter().position(|r| r.index == card_index);
    }
}



#[derive(Clone, Debug, PartialEq)]
/// A row of the mixer list.
pub struct MixerRow {
    pub selected: bool,
    pub name: String,
    pub weight: i32,
}

impl MixerRow {
    fn new(name: &str, selected: bool) -> MixerRow {
        return MixerRow {
            selected,
            name: String::from(name),
            weight: if selected { WEIGHT_BOLD } else { WEIGHT_NORMAL },
        };
    }

    fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
        self.weight = if selected { WEIGHT_BOLD } else { WEIGHT_NORMAL };
    }
}


#[derive(Clone, Debug, Default, PartialEq)]
/// The mixer controls of the selected card. Behaves like a group of
/// radio buttons: the active control is selected and bold.
pub struct MixerListModel {
    rows: Vec<MixerRow>,
}

impl MixerListModel {
    pub fn new<S>(mixers: &[S], active: &str) -> MixerListModel
    where
        S: AsRef<str>,
    {
        let mut model = MixerListModel::default();
        model.rebuild(mixers, active);
        return model;
    }

    /// Replace all rows, marking `active` as selected.
    pub fn rebuild<S>(&mut self, mixers: &[S], active: &str)
    where
        S: AsRef<str>,
    {
        self.rows = mixers
            .iter()
            .map(|m| MixerRow::new(m.as_ref(), m.as_ref() == active))
            .collect();
    }

    /// Select the given row, deselecting every other one. Returns the
    /// newly selected control, or `None` if the row was already
    /// selected or doesn't exist.
    pub fn select(&mut self, row: usize) -> Option<String> {
        match self.rows.get(row) {
            Some(r) if !r.selected => (),
            _ => return None,
        }

        for r in self.rows.iter_mut() {
            if r.selected {
                r.set_selected(false);
            }
        }
        self.rows[row].set_selected(true);

        return Some(self.rows[row].name.clone());
    }

    /// The name of the selected row, if any.
    pub fn selected_name(&self) -> Option<&str> {
        return self.rows
            .iter()
            .find(|r| r.selected)
            .map(|r| r.name.as_str());
    }

    pub fn rows(&self) -> &[MixerRow] {
        return &self.rows;
    }
}



#[derive(Clone, Debug, Default, PartialEq)]
/// The icon themes, enumerated once when the dialog opened.
pub struct ThemeListModel {
    themes: Vec<String>,
}

impl ThemeListModel {
    pub fn new(themes: Vec<String>) -> ThemeListModel {
        return ThemeListModel { themes };
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        return self.themes.get(index).map(|s| s.as_str());
    }

    pub fn position_of(&self, theme: &str) -> Option<usize> {
        return self.themes.iter().position(|t| t == theme);
    }

    pub fn themes(&self) -> &[String] {
        return &self.themes;
    }
}
