//! A minimal INI document, as used by the volti config file.
//!
//! Sections keep their document order, entries keep their insertion
//! order. Keys are lower-cased when read, values are trimmed.
//! Multi-line values are written as tab-indented continuation lines.


use crate::errors::*;



#[derive(Debug, Clone, Default, PartialEq)]
/// A named group of key/value entries.
pub struct Section {
    pub name: String,
    entries: Vec<(String, String)>,
}

impl Section {
    fn new(name: &str) -> Section {
        return Section {
            name: String::from(name),
            entries: vec![],
        };
    }

    /// Get the value of `key`, if present.
    pub fn get(&self, key: &str) -> Option<&str> {
        return self.entries
            .iter()
            .find(|entry| entry.0 == key)
            .map(|entry| entry.1.as_str());
    }

    /// Set `key` to `val`, replacing an existing entry in place
    /// or appending a new one.
    pub fn set(&mut self, key: &str, val: &str) {
        match self.entries.iter_mut().find(|entry| entry.0 == key) {
            Some(entry) => entry.1 = String::from(val),
            None => {
                self.entries.push((String::from(key), String::from(val)))
            }
        }
    }

    /// All entries in insertion order.
    pub fn entries(&self) -> &[(String, String)] {
        return &self.entries;
    }
}



#[derive(Debug, Clone, Default, PartialEq)]
/// An INI document.
pub struct Ini {
    sections: Vec<Section>,
}

impl Ini {
    pub fn new() -> Ini {
        return Ini::default();
    }


    /// Parse a document from a string.
    pub fn parse(content: &str) -> Result<Ini> {
        let mut ini = Ini::new();
        ini.read_str(content)?;
        return Ok(ini);
    }


    /// Merge the given content into this document. Sections that already
    /// exist gain or overwrite entries, new sections are appended.
    pub fn read_str(&mut self, content: &str) -> Result<()> {
        let mut cur_section: Option<usize> = None;
        let mut cur_key: Option<String> = None;

        for (i, raw_line) in content.lines().enumerate() {
            let lineno = i + 1;
            let line = raw_line.trim();

            if line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            let indented = raw_line.starts_with(|c: char| c.is_whitespace());

            /* continuation of a multi-line value */
            if indented && cur_key.is_some() {
                let idx = cur_section.ok_or_else(|| {
                    Error::from(ErrorKind::IniParse(lineno, String::from(
                        "continuation line outside of a section")))
                })?;
                let key = cur_key.clone().unwrap_or_default();
                let section = &mut self.sections[idx];
                let mut val = String::from(section.get(&key).unwrap_or(""));
                val.push('\n');
                val.push_str(line);
                section.set(&key, &val);
                continue;
            }

            if line.is_empty() {
                cur_key = None;
                continue;
            }

            if line.starts_with('[') {
                if !line.ends_with(']') || line.len() < 3 {
                    bail!(ErrorKind::IniParse(lineno,
                                              format!("bad section header '{}'",
                                                      line)));
                }
                let name = line[1..line.len() - 1].trim();
                cur_section = Some(self.add_section(name));
                cur_key = None;
                continue;
            }

            let idx = cur_section.ok_or_else(|| {
                Error::from(ErrorKind::IniParse(lineno, String::from(
                    "entry before the first section header")))
            })?;

            let split = line.find(|c: char| c == '=' || c == ':').ok_or_else(|| {
                Error::from(ErrorKind::IniParse(lineno,
                                                format!("no delimiter in '{}'",
                                                        line)))
            })?;
            let key = line[..split].trim().to_lowercase();
            let val = line[split + 1..].trim();
            ensure!(!key.is_empty(),
                    ErrorKind::IniParse(lineno, String::from("empty key")));

            self.sections[idx].set(&key, val);
            cur_key = Some(key);
        }

        self.trim_values();

        return Ok(());
    }


    /// Continuation lines may leave trailing newlines, which
    /// don't survive a round trip.
    fn trim_values(&mut self) {
        for section in self.sections.iter_mut() {
            for entry in section.entries.iter_mut() {
                let trimmed = String::from(entry.1.trim());
                entry.1 = trimmed;
            }
        }
    }


    pub fn has_section(&self, name: &str) -> bool {
        return self.section(name).is_some();
    }


    pub fn section(&self, name: &str) -> Option<&Section> {
        return self.sections.iter().find(|s| s.name == name);
    }


    /// Add a section if it doesn't exist yet, returning its position.
    pub fn add_section(&mut self, name: &str) -> usize {
        match self.sections.iter().position(|s| s.name == name) {
            Some(idx) => idx,
            None => {
                self.sections.push(Section::new(name));
                self.sections.len() - 1
            }
        }
    }


    /// Get the value of `key` in section `name`.
    pub fn get(&self, name: &str, key: &str) -> Option<&str> {
        return self.section(name).and_then(|s| s.get(key));
    }


    /// Set `key` in section `name`, creating the section if necessary.
    pub fn set(&mut self, name: &str, key: &str, val: &str) {
        let idx = self.add_section(name);
        self.sections[idx].set(key, val);
    }


    pub fn sections(&self) -> &[Section] {
        return &self.sections;
    }


    /// Serialize the whole document.
    pub fn serialize(&self) -> String {
        let mut out = String::new();
        for section in self.sections.iter() {
            out.push_str(&format!("[{}]\n", section.name));
            for &(ref key, ref val) in section.entries.iter() {
                let val = val.replace('\n', "\n\t");
                out.push_str(&format!("{} = {}\n", key, val));
            }
            out.push('\n');
        }

        return out;
    }
}
