use std::fmt;

use serde::Serialize;

/// Grammatical case of a question group in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Case {
    Nominativ,
    Akkusativ,
    Genitiv,
    Dativ,
}

impl Case {
    /// Processing order of the groups.
    pub const ALL: [Case; 4] = [Case::Nominativ, Case::Akkusativ, Case::Genitiv, Case::Dativ];

    /// Top-level key of the group in the data file.
    pub fn key(self) -> &'static str {
        match self {
            Case::Nominativ => "nominativ",
            Case::Akkusativ => "akkusativ",
            Case::Genitiv => "genitiv",
            Case::Dativ => "dativ",
        }
    }

    pub fn prefix(self) -> char {
        match self {
            Case::Nominativ => 'N',
            Case::Akkusativ => 'A',
            Case::Genitiv => 'G',
            Case::Dativ => 'D',
        }
    }

    /// Identifier of the `index`-th surviving entry, e.g. `G_4`.
    pub fn entry_id(self, index: usize) -> String {
        format!("{}_{index}", self.prefix())
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
