//! Cell library: per-model pin templates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Control role of a pin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PinProp {
    /// Ordinary data pin.
    #[default]
    None,
    /// Clock enable (`CTRL` in library files).
    Ce,
    /// Set/reset.
    Reset,
    /// Clock.
    Clock,
}

impl PinProp {
    /// Parses the optional fourth field of a `PIN` line.
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "CTRL" => Some(PinProp::Ce),
            "CLOCK" => Some(PinProp::Clock),
            "RESET" => Some(PinProp::Reset),
            _ => None,
        }
    }
}

impl fmt::Display for PinProp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinProp::None => write!(f, "NONE"),
            PinProp::Ce => write!(f, "CE"),
            PinProp::Reset => write!(f, "RESET"),
            PinProp::Clock => write!(f, "CLOCK"),
        }
    }
}

/// Pin direction relative to its cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum PinDir {
    /// An input pin (`I_<n>` in net files).
    Input,
    /// An output pin (`O_<n>` in net files).
    Output,
}

impl PinDir {
    /// The prefix used for pins of this direction in net and timing files.
    pub fn prefix(self) -> &'static str {
        match self {
            PinDir::Input => "I",
            PinDir::Output => "O",
        }
    }
}

/// One pin of a library cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibPin {
    /// Pin name as written in the library.
    pub name: String,
    /// Control role.
    pub prop: PinProp,
}

/// A library cell: a model name and its ordered pins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibCell {
    /// Model name, e.g. `LUT4` or `SEQ`.
    pub name: String,
    /// Input pins, indexed by the number after `_` in their names.
    pub inputs: Vec<LibPin>,
    /// Output pins, indexed likewise.
    pub outputs: Vec<LibPin>,
}

impl LibCell {
    /// Returns the pins of one direction.
    pub fn pins(&self, dir: PinDir) -> &[LibPin] {
        match dir {
            PinDir::Input => &self.inputs,
            PinDir::Output => &self.outputs,
        }
    }
}

/// All library cells, keyed by model name.
#[derive(Debug, Clone, Default)]
pub struct Library {
    cells: BTreeMap<String, LibCell>,
}

impl Library {
    /// Creates an empty library.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell; returns `false` and keeps the existing cell on a duplicate name.
    pub fn insert(&mut self, cell: LibCell) -> bool {
        if self.cells.contains_key(&cell.name) {
            return false;
        }
        self.cells.insert(cell.name.clone(), cell);
        true
    }

    /// Looks a cell up by model name.
    pub fn get(&self, name: &str) -> Option<&LibCell> {
        self.cells.get(name)
    }

    /// Iterates cells in name order.
    pub fn cells(&self) -> impl Iterator<Item = &LibCell> {
        self.cells.values()
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if no cell has been loaded.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}
