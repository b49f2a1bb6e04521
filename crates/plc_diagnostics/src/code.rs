//! Diagnostic codes, one category per class of checker error.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The error class of a diagnostic, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Malformed input lines and duplicate definitions (`P`).
    Parse,
    /// References to unknown instances, cells, nets or pins (`R`).
    Reference,
    /// Instances placed on sites that cannot host them (`T`).
    Type,
    /// Slot overflows, LUT pairing and LUT/DRAM exclusion (`C`).
    Capacity,
    /// Per-bank clock, reset and clock-enable excess (`S`).
    ControlSet,
    /// Clock-region membership and clock-net limits (`K`).
    ClockRegion,
    /// Unplaced or illegally moved instances (`U`).
    Placement,
    /// Unreadable files (`I`).
    Io,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Parse => 'P',
            Category::Reference => 'R',
            Category::Type => 'T',
            Category::Capacity => 'C',
            Category::ControlSet => 'S',
            Category::ClockRegion => 'K',
            Category::Placement => 'U',
            Category::Io => 'I',
        }
    }
}

/// A diagnostic code, displayed as the category prefix and three digits (`C002`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }

    /// A line with missing, extra or unparsable fields.
    pub const MALFORMED_LINE: Self = Self::new(Category::Parse, 1);
    /// A cell, instance, tile type or net defined twice.
    pub const DUPLICATE_DEFINITION: Self = Self::new(Category::Parse, 2);
    /// A net block whose pin lines disagree with its declared pin count.
    pub const PIN_COUNT_MISMATCH: Self = Self::new(Category::Parse, 3);
    /// A net with more than one output pin.
    pub const MULTIPLE_DRIVERS: Self = Self::new(Category::Parse, 4);
    /// A pin listed on two nets.
    pub const PIN_ALREADY_CONNECTED: Self = Self::new(Category::Parse, 5);
    /// An unknown keyword or command.
    pub const UNKNOWN_KEYWORD: Self = Self::new(Category::Parse, 6);
    /// An output line whose model differs from the node file.
    pub const MODEL_CHANGED: Self = Self::new(Category::Parse, 7);

    /// An instance name that is not in the design.
    pub const UNKNOWN_INSTANCE: Self = Self::new(Category::Reference, 1);
    /// A model name that is not in the library.
    pub const UNKNOWN_CELL: Self = Self::new(Category::Reference, 2);
    /// A net name that is not in the design.
    pub const UNKNOWN_NET: Self = Self::new(Category::Reference, 3);
    /// A pin index beyond the cell's pin list.
    pub const UNKNOWN_PIN: Self = Self::new(Category::Reference, 4);
    /// A command that needs data no earlier command loaded.
    pub const MISSING_INPUT: Self = Self::new(Category::Reference, 5);
    /// A tile coordinate outside the device grid.
    pub const UNKNOWN_TILE: Self = Self::new(Category::Reference, 6);

    /// An instance whose model does not match any type of its tile.
    pub const TYPE_MISMATCH: Self = Self::new(Category::Type, 1);
    /// A slot offset beyond the tile's slot array.
    pub const SLOT_OUT_OF_RANGE: Self = Self::new(Category::Type, 2);
    /// An instance placed outside the device grid.
    pub const OUTSIDE_DEVICE: Self = Self::new(Category::Type, 3);

    /// A tile with at least one overflowing slot.
    pub const CAPACITY_OVERFLOW: Self = Self::new(Category::Capacity, 1);

    /// More clock nets in a bank than allowed.
    pub const BANK_CLOCK_EXCESS: Self = Self::new(Category::ControlSet, 1);
    /// More reset nets in a bank than allowed.
    pub const BANK_RESET_EXCESS: Self = Self::new(Category::ControlSet, 2);
    /// More clock-enable nets in a bank than allowed.
    pub const BANK_CE_EXCESS: Self = Self::new(Category::ControlSet, 3);

    /// A clock region with more clock nets than allowed.
    pub const REGION_OVERFLOW: Self = Self::new(Category::ClockRegion, 1);
    /// An instance outside every clock region.
    pub const OUTSIDE_CLOCK_REGION: Self = Self::new(Category::ClockRegion, 2);

    /// An instance without an optimized location.
    pub const UNPLACED_INSTANCE: Self = Self::new(Category::Placement, 1);
    /// A fixed instance whose optimized location differs from its baseline.
    pub const MOVED_FIXED_INSTANCE: Self = Self::new(Category::Placement, 2);

    /// A file that could not be read.
    pub const UNREADABLE_FILE: Self = Self::new(Category::Io, 1);
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
