//! Placed instances of library cells.

use crate::pin::Pin;
use plc_arch::{LibCell, PinDir, SlotKind};
use plc_common::{InstId, Location, Placement};

/// An instance of a library cell with its two locations.
#[derive(Debug, Clone)]
pub struct Instance {
    /// ID taken from the `inst_<id>` name.
    pub id: InstId,
    /// Raw model name, i.e. the library key.
    pub model: String,
    /// Unified slot category of the model, if it is placeable.
    pub kind: Option<SlotKind>,
    /// Fixed instances may not move between the two placements.
    pub fixed: bool,
    /// Location from the node file.
    pub base_location: Location,
    /// Location from the output file; unplaced until one is read.
    pub location: Location,
    inputs: Vec<Pin>,
    outputs: Vec<Pin>,
}

impl Instance {
    /// Creates an instance of `cell` with pins copied from the cell template.
    pub fn new(id: InstId, cell: &LibCell, fixed: bool, base_location: Location) -> Self {
        let materialize = |dir: PinDir| -> Vec<Pin> {
            cell.pins(dir)
                .iter()
                .map(|lib_pin| Pin::new(id, dir, lib_pin.prop))
                .collect()
        };
        Self {
            id,
            model: cell.name.clone(),
            kind: SlotKind::from_model(&cell.name),
            fixed,
            base_location,
            location: Location::UNPLACED,
            inputs: materialize(PinDir::Input),
            outputs: materialize(PinDir::Output),
        }
    }

    /// The location read for `placement`.
    pub fn location_for(&self, placement: Placement) -> Location {
        match placement {
            Placement::Baseline => self.base_location,
            Placement::Optimized => self.location,
        }
    }

    /// Returns `true` if the optimized location is fully specified.
    pub fn is_placed(&self) -> bool {
        self.location.is_placed()
    }

    /// Returns `true` if the optimized location differs from the baseline.
    pub fn is_moved(&self) -> bool {
        self.location != self.base_location
    }

    /// The pins of one direction.
    pub fn pins(&self, dir: PinDir) -> &[Pin] {
        match dir {
            PinDir::Input => &self.inputs,
            PinDir::Output => &self.outputs,
        }
    }

    /// Mutable access to the pins of one direction.
    pub fn pins_mut(&mut self, dir: PinDir) -> &mut [Pin] {
        match dir {
            PinDir::Input => &mut self.inputs,
            PinDir::Output => &mut self.outputs,
        }
    }

    /// Input pins followed by output pins.
    pub fn all_pins(&self) -> impl Iterator<Item = &Pin> {
        self.inputs.iter().chain(&self.outputs)
    }
}
