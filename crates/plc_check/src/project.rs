//! Projection of instance locations onto tile slots.

use plc_arch::{Device, SlotKind};
use plc_common::{InstId, Location, Placement};
use plc_design::Design;
use plc_diagnostics::{Diagnostic, DiagnosticCode};
use plc_source::Span;
use std::fmt;

/// An instance that could not be put on a slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Misplacement {
    /// The placement gives the instance no location.
    Unplaced {
        /// The instance.
        inst: InstId,
    },
    /// The location is off the device grid.
    OutsideDevice {
        /// The instance.
        inst: InstId,
        /// Where it was placed.
        location: Location,
    },
    /// The tile's types do not cover the instance's model.
    TypeMismatch {
        /// The instance.
        inst: InstId,
        /// Raw model name.
        model: String,
        /// Where it was placed.
        location: Location,
    },
    /// `z` is beyond the tile's slot array for the model.
    SlotOutOfRange {
        /// The instance.
        inst: InstId,
        /// Slot category.
        kind: SlotKind,
        /// Where it was placed.
        location: Location,
    },
}

impl Misplacement {
    /// The diagnostic code for this problem.
    pub fn code(&self) -> DiagnosticCode {
        match self {
            Misplacement::Unplaced { .. } => DiagnosticCode::UNPLACED_INSTANCE,
            Misplacement::OutsideDevice { .. } => DiagnosticCode::OUTSIDE_DEVICE,
            Misplacement::TypeMismatch { .. } => DiagnosticCode::TYPE_MISMATCH,
            Misplacement::SlotOutOfRange { .. } => DiagnosticCode::SLOT_OUT_OF_RANGE,
        }
    }

    /// Converts into an error diagnostic for `placement`.
    pub fn to_diagnostic(&self, placement: Placement) -> Diagnostic {
        Diagnostic::error(self.code(), format!("{self}"), Span::DUMMY)
            .with_note(format!("in the {placement} placement"))
    }
}

impl fmt::Display for Misplacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Misplacement::Unplaced { inst } => write!(f, "{inst} is not placed"),
            Misplacement::OutsideDevice { inst, location } => {
                write!(f, "{inst} at {location} lies outside the device")
            }
            Misplacement::TypeMismatch { inst, model, location } => write!(
                f,
                "X{}Y{} {model} instance {inst}, type mismatch with tile type",
                location.col, location.row
            ),
            Misplacement::SlotOutOfRange { inst, kind, location } => write!(
                f,
                "{inst}: {kind} slot offset {} exceeds the capacity of {}",
                location.z,
                kind.capacity()
            ),
        }
    }
}

/// Rebuilds the `placement` slot lists of every tile from instance locations.
///
/// The lists are cleared first, so projecting twice gives the same state.
/// Instances that cannot be put on a slot are left out and returned.
pub fn project(device: &mut Device, design: &Design, placement: Placement) -> Vec<Misplacement> {
    device.clear_slots(placement);
    let mut problems = Vec::new();
    for inst in design.instances() {
        let location = inst.location_for(placement);
        if !location.is_placed() {
            problems.push(Misplacement::Unplaced { inst: inst.id });
            continue;
        }
        let Some(tile) = device.tile_mut(location.col, location.row) else {
            problems.push(Misplacement::OutsideDevice {
                inst: inst.id,
                location,
            });
            continue;
        };
        let Some(kind) = inst.kind.filter(|&kind| tile.accepts(kind)) else {
            problems.push(Misplacement::TypeMismatch {
                inst: inst.id,
                model: inst.model.clone(),
                location,
            });
            continue;
        };
        let slot = tile
            .slots_mut(kind)
            .and_then(|slots| slots.get_mut(location.z as usize));
        match slot {
            Some(slot) => slot.add(placement, inst.id),
            None => problems.push(Misplacement::SlotOutOfRange {
                inst: inst.id,
                kind,
                location,
            }),
        }
    }
    problems
}
