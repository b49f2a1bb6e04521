//! Slot capacity, LUT pairing and LUT/DRAM exclusion.

use plc_arch::{Device, PinDir, SlotKind, Tile};
use plc_common::{NetId, Placement};
use plc_design::Design;
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use plc_source::Span;
use std::collections::BTreeSet;
use std::fmt;

/// LUT slots blocked by an occupied DRAM slot, indexed by DRAM slot.
const DRAM_BLOCKS: [std::ops::Range<usize>; 2] = [0..4, 4..8];

/// One offending slot of an overflowing tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotOverflow {
    /// Too many instances share a slot.
    Slot {
        /// Slot category.
        kind: SlotKind,
        /// Slot index.
        index: usize,
    },
    /// An occupied LUT slot in a band blocked by DRAM.
    LutDram {
        /// LUT slot index.
        index: usize,
    },
}

impl fmt::Display for SlotOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SlotOverflow::Slot { kind, index } => write!(f, "slot type: {kind} slot index: {index}"),
            SlotOverflow::LutDram { index } => write!(f, "slot type: LUT-DRAM slot index: {index}"),
        }
    }
}

/// Returns `true` if two or fewer LUTs in one slot stay within `max_inputs`
/// distinct input nets.
fn luts_fit(design: &Design, insts: &[plc_common::InstId], max_inputs: usize) -> bool {
    if insts.len() > 2 {
        return false;
    }
    let nets: BTreeSet<NetId> = insts
        .iter()
        .filter_map(|&id| design.instance(id))
        .flat_map(|inst| inst.pins(PinDir::Input))
        .filter_map(|pin| pin.net)
        .collect();
    nets.len() <= max_inputs
}

/// Lists the overflowing slots of one tile under `placement`.
pub fn tile_overflows(tile: &Tile, design: &Design, placement: Placement, max_lut_inputs: usize) -> Vec<SlotOverflow> {
    let mut overflows = Vec::new();
    for (kind, slots) in tile.slot_arrays() {
        for (index, slot) in slots.iter().enumerate() {
            let insts = slot.instances(placement);
            if insts.len() > 1 {
                if kind != SlotKind::Lut || !luts_fit(design, insts, max_lut_inputs) {
                    overflows.push(SlotOverflow::Slot { kind, index });
                }
                continue;
            }
            if kind != SlotKind::Dram || insts.is_empty() {
                continue;
            }
            // Other DRAM indices block nothing.
            let Some(band) = DRAM_BLOCKS.get(index) else {
                continue;
            };
            let luts = tile.slots(SlotKind::Lut).unwrap_or(&[]);
            for lut in band.clone() {
                if luts.get(lut).is_some_and(|slot| slot.is_occupied(placement)) {
                    overflows.push(SlotOverflow::LutDram { index: lut });
                }
            }
        }
    }
    overflows
}

/// Checks every tile's projected slots; returns the number of overflowing tiles.
///
/// Each overflowing tile gets one error listing its offending slots.
pub fn check_capacity(
    device: &Device,
    design: &Design,
    placement: Placement,
    max_lut_inputs: usize,
    sink: &DiagnosticSink,
) -> usize {
    let mut overflowing = 0;
    for tile in device.tiles() {
        let overflows = tile_overflows(tile, design, placement, max_lut_inputs);
        if overflows.is_empty() {
            continue;
        }
        overflowing += 1;
        let mut diag = Diagnostic::error(
            DiagnosticCode::CAPACITY_OVERFLOW,
            format!("tile {tile} is over the capacity"),
            Span::DUMMY,
        )
        .with_note(format!("in the {placement} placement"));
        for overflow in overflows {
            diag = diag.with_note(overflow.to_string());
        }
        sink.emit(diag);
    }
    overflowing
}
