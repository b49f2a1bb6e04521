//! Per-tile net queries over projected slots.

use plc_arch::{PinDir, PinProp, SlotKind, Tile};
use plc_common::{NetId, Placement};
use plc_design::Design;
use std::collections::BTreeSet;

/// SEQ slot ranges of the two control-set banks of a PLB.
pub const BANKS: [std::ops::Range<usize>; 2] = [0..8, 8..16];

/// The distinct control nets seen by one bank.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ControlSet {
    /// Nets on `CLOCK` pins.
    pub clock: BTreeSet<NetId>,
    /// Nets on `RESET` pins.
    pub reset: BTreeSet<NetId>,
    /// Nets on clock-enable pins.
    pub ce: BTreeSet<NetId>,
}

impl ControlSet {
    /// Adds every net of `other`.
    pub fn extend(&mut self, other: &ControlSet) {
        self.clock.extend(&other.clock);
        self.reset.extend(&other.reset);
        self.ce.extend(&other.ce);
    }
}

/// LUT and SEQ instances of `tile` under `placement`.
fn logic_instances<'a>(
    tile: &'a Tile,
    design: &'a Design,
    placement: Placement,
) -> impl Iterator<Item = &'a plc_design::Instance> + 'a {
    [SlotKind::Lut, SlotKind::Seq]
        .into_iter()
        .flat_map(move |kind| tile.instances_of(kind, placement))
        .filter_map(move |id| design.instance(id))
}

/// Nets entering the tile's LUTs and SEQs from a driver in another tile.
///
/// Empty for tiles that are not PLBs.
pub fn connected_input_nets(tile: &Tile, design: &Design, placement: Placement) -> BTreeSet<NetId> {
    let mut nets = BTreeSet::new();
    if !tile.is_plb() {
        return nets;
    }
    for inst in logic_instances(tile, design, placement) {
        for net_id in inst.pins(PinDir::Input).iter().filter_map(|pin| pin.net) {
            let Some(net) = design.net(net_id) else {
                continue;
            };
            let driver_here = net
                .driver
                .and_then(|driver| design.pin_location(driver, placement))
                .is_some_and(|loc| loc.tile() == (tile.col(), tile.row()));
            if !driver_here {
                nets.insert(net_id);
            }
        }
    }
    nets
}

/// Nets leaving the tile from its LUTs and SEQs, i.e. outputs of nets that
/// are not intra-tile under `placement`.
pub fn connected_output_nets(tile: &Tile, design: &Design, placement: Placement) -> BTreeSet<NetId> {
    let mut nets = BTreeSet::new();
    if !tile.is_plb() {
        return nets;
    }
    for inst in logic_instances(tile, design, placement) {
        for net_id in inst.pins(PinDir::Output).iter().filter_map(|pin| pin.net) {
            if design
                .net(net_id)
                .is_some_and(|net| !design.is_intra_tile(net, placement))
            {
                nets.insert(net_id);
            }
        }
    }
    nets
}

/// Control nets of the SEQ instances in `bank` (0 or 1) of a PLB.
pub fn control_set(tile: &Tile, design: &Design, placement: Placement, bank: usize) -> ControlSet {
    let mut set = ControlSet::default();
    let (Some(seqs), Some(range)) = (tile.slots(SlotKind::Seq), BANKS.get(bank)) else {
        return set;
    };
    let insts = seqs
        .get(range.clone())
        .unwrap_or(&[])
        .iter()
        .flat_map(|slot| slot.instances(placement))
        .filter_map(|&id| design.instance(id));
    for inst in insts {
        for pin in inst.all_pins() {
            let Some(net) = pin.net else {
                continue;
            };
            match pin.prop {
                PinProp::Clock => set.clock.insert(net),
                PinProp::Reset => set.reset.insert(net),
                PinProp::Ce => set.ce.insert(net),
                PinProp::None => false,
            };
        }
    }
    set
}
