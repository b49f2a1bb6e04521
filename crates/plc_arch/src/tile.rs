//! Tiles and their slot arrays.

use crate::error::ArchError;
use crate::types::{SlotKind, TileType};
use plc_common::{InstId, Placement};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// One placement site within a tile.
///
/// Holds independent instance lists for the two placements. A list normally
/// has zero or one entry; LUT slots may legally hold two.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slot {
    baseline: Vec<InstId>,
    optimized: Vec<InstId>,
}

impl Slot {
    /// The instances projected onto this slot for `placement`.
    pub fn instances(&self, placement: Placement) -> &[InstId] {
        match placement {
            Placement::Baseline => &self.baseline,
            Placement::Optimized => &self.optimized,
        }
    }

    /// Appends an instance to the `placement` list.
    pub fn add(&mut self, placement: Placement, inst: InstId) {
        self.list_mut(placement).push(inst);
    }

    /// Empties the `placement` list.
    pub fn clear(&mut self, placement: Placement) {
        self.list_mut(placement).clear();
    }

    /// Returns `true` if any instance sits here under `placement`.
    pub fn is_occupied(&self, placement: Placement) -> bool {
        !self.instances(placement).is_empty()
    }

    fn list_mut(&mut self, placement: Placement) -> &mut Vec<InstId> {
        match placement {
            Placement::Baseline => &mut self.baseline,
            Placement::Optimized => &mut self.optimized,
        }
    }
}

/// A tile at `(col, row)` with its declared types and slot arrays.
#[derive(Debug, Clone)]
pub struct Tile {
    col: i32,
    row: i32,
    types: BTreeSet<TileType>,
    slots: BTreeMap<SlotKind, Vec<Slot>>,
}

impl Tile {
    /// Creates a tile with no types.
    pub fn new(col: i32, row: i32) -> Self {
        Self {
            col,
            row,
            types: BTreeSet::new(),
            slots: BTreeMap::new(),
        }
    }

    /// Tile column.
    pub fn col(&self) -> i32 {
        self.col
    }

    /// Tile row.
    pub fn row(&self) -> i32 {
        self.row
    }

    /// The declared types.
    pub fn types(&self) -> &BTreeSet<TileType> {
        &self.types
    }

    /// Returns `true` if `tile_type` was declared for this tile.
    pub fn has_type(&self, tile_type: TileType) -> bool {
        self.types.contains(&tile_type)
    }

    /// Returns `true` for programmable logic blocks.
    pub fn is_plb(&self) -> bool {
        self.has_type(TileType::Plb)
    }

    /// Declares a type and allocates its slot arrays.
    pub fn add_type(&mut self, tile_type: TileType) -> Result<(), ArchError> {
        if !self.types.insert(tile_type) {
            return Err(ArchError::DuplicateType {
                col: self.col,
                row: self.row,
                tile_type,
            });
        }
        for &kind in tile_type.slot_kinds() {
            self.slots
                .entry(kind)
                .or_insert_with(|| vec![Slot::default(); kind.capacity()]);
        }
        Ok(())
    }

    /// Returns `true` if the tile's types cover instances of `kind`.
    pub fn accepts(&self, kind: SlotKind) -> bool {
        self.has_type(kind.host())
    }

    /// The slot array for `kind`, if the tile allocates one.
    pub fn slots(&self, kind: SlotKind) -> Option<&[Slot]> {
        self.slots.get(&kind).map(Vec::as_slice)
    }

    /// Mutable access to the slot array for `kind`.
    pub fn slots_mut(&mut self, kind: SlotKind) -> Option<&mut [Slot]> {
        self.slots.get_mut(&kind).map(Vec::as_mut_slice)
    }

    /// Iterates `(kind, slots)` in slot-kind order.
    pub fn slot_arrays(&self) -> impl Iterator<Item = (SlotKind, &[Slot])> {
        self.slots.iter().map(|(kind, slots)| (*kind, slots.as_slice()))
    }

    /// Instances in `kind` slots under `placement`, in slot order.
    pub fn instances_of(&self, kind: SlotKind, placement: Placement) -> impl Iterator<Item = InstId> + '_ {
        self.slots(kind)
            .unwrap_or(&[])
            .iter()
            .flat_map(move |slot| slot.instances(placement).iter().copied())
    }

    /// Returns `true` if no slot is occupied under `placement`.
    pub fn is_empty(&self, placement: Placement) -> bool {
        self.slots
            .values()
            .flatten()
            .all(|slot| !slot.is_occupied(placement))
    }

    /// Empties every slot's `placement` list.
    pub fn clear(&mut self, placement: Placement) {
        for slot in self.slots.values_mut().flatten() {
            slot.clear(placement);
        }
    }
}

impl fmt::Display for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}Y{}", self.col, self.row)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plb_allocates_all_logic_slots() {
        let mut tile = Tile::new(2, 3);
        tile.add_type(TileType::Plb).unwrap();
        assert_eq!(tile.slots(SlotKind::Lut).unwrap().len(), 8);
        assert_eq!(tile.slots(SlotKind::Seq).unwrap().len(), 16);
        assert_eq!(tile.slots(SlotKind::Dram).unwrap().len(), 2);
        assert!(tile.slots(SlotKind::Dsp).is_none());
        assert!(tile.accepts(SlotKind::Carry4));
        assert!(!tile.accepts(SlotKind::Dsp));
        assert_eq!(tile.to_string(), "X2Y3");
    }

    #[test]
    fn duplicate_type_rejected() {
        let mut tile = Tile::new(0, 0);
        tile.add_type(TileType::Ioa).unwrap();
        let err = tile.add_type(TileType::Ioa).unwrap_err();
        assert_eq!(err.to_string(), "tile X0Y0 already has type IOA");
    }

    #[test]
    fn fixed_allocates_nothing() {
        let mut tile = Tile::new(0, 0);
        tile.add_type(TileType::Fixed).unwrap();
        assert_eq!(tile.slot_arrays().count(), 0);
        assert!(tile.is_empty(Placement::Baseline));
    }

    #[test]
    fn placements_are_independent() {
        let mut tile = Tile::new(0, 0);
        tile.add_type(TileType::Plb).unwrap();
        let a = InstId::from_raw(1);
        tile.slots_mut(SlotKind::Seq).unwrap()[9].add(Placement::Optimized, a);
        assert!(tile.is_empty(Placement::Baseline));
        assert!(!tile.is_empty(Placement::Optimized));
        let seqs: Vec<_> = tile.instances_of(SlotKind::Seq, Placement::Optimized).collect();
        assert_eq!(seqs, vec![a]);

        tile.clear(Placement::Optimized);
        assert!(tile.is_empty(Placement::Optimized));
    }
}
