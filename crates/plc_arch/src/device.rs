//! The device: tile grid plus clock-region grid.

use crate::clock_region::ClockRegion;
use crate::tile::Tile;
use plc_common::Placement;

/// The loaded architecture.
///
/// Tiles and clock regions are stored column-major, matching the `X<col>Y<row>`
/// addressing of the input files.
#[derive(Debug, Clone)]
pub struct Device {
    num_col: i32,
    num_row: i32,
    tiles: Vec<Tile>,
    num_clock_col: i32,
    num_clock_row: i32,
    clock_regions: Vec<ClockRegion>,
}

impl Device {
    /// Creates a `num_col x num_row` grid of untyped tiles and no clock regions.
    pub fn new(num_col: i32, num_row: i32) -> Self {
        let num_col = num_col.max(0);
        let num_row = num_row.max(0);
        let mut tiles = Vec::with_capacity((num_col * num_row) as usize);
        for col in 0..num_col {
            for row in 0..num_row {
                tiles.push(Tile::new(col, row));
            }
        }
        Self {
            num_col,
            num_row,
            tiles,
            num_clock_col: 0,
            num_clock_row: 0,
            clock_regions: Vec::new(),
        }
    }

    /// Number of tile columns.
    pub fn num_col(&self) -> i32 {
        self.num_col
    }

    /// Number of tile rows.
    pub fn num_row(&self) -> i32 {
        self.num_row
    }

    /// Returns `true` if `(col, row)` is on the grid.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        (0..self.num_col).contains(&col) && (0..self.num_row).contains(&row)
    }

    fn tile_index(&self, col: i32, row: i32) -> Option<usize> {
        self.contains(col, row)
            .then(|| (col * self.num_row + row) as usize)
    }

    /// The tile at `(col, row)`.
    pub fn tile(&self, col: i32, row: i32) -> Option<&Tile> {
        self.tile_index(col, row).map(|i| &self.tiles[i])
    }

    /// Mutable access to the tile at `(col, row)`.
    pub fn tile_mut(&mut self, col: i32, row: i32) -> Option<&mut Tile> {
        self.tile_index(col, row).map(move |i| &mut self.tiles[i])
    }

    /// All tiles, column-major.
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// All tiles, mutably.
    pub fn tiles_mut(&mut self) -> &mut [Tile] {
        &mut self.tiles
    }

    /// Empties every slot's `placement` list.
    pub fn clear_slots(&mut self, placement: Placement) {
        for tile in &mut self.tiles {
            tile.clear(placement);
        }
    }

    /// Replaces the clock-region grid with `num_col x num_row` undeclared regions.
    pub fn reset_clock_regions(&mut self, num_col: i32, num_row: i32) {
        self.num_clock_col = num_col.max(0);
        self.num_clock_row = num_row.max(0);
        self.clock_regions =
            vec![ClockRegion::undeclared(); (self.num_clock_col * self.num_clock_row) as usize];
    }

    /// Number of clock-region columns.
    pub fn num_clock_col(&self) -> i32 {
        self.num_clock_col
    }

    /// Number of clock-region rows.
    pub fn num_clock_row(&self) -> i32 {
        self.num_clock_row
    }

    fn region_index(&self, col: i32, row: i32) -> Option<usize> {
        ((0..self.num_clock_col).contains(&col) && (0..self.num_clock_row).contains(&row))
            .then(|| (col * self.num_clock_row + row) as usize)
    }

    /// The clock region at grid position `(col, row)`.
    pub fn clock_region(&self, col: i32, row: i32) -> Option<&ClockRegion> {
        self.region_index(col, row).map(|i| &self.clock_regions[i])
    }

    /// Mutable access to the clock region at grid position `(col, row)`.
    pub fn clock_region_mut(&mut self, col: i32, row: i32) -> Option<&mut ClockRegion> {
        self.region_index(col, row)
            .map(move |i| &mut self.clock_regions[i])
    }

    /// All clock regions, column-major.
    pub fn clock_regions(&self) -> &[ClockRegion] {
        &self.clock_regions
    }

    /// Finds the grid position of the clock region containing tile `(col, row)`.
    ///
    /// Scans regions column-major and returns the first match; tiles off the
    /// device grid are in no region.
    pub fn clock_region_of(&self, col: i32, row: i32) -> Option<(i32, i32)> {
        if !self.contains(col, row) {
            return None;
        }
        let idx = self
            .clock_regions
            .iter()
            .position(|region| region.contains(col, row))?;
        let idx = idx as i32;
        Some((idx / self.num_clock_row, idx % self.num_clock_row))
    }

    /// Forgets the clock nets recorded by the previous clock-region check.
    pub fn clear_clock_nets(&mut self) {
        for region in &mut self.clock_regions {
            region.clock_nets.clear();
        }
    }
}
