//! Placement selector and tile coordinates.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Selects which of an instance's two locations a query reads.
///
/// Every check and report runs once per placement; the per-placement state on
/// slots and clock regions is recomputed on demand rather than duplicated.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Placement {
    /// The placement read from the node file.
    Baseline,
    /// The placement read from the output file.
    Optimized,
}

impl Placement {
    /// Both placements, in reporting order.
    pub const ALL: [Placement; 2] = [Placement::Baseline, Placement::Optimized];

    /// Capitalized name used as a report heading.
    pub fn title(self) -> &'static str {
        match self {
            Placement::Baseline => "Baseline",
            Placement::Optimized => "Optimized",
        }
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Placement::Baseline => write!(f, "baseline"),
            Placement::Optimized => write!(f, "optimized"),
        }
    }
}

/// A `(col, row, z)` site location; `z` selects the slot within the tile.
///
/// Unplaced instances carry [`Location::UNPLACED`], i.e. `(-1, -1, -1)`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub struct Location {
    /// Tile column.
    pub col: i32,
    /// Tile row.
    pub row: i32,
    /// Slot offset within the tile.
    pub z: i32,
}

impl Location {
    /// The location of an instance that has not been placed.
    pub const UNPLACED: Location = Location {
        col: -1,
        row: -1,
        z: -1,
    };

    /// Creates a new location.
    pub fn new(col: i32, row: i32, z: i32) -> Self {
        Self { col, row, z }
    }

    /// Returns `true` if every component is non-negative.
    pub fn is_placed(&self) -> bool {
        self.col >= 0 && self.row >= 0 && self.z >= 0
    }

    /// Returns the `(col, row)` tile coordinate, ignoring `z`.
    pub fn tile(&self) -> (i32, i32) {
        (self.col, self.row)
    }

    /// Parses the `X<col>Y<row>Z<z>` syntax of node and output files.
    pub fn parse(text: &str) -> Option<Self> {
        let rest = text.strip_prefix('X')?;
        let (col, rest) = rest.split_once('Y')?;
        let (row, z) = rest.split_once('Z')?;
        Some(Self::new(
            parse_coord(col)?,
            parse_coord(row)?,
            parse_coord(z)?,
        ))
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::UNPLACED
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "X{}Y{}Z{}", self.col, self.row, self.z)
    }
}

/// Parses the `X<col>Y<row>` tile syntax of site-map and clock-region files.
pub fn parse_tile_coord(text: &str) -> Option<(i32, i32)> {
    let rest = text.strip_prefix('X')?;
    let (col, row) = rest.split_once('Y')?;
    Some((parse_coord(col)?, parse_coord(row)?))
}

fn parse_coord(text: &str) -> Option<i32> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unplaced() {
        let loc = Location::default();
        assert_eq!(loc, Location::UNPLACED);
        assert!(!loc.is_placed());
    }

    #[test]
    fn partially_unplaced_is_not_placed() {
        assert!(!Location::new(3, -1, 0).is_placed());
        assert!(Location::new(0, 0, 0).is_placed());
    }

    #[test]
    fn parse_site_syntax() {
        assert_eq!(Location::parse("X12Y3Z7"), Some(Location::new(12, 3, 7)));
        assert_eq!(Location::parse("X1Y2"), None);
        assert_eq!(Location::parse("X-1Y2Z0"), None);
        assert_eq!(Location::parse("12Y3Z7"), None);
    }

    #[test]
    fn parse_tile_syntax() {
        assert_eq!(parse_tile_coord("X4Y9"), Some((4, 9)));
        assert_eq!(parse_tile_coord("X4"), None);
    }

    #[test]
    fn display_matches_input_syntax() {
        let loc = Location::new(5, 6, 1);
        assert_eq!(Location::parse(&loc.to_string()), Some(loc));
    }

    #[test]
    fn placement_display() {
        assert_eq!(Placement::Baseline.to_string(), "baseline");
        assert_eq!(Placement::ALL[1], Placement::Optimized);
    }
}
