//! Clock regions.

use plc_common::NetId;
use std::collections::BTreeSet;
use std::fmt;

/// An inclusive rectangle of tiles sharing a clock-net budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockRegion {
    /// Leftmost column.
    pub x_left: i32,
    /// Rightmost column.
    pub x_right: i32,
    /// Bottom row.
    pub y_bottom: i32,
    /// Top row.
    pub y_top: i32,
    /// Clock nets seen by the most recent clock-region check.
    pub clock_nets: BTreeSet<NetId>,
}

impl ClockRegion {
    /// Creates a region covering `[x_left, x_right] x [y_bottom, y_top]`.
    pub fn new(x_left: i32, x_right: i32, y_bottom: i32, y_top: i32) -> Self {
        Self {
            x_left,
            x_right,
            y_bottom,
            y_top,
            clock_nets: BTreeSet::new(),
        }
    }

    /// A region that covers no tile, used for grid cells the clock file never declares.
    pub fn undeclared() -> Self {
        Self::new(0, -1, 0, -1)
    }

    /// Returns `true` if the clock file declared a non-empty rectangle.
    pub fn is_declared(&self) -> bool {
        self.x_left <= self.x_right && self.y_bottom <= self.y_top
    }

    /// Returns `true` if `(col, row)` lies inside the rectangle.
    pub fn contains(&self, col: i32, row: i32) -> bool {
        (self.x_left..=self.x_right).contains(&col) && (self.y_bottom..=self.y_top).contains(&row)
    }
}

impl fmt::Display for ClockRegion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{},{}][{},{}]",
            self.x_left, self.y_bottom, self.x_right, self.y_top
        )
    }
}
