//! Errors raised while building tiles.

use crate::types::TileType;

/// Errors from tile construction; loaders turn these into diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArchError {
    /// The site map names the same type twice for one tile.
    #[error("tile X{col}Y{row} already has type {tile_type}")]
    DuplicateType {
        /// Tile column.
        col: i32,
        /// Tile row.
        row: i32,
        /// The repeated type.
        tile_type: TileType,
    },
}
