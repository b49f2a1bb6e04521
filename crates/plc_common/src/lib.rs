//! Shared foundational types used across the placement checker.
//!
//! This crate provides the placement selector, tile coordinates, entity ID
//! newtypes, the indexed-name parser shared by every loader, the text table
//! used by the reports and the internal error type.

#![warn(missing_docs)]

pub mod ids;
pub mod location;
pub mod name;
pub mod result;
pub mod table;

pub use ids::{InstId, NetId};
pub use location::{parse_tile_coord, Location, Placement};
pub use name::parse_indexed_name;
pub use result::{InternalError, PlcResult};
pub use table::Table;
