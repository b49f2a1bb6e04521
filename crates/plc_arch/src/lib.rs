//! Device architecture model for the placement checker.
//!
//! A [`Device`] is a column-major grid of [`Tile`]s, each owning typed arrays
//! of [`Slot`]s, plus a grid of [`ClockRegion`]s. The cell [`Library`] gives
//! every model its ordered input and output pins with their control
//! properties. The loaders in [`loader`] build these from the `.lib`, `.scl`
//! and `.clk` files and report problems through a diagnostic sink.

#![warn(missing_docs)]

pub mod clock_region;
pub mod device;
pub mod error;
pub mod library;
pub mod loader;
pub mod report;
pub mod tile;
pub mod types;

pub use clock_region::ClockRegion;
pub use device::Device;
pub use error::ArchError;
pub use library::{LibCell, LibPin, Library, PinDir, PinProp};
pub use loader::{load_clock_regions, load_library, load_site_map};
pub use report::report_arch;
pub use tile::{Slot, Tile};
pub use types::{SlotKind, TileType};
