//! Rectilinear Steiner minimum trees in the style of FLUTE.
//!
//! Nets of up to [`FLUTE_D`] pins are solved from a lookup table of optimal
//! topologies indexed by the relative order of the pins. When no table is
//! configured, the same degrees are solved by an exact dynamic program over
//! the Hanan grid. Larger nets are split at a shared pin, solved recursively
//! and merged back.
//!
//! ```
//! use plc_flute::{Flute, FluteOptions, Point};
//!
//! let mut flute = Flute::new(FluteOptions::default());
//! let pins = [Point::new(0, 0), Point::new(0, 3), Point::new(4, 0), Point::new(4, 3)];
//! assert_eq!(flute.wirelength(&pins).unwrap(), 10);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod flute;
mod hanan;
pub mod lut;
mod low_degree;
mod merge;
mod refine;
pub mod source;
pub mod tree;

pub use error::FluteError;
pub use flute::{Flute, FluteOptions};
pub use lut::{parse_lut, DegreeTable, LutTable, Solution, FLUTE_D, NUM_GROUPS};
pub use source::{CheckedLutSource, EmbeddedLutSource, FileLutSource, LutSource};
pub use tree::{Branch, Point, Tree};
