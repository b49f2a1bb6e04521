//! Legality checks and quality reports over a loaded placement.
//!
//! Every check and report takes a [`Placement`](plc_common::Placement) or
//! runs once per placement. Slot occupancy is rebuilt by [`project`] before
//! anything reads it, so the checks never depend on which command ran
//! earlier. User-visible violations go to a
//! [`DiagnosticSink`](plc_diagnostics::DiagnosticSink); report text goes to
//! any [`std::io::Write`].

#![warn(missing_docs)]

pub mod capacity;
pub mod clock_region;
pub mod control_set;
pub mod error;
pub mod legal;
pub mod pin_density;
pub mod project;
pub mod report;
pub mod tile_query;
pub mod wirelength;

#[cfg(test)]
pub(crate) mod fixture;

pub use capacity::{check_capacity, SlotOverflow};
pub use clock_region::{check_clock_region, report_clock_region};
pub use control_set::check_control_set;
pub use error::CheckError;
pub use legal::legal_check;
pub use pin_density::{pin_density, report_pin_density, TileDensity};
pub use project::{project, Misplacement};
pub use report::{report_net, report_tile};
pub use tile_query::{connected_input_nets, connected_output_nets, control_set, ControlSet};
pub use wirelength::{
    critical_wirelength, non_critical_wirelength, report_wirelength, rsmt_points, total_wirelength,
    WirelengthTotals,
};
