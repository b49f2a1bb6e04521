//! Design netlist for the placement checker.
//!
//! Instances own their pins, materialized from the library cell of their
//! model. Nets refer to pins through [`PinRef`]s, so the model has no
//! ownership cycles. Every instance carries a baseline and an optimized
//! location; queries that depend on which one is meant take a
//! [`Placement`](plc_common::Placement).

#![warn(missing_docs)]

pub mod design;
pub mod instance;
pub mod loader;
pub mod net;
pub mod pin;
pub mod report;

pub use design::Design;
pub use instance::Instance;
pub use loader::{load_nets, load_nodes, load_output, load_timing, OutputStats};
pub use net::Net;
pub use pin::{parse_pin_name, Pin, PinRef};
pub use report::report_design;
