//! Nets: one driver and an ordered list of fanouts.

use crate::pin::PinRef;
use plc_common::NetId;

/// A signal net.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Net {
    /// ID taken from the `net_<id>` name.
    pub id: NetId,
    /// Marked `clock` in the nets file.
    pub clock: bool,
    /// Driver and fanouts share a tile under the baseline placement.
    pub intra_tile: bool,
    /// The output pin driving the net.
    pub driver: Option<PinRef>,
    /// Input pins in file order.
    pub fanouts: Vec<PinRef>,
}

impl Net {
    /// Creates an empty net.
    pub fn new(id: NetId, clock: bool) -> Self {
        Self {
            id,
            clock,
            intra_tile: false,
            driver: None,
            fanouts: Vec::new(),
        }
    }

    /// Number of connected pins, driver included.
    pub fn num_pins(&self) -> usize {
        usize::from(self.driver.is_some()) + self.fanouts.len()
    }

    /// The driver (if any) followed by the fanouts.
    pub fn pins(&self) -> impl Iterator<Item = PinRef> + '_ {
        self.driver.into_iter().chain(self.fanouts.iter().copied())
    }
}
