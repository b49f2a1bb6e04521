//! Instance pins and references to them.

use plc_arch::{PinDir, PinProp};
use plc_common::{parse_indexed_name, InstId, NetId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A pin owned by an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pin {
    /// The instance that owns this pin.
    pub owner: InstId,
    /// Direction relative to the owner.
    pub dir: PinDir,
    /// Control role inherited from the library cell.
    pub prop: PinProp,
    /// The net this pin is connected to, if any.
    pub net: Option<NetId>,
    /// Set by the timing file.
    pub timing_critical: bool,
}

impl Pin {
    /// Creates an unconnected, non-critical pin.
    pub fn new(owner: InstId, dir: PinDir, prop: PinProp) -> Self {
        Self {
            owner,
            dir,
            prop,
            net: None,
            timing_critical: false,
        }
    }
}

/// Addresses one pin of one instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PinRef {
    /// Owning instance.
    pub inst: InstId,
    /// Pin direction.
    pub dir: PinDir,
    /// Position within the owner's pins of that direction.
    pub index: usize,
}

impl PinRef {
    /// Creates a pin reference.
    pub fn new(inst: InstId, dir: PinDir, index: usize) -> Self {
        Self { inst, dir, index }
    }
}

impl fmt::Display for PinRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}_{}", self.inst, self.dir.prefix(), self.index)
    }
}

/// Parses the `I_<n>` / `O_<n>` pin names of net and timing files.
pub fn parse_pin_name(name: &str) -> Option<(PinDir, usize)> {
    [PinDir::Input, PinDir::Output]
        .into_iter()
        .find_map(|dir| parse_indexed_name(name, dir.prefix()).map(|idx| (dir, idx as usize)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pin_names() {
        assert_eq!(parse_pin_name("I_0"), Some((PinDir::Input, 0)));
        assert_eq!(parse_pin_name("O_12"), Some((PinDir::Output, 12)));
        assert_eq!(parse_pin_name("X_1"), None);
        assert_eq!(parse_pin_name("I1"), None);
    }

    #[test]
    fn pin_ref_display() {
        let r = PinRef::new(InstId::from_raw(7), PinDir::Output, 1);
        assert_eq!(r.to_string(), "inst_7 O_1");
    }
}
