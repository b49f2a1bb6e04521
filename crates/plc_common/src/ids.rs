//! Opaque ID newtypes for design entities.
//!
//! Instance and net IDs are the integers carried in the input names
//! (`inst_<id>`, `net_<id>`), so they are stable across files and runs and
//! are used directly as map keys.

use serde::{Deserialize, Serialize};

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
        pub struct $name(u32);

        impl $name {
            /// The name prefix used in input files.
            pub const PREFIX: &'static str = $prefix;

            /// Creates an ID from a raw `u32` value.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` value.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Parses a `<prefix>_<id>` name.
            pub fn parse(name: &str) -> Option<Self> {
                crate::name::parse_indexed_name(name, $prefix).map(Self)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}_{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// ID of an instance, taken from its `inst_<id>` name.
    InstId,
    "inst"
);

define_id!(
    /// ID of a net, taken from its `net_<id>` name.
    NetId,
    "net"
);
