//! Tile types, slot categories, and model-name unification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A type declared for a tile in the site map.
///
/// A tile may carry several types; `FIXED` and `UNDEFINED` allocate no slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TileType {
    /// Programmable logic block hosting LUT, SEQ, CARRY4, F7MUX, F8MUX and DRAM slots.
    Plb,
    /// DSP block.
    Dsp,
    /// Block RAM, flavour A.
    Rama,
    /// Block RAM, flavour B.
    Ramb,
    /// I/O tile, flavour A.
    Ioa,
    /// I/O tile, flavour B.
    Iob,
    /// Global clock buffers.
    Gclk,
    /// Interposer pins.
    Ippin,
    /// Hard logic that placement never targets.
    Fixed,
    /// A site that received no type in the site map.
    Undefined,
}

impl TileType {
    /// Every tile type, in declaration order.
    pub const ALL: [TileType; 10] = [
        TileType::Plb,
        TileType::Dsp,
        TileType::Rama,
        TileType::Ramb,
        TileType::Ioa,
        TileType::Iob,
        TileType::Gclk,
        TileType::Ippin,
        TileType::Fixed,
        TileType::Undefined,
    ];

    /// Returns the name used in site-map files.
    pub fn name(self) -> &'static str {
        match self {
            TileType::Plb => "PLB",
            TileType::Dsp => "DSP",
            TileType::Rama => "RAMA",
            TileType::Ramb => "RAMB",
            TileType::Ioa => "IOA",
            TileType::Iob => "IOB",
            TileType::Gclk => "GCLK",
            TileType::Ippin => "IPPIN",
            TileType::Fixed => "FIXED",
            TileType::Undefined => "UNDEFINED",
        }
    }

    /// Looks a type up by its site-map name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.name() == name)
    }

    /// Returns the slot arrays a tile of this type allocates.
    pub fn slot_kinds(self) -> &'static [SlotKind] {
        match self {
            TileType::Plb => &[
                SlotKind::Lut,
                SlotKind::Seq,
                SlotKind::Carry4,
                SlotKind::F7Mux,
                SlotKind::F8Mux,
                SlotKind::Dram,
            ],
            TileType::Dsp => &[SlotKind::Dsp],
            TileType::Rama => &[SlotKind::Rama],
            TileType::Ramb => &[SlotKind::Ramb],
            TileType::Ioa => &[SlotKind::Ioa],
            TileType::Iob => &[SlotKind::Iob],
            TileType::Gclk => &[SlotKind::Gclk],
            TileType::Ippin => &[SlotKind::Ippin],
            TileType::Fixed | TileType::Undefined => &[],
        }
    }
}

impl fmt::Display for TileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A slot category within a tile, i.e. a unified model type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SlotKind {
    /// Lookup tables (`LUT1`..`LUT6`, `LUT6X`).
    Lut,
    /// Flip-flops.
    Seq,
    /// Carry chains.
    Carry4,
    /// 7-input muxes.
    F7Mux,
    /// 8-input muxes.
    F8Mux,
    /// Distributed RAM.
    Dram,
    /// DSP blocks.
    Dsp,
    /// Block RAM A.
    Rama,
    /// Block RAM B.
    Ramb,
    /// I/O A.
    Ioa,
    /// I/O B.
    Iob,
    /// Global clock buffers.
    Gclk,
    /// Interposer pins.
    Ippin,
}

impl SlotKind {
    /// Returns the unified model name.
    pub fn name(self) -> &'static str {
        match self {
            SlotKind::Lut => "LUT",
            SlotKind::Seq => "SEQ",
            SlotKind::Carry4 => "CARRY4",
            SlotKind::F7Mux => "F7MUX",
            SlotKind::F8Mux => "F8MUX",
            SlotKind::Dram => "DRAM",
            SlotKind::Dsp => "DSP",
            SlotKind::Rama => "RAMA",
            SlotKind::Ramb => "RAMB",
            SlotKind::Ioa => "IOA",
            SlotKind::Iob => "IOB",
            SlotKind::Gclk => "GCLK",
            SlotKind::Ippin => "IPPIN",
        }
    }

    /// Number of slots of this kind in one tile.
    pub fn capacity(self) -> usize {
        match self {
            SlotKind::Lut => 8,
            SlotKind::Seq => 16,
            SlotKind::Carry4 => 2,
            SlotKind::F7Mux => 4,
            SlotKind::F8Mux => 2,
            SlotKind::Dram => 2,
            SlotKind::Dsp | SlotKind::Rama | SlotKind::Ramb => 1,
            SlotKind::Ioa | SlotKind::Iob => 2,
            SlotKind::Gclk => 28,
            SlotKind::Ippin => 256,
        }
    }

    /// The tile type whose presence lets a tile host this kind.
    pub fn host(self) -> TileType {
        match self {
            SlotKind::Lut
            | SlotKind::Seq
            | SlotKind::Carry4
            | SlotKind::F7Mux
            | SlotKind::F8Mux
            | SlotKind::Dram => TileType::Plb,
            SlotKind::Dsp => TileType::Dsp,
            SlotKind::Rama => TileType::Rama,
            SlotKind::Ramb => TileType::Ramb,
            SlotKind::Ioa => TileType::Ioa,
            SlotKind::Iob => TileType::Iob,
            SlotKind::Gclk => TileType::Gclk,
            SlotKind::Ippin => TileType::Ippin,
        }
    }

    /// Canonicalizes a raw model name.
    ///
    /// `LUT1`..`LUT6` and `LUT6X` become [`SlotKind::Lut`]; every other
    /// placeable model maps to the kind of the same name.
    pub fn from_model(model: &str) -> Option<Self> {
        let kind = match model {
            "LUT1" | "LUT2" | "LUT3" | "LUT4" | "LUT5" | "LUT6" | "LUT6X" => SlotKind::Lut,
            "SEQ" => SlotKind::Seq,
            "CARRY4" => SlotKind::Carry4,
            "F7MUX" => SlotKind::F7Mux,
            "F8MUX" => SlotKind::F8Mux,
            "DRAM" => SlotKind::Dram,
            "DSP" => SlotKind::Dsp,
            "RAMA" => SlotKind::Rama,
            "RAMB" => SlotKind::Ramb,
            "IOA" => SlotKind::Ioa,
            "IOB" => SlotKind::Iob,
            "GCLK" => SlotKind::Gclk,
            "IPPIN" => SlotKind::Ippin,
            _ => return None,
        };
        Some(kind)
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
