//! Architecture summary report.

use crate::device::Device;
use crate::types::TileType;
use plc_common::Table;
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Prints the grid sizes and a histogram of tile types.
///
/// Tiles with several types count once per type. `UNDEFINED` tiles are left
/// out; rows are sorted by descending count, then by type name.
pub fn report_arch(device: &Device, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Number of columns: {}", device.num_col())?;
    writeln!(out, "Number of rows: {}", device.num_row())?;
    writeln!(
        out,
        "Number of clock regions: {} x {}",
        device.num_clock_col(),
        device.num_clock_row()
    )?;

    let mut counts: BTreeMap<TileType, usize> = BTreeMap::new();
    for tile in device.tiles() {
        for &tile_type in tile.types() {
            if tile_type != TileType::Undefined {
                *counts.entry(tile_type).or_default() += 1;
            }
        }
    }
    let mut counts: Vec<(TileType, usize)> = counts.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.name().cmp(b.0.name())));

    writeln!(out, "Tile Count by Type")?;
    let mut table = Table::new(["Type", "Count"]);
    for (tile_type, count) in counts {
        table.add_row([tile_type.name().to_string(), count.to_string()]);
    }
    table.write_to(out)
}
