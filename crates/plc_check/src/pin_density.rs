//! Inter-tile pin density of PLB tiles.

use crate::error::CheckError;
use crate::project::project;
use crate::tile_query::{connected_input_nets, connected_output_nets};
use plc_arch::Device;
use plc_common::{Placement, Table};
use plc_config::{LimitsConfig, ReportConfig};
use plc_design::Design;
use std::cmp::Reverse;
use std::io::Write;

/// Pin usage of one non-empty PLB tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileDensity {
    /// Tile column.
    pub col: i32,
    /// Tile row.
    pub row: i32,
    /// Distinct nets entering the tile.
    pub inputs: usize,
    /// Distinct nets leaving the tile.
    pub outputs: usize,
    /// `(inputs + outputs)` over the tile's pin budget.
    pub ratio: f64,
}

/// Densities of every non-empty PLB tile under `placement`, densest first.
///
/// Tiles of equal density keep column-major order. Slots must already be
/// projected for `placement`.
pub fn pin_density(device: &Device, design: &Design, placement: Placement, limits: &LimitsConfig) -> Vec<TileDensity> {
    let budget = (limits.max_tile_pin_inputs + limits.max_tile_pin_outputs).max(1) as f64;
    let mut densities: Vec<TileDensity> = device
        .tiles()
        .iter()
        .filter(|tile| tile.is_plb() && !tile.is_empty(placement))
        .map(|tile| {
            let inputs = connected_input_nets(tile, design, placement).len();
            let outputs = connected_output_nets(tile, design, placement).len();
            TileDensity {
                col: tile.col(),
                row: tile.row(),
                inputs,
                outputs,
                ratio: (inputs + outputs) as f64 / budget,
            }
        })
        .collect();
    densities.sort_by_key(|d| Reverse(d.inputs + d.outputs));
    densities
}

/// Number of tiles in the top `fraction` of `count`, rounded down.
fn top_count(count: usize, fraction: f64) -> usize {
    (count as f64 * fraction + 1e-9).floor() as usize
}

/// Projects each placement and prints its densest tiles and their average.
pub fn report_pin_density(
    device: &mut Device,
    design: &Design,
    limits: &LimitsConfig,
    report: &ReportConfig,
    out: &mut dyn Write,
) -> Result<(), CheckError> {
    let percent = (report.pin_density_top_fraction * 10_000.0).round() / 100.0;
    for placement in Placement::ALL {
        project(device, design, placement);
        let densities = pin_density(device, design, placement, limits);
        let top = &densities[..top_count(densities.len(), report.pin_density_top_fraction)];

        writeln!(out, "  {}:", placement.title())?;
        writeln!(
            out,
            "    Checked pin density on {} tiles; top {percent}% count = {} tiles.",
            densities.len(),
            top.len()
        )?;
        writeln!(out, "    List of Top-{} Congested Tiles", report.pin_density_rows)?;
        let mut table = Table::new(["Location", "Input", "Output", "Pin Density %"]);
        for d in top.iter().take(report.pin_density_rows) {
            table.add_row([
                format!("X{}Y{}", d.col, d.row),
                format!("{}/{}", d.inputs, limits.max_tile_pin_inputs),
                format!("{}/{}", d.outputs, limits.max_tile_pin_outputs),
                format!("{:.2}%", d.ratio * 100.0),
            ]);
        }
        table.write_to(out)?;

        let average = if top.is_empty() {
            0.0
        } else {
            top.iter().map(|d| d.ratio * 100.0).sum::<f64>() / top.len() as f64
        };
        writeln!(
            out,
            "    {} top {percent}% congested tiles ({} tiles) avg. pin density: {average:.2}%",
            placement.title(),
            top.len()
        )?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{capture, Fixture};

    #[test]
    fn densest_first_with_column_major_ties() {
        let mut fx = Fixture::plb_grid(3, 1);
        let a = fx.place(1, "LUT2", (0, 0, 0));
        let b = fx.place(2, "LUT2", (1, 0, 0));
        let c = fx.place(3, "LUT2", (2, 0, 0));
        fx.connect(10, Some(a), &[(b, 0), (c, 0)], false);
        fx.connect(11, Some(c), &[(b, 1)], false);
        project(&mut fx.device, &fx.design, Placement::Baseline);

        let densities = pin_density(&fx.device, &fx.design, Placement::Baseline, &fx.limits);
        let order: Vec<_> = densities.iter().map(|d| (d.col, d.inputs, d.outputs)).collect();
        assert_eq!(order, vec![(1, 2, 0), (2, 1, 1), (0, 0, 1)]);
        assert!((densities[0].ratio - 2.0 / 144.0).abs() < 1e-12);
    }

    #[test]
    fn empty_and_non_plb_tiles_are_skipped() {
        let mut fx = Fixture::plb_grid(2, 1);
        fx.place(1, "LUT1", (1, 0, 0));
        project(&mut fx.device, &fx.design, Placement::Baseline);
        let densities = pin_density(&fx.device, &fx.design, Placement::Baseline, &fx.limits);
        assert_eq!(densities.len(), 1);
        assert_eq!((densities[0].col, densities[0].inputs, densities[0].outputs), (1, 0, 0));
    }

    #[test]
    fn small_designs_have_no_top_set() {
        let mut fx = Fixture::plb_grid(1, 1);
        let text = capture(|out| {
            report_pin_density(&mut fx.device, &fx.design, &fx.limits, &ReportConfig::default(), out).unwrap()
        });
        assert!(text.contains("    Checked pin density on 0 tiles; top 5% count = 0 tiles.\n"));
        assert!(text.contains("    Optimized top 5% congested tiles (0 tiles) avg. pin density: 0.00%\n"));
    }

    #[test]
    fn twenty_tiles_give_one_top_tile() {
        let mut fx = Fixture::plb_grid(20, 1);
        let luts: Vec<_> = (0..20).map(|col| fx.place(col as u32, "LUT1", (col, 0, 0))).collect();
        fx.connect(100, Some(luts[0]), &[(luts[5], 0), (luts[6], 0)], false);
        let text = capture(|out| {
            report_pin_density(&mut fx.device, &fx.design, &fx.limits, &ReportConfig::default(), out).unwrap()
        });
        assert!(text.contains("Checked pin density on 20 tiles; top 5% count = 1 tiles."));
        assert!(text.contains("| X0Y0     | 0/112 | 1/32   | 0.69%         |"));
        assert!(text.contains("Baseline top 5% congested tiles (1 tiles) avg. pin density: 0.69%"));
        assert_eq!(top_count(39, 0.05), 1);
        assert_eq!(top_count(40, 0.05), 2);
    }
}
