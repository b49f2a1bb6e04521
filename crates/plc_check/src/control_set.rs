//! Per-bank control-set limits of PLB tiles.

use crate::error::CheckError;
use crate::tile_query::{control_set, ControlSet, BANKS};
use plc_arch::Device;
use plc_common::{NetId, Placement, Table};
use plc_config::LimitsConfig;
use plc_design::Design;
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use plc_source::Span;
use std::collections::BTreeSet;
use std::io::Write;

/// Largest per-tile count shown in the histogram.
const HISTOGRAM_MAX: usize = 4;

fn net_list(nets: &BTreeSet<NetId>) -> String {
    nets.iter().map(NetId::to_string).collect::<Vec<_>>().join(" ")
}

/// Checks the control sets of every PLB bank under `placement`.
///
/// Prints the number of checked tiles and a histogram of distinct clock,
/// reset and CE nets per tile, then returns the number of bank violations.
pub fn check_control_set(
    device: &Device,
    design: &Design,
    placement: Placement,
    limits: &LimitsConfig,
    out: &mut dyn Write,
    sink: &DiagnosticSink,
) -> Result<usize, CheckError> {
    let mut violations = 0;
    let mut checked = 0;
    // Rows: clock, reset, CE.
    let mut histogram = [[0usize; HISTOGRAM_MAX + 1]; 3];

    for tile in device.tiles().iter().filter(|tile| tile.is_plb()) {
        checked += 1;
        let mut merged = ControlSet::default();
        for bank in 0..BANKS.len() {
            let set = control_set(tile, design, placement, bank);
            let limited = [
                (&set.clock, limits.max_clock_per_bank, DiagnosticCode::BANK_CLOCK_EXCESS, "clock"),
                (&set.reset, limits.max_reset_per_bank, DiagnosticCode::BANK_RESET_EXCESS, "reset"),
                (&set.ce, limits.max_ce_per_bank, DiagnosticCode::BANK_CE_EXCESS, "CE"),
            ];
            for (nets, limit, code, what) in limited {
                if nets.len() <= limit {
                    continue;
                }
                violations += 1;
                sink.emit(
                    Diagnostic::error(code, format!("multiple {what} nets in bank {bank} of tile {tile}"), Span::DUMMY)
                        .with_note(format!("in the {placement} placement"))
                        .with_note(format!("{} nets, limit {limit}: {}", nets.len(), net_list(nets))),
                );
            }
            merged.extend(&set);
        }
        for (row, nets) in [&merged.clock, &merged.reset, &merged.ce].into_iter().enumerate() {
            if let Some(cell) = histogram[row].get_mut(nets.len()) {
                *cell += 1;
            }
        }
    }

    writeln!(out, "Checked control set on {checked} tiles.")?;
    writeln!(out, "Control set statistics (tile count vs. number of control nets):")?;
    let mut table = Table::new(std::iter::once(String::new()).chain((0..=HISTOGRAM_MAX).map(|n| n.to_string())));
    for (label, counts) in ["Clock", "Reset", "CE"].into_iter().zip(histogram) {
        table.add_row(std::iter::once(label.to_string()).chain(counts.iter().map(usize::to_string)));
    }
    table.write_to(out)?;
    Ok(violations)
}
