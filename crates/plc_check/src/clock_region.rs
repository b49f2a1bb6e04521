//! Clock-net budget of each clock region.

use crate::error::CheckError;
use plc_arch::{Device, PinProp};
use plc_common::{InternalError, Placement};
use plc_config::LimitsConfig;
use plc_design::Design;
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use plc_source::Span;
use std::io::Write;

/// Rebuilds the clock-net sets of every region under `placement`, prints the
/// region grid from the top row down, and returns the number of errors.
///
/// Unplaced instances are skipped here; projection reports them.
pub fn check_clock_region(
    device: &mut Device,
    design: &Design,
    placement: Placement,
    limits: &LimitsConfig,
    out: &mut dyn Write,
    sink: &DiagnosticSink,
) -> Result<usize, CheckError> {
    let mut errors = 0;
    device.clear_clock_nets();

    for inst in design.instances() {
        let location = inst.location_for(placement);
        if !location.is_placed() {
            continue;
        }
        let Some((region_col, region_row)) = device.clock_region_of(location.col, location.row) else {
            errors += 1;
            sink.emit(
                Diagnostic::error(
                    DiagnosticCode::OUTSIDE_CLOCK_REGION,
                    format!("instance {} is not in any clock region", inst.id),
                    Span::DUMMY,
                )
                .with_note(format!("placed at {location} in the {placement} placement")),
            );
            continue;
        };
        let Some(region) = device.clock_region_mut(region_col, region_row) else {
            continue;
        };
        let clock_nets = inst
            .all_pins()
            .filter(|pin| pin.prop == PinProp::Clock)
            .filter_map(|pin| pin.net)
            .filter(|&net| design.net(net).is_some_and(|net| net.clock));
        region.clock_nets.extend(clock_nets);
    }

    let mut overflowing = 0;
    for row in (0..device.num_clock_row()).rev() {
        write!(out, "| ")?;
        for col in 0..device.num_clock_col() {
            let count = device.clock_region(col, row).map_or(0, |region| region.clock_nets.len());
            if count > limits.max_region_clock_nets {
                overflowing += 1;
            }
            write!(out, "{count:<2}| ")?;
        }
        writeln!(out)?;
    }

    if overflowing > 0 {
        errors += 1;
        sink.emit(
            Diagnostic::error(
                DiagnosticCode::REGION_OVERFLOW,
                format!(
                    "{overflowing} clock regions have more than {} clock nets",
                    limits.max_region_clock_nets
                ),
                Span::DUMMY,
            )
            .with_note(format!("in the {placement} placement")),
        );
    } else {
        writeln!(out, "All clock regions passed legal check.")?;
    }
    Ok(errors)
}

/// Runs the clock-region check for both placements and lists the clock nets
/// of the region at grid position `(col, row)` after each run.
///
/// Returns `Ok(false)` if there is no such region. Check violations are
/// emitted but do not fail the report.
pub fn report_clock_region(
    device: &mut Device,
    design: &Design,
    limits: &LimitsConfig,
    col: i32,
    row: i32,
    out: &mut dyn Write,
    sink: &DiagnosticSink,
) -> Result<bool, CheckError> {
    if device.clock_region(col, row).is_none() {
        sink.emit(
            Diagnostic::error(
                DiagnosticCode::UNKNOWN_TILE,
                format!("invalid clock region coordinate: {col} {row}"),
                Span::DUMMY,
            )
            .with_note(format!(
                "the clock-region grid is {} x {}",
                device.num_clock_col(),
                device.num_clock_row()
            )),
        );
        return Ok(false);
    }
    for (i, placement) in Placement::ALL.into_iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "  {}:", placement.title())?;
        check_clock_region(device, design, placement, limits, out, sink)?;
        let region = device
            .clock_region(col, row)
            .ok_or_else(|| InternalError::new(format!("clock region {col} {row} vanished")))?;
        writeln!(out, "Clock region {region} has {} clock nets.", region.clock_nets.len())?;
        for net in &region.clock_nets {
            writeln!(out, "    {net}")?;
        }
    }
    Ok(true)
}
