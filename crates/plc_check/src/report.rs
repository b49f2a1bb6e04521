//! Tile and net detail reports.

use crate::error::CheckError;
use crate::project::project;
use crate::tile_query::{connected_input_nets, connected_output_nets, control_set, BANKS};
use crate::wirelength::{critical_wirelength, non_critical_wirelength, rsmt_points};
use plc_arch::{Device, Tile};
use plc_common::{InternalError, NetId, Placement, Table};
use plc_design::Design;
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use plc_flute::Flute;
use plc_source::Span;
use std::collections::BTreeSet;
use std::io::{self, Write};

fn write_nets(out: &mut dyn Write, title: &str, indent: usize, nets: &BTreeSet<NetId>) -> io::Result<()> {
    writeln!(out, "{:indent$}{title}", "")?;
    for net in nets {
        writeln!(out, "{:width$}{net}", "", width = indent + 2)?;
    }
    Ok(())
}

fn write_tile_placement(tile: &Tile, design: &Design, placement: Placement, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "  {}:", placement.title())?;
    let mut table = Table::new(["Slot", "Occupied", "Total"]);
    for (kind, slots) in tile.slot_arrays() {
        let occupied = slots.iter().filter(|slot| slot.is_occupied(placement)).count();
        table.add_row([kind.to_string(), occupied.to_string(), slots.len().to_string()]);
    }
    table.write_to(out)?;

    for (kind, slots) in tile.slot_arrays() {
        for (index, slot) in slots.iter().enumerate() {
            if !slot.is_occupied(placement) {
                continue;
            }
            writeln!(out, "  {kind} #{index}")?;
            for &id in slot.instances(placement) {
                let model = design.instance(id).map_or("?", |inst| inst.model.as_str());
                writeln!(out, "    {id} {model}")?;
            }
        }
    }

    if !tile.is_plb() {
        return Ok(());
    }
    writeln!(out, "  Detailed pin utilization:")?;
    write_nets(out, "Input nets:", 4, &connected_input_nets(tile, design, placement))?;
    write_nets(out, "Output nets:", 4, &connected_output_nets(tile, design, placement))?;
    writeln!(out, "  Detailed control set:")?;
    for bank in 0..BANKS.len() {
        let set = control_set(tile, design, placement, bank);
        writeln!(out, "    Bank {bank}")?;
        for (title, nets) in [("Clock nets:", &set.clock), ("Reset nets:", &set.reset), ("CE nets:", &set.ce)] {
            if !nets.is_empty() {
                write_nets(out, title, 6, nets)?;
            }
        }
    }
    Ok(())
}

/// Prints the types, slot occupancy, pin usage and control sets of the tile
/// at `(col, row)` for both placements.
///
/// Returns `Ok(false)` if there is no such tile.
pub fn report_tile(
    device: &mut Device,
    design: &Design,
    col: i32,
    row: i32,
    out: &mut dyn Write,
    sink: &DiagnosticSink,
) -> Result<bool, CheckError> {
    if device.tile(col, row).is_none() {
        sink.emit(
            Diagnostic::error(
                DiagnosticCode::UNKNOWN_TILE,
                format!("invalid tile coordinate: {col} {row}"),
                Span::DUMMY,
            )
            .with_note(format!("the device is {} x {}", device.num_col(), device.num_row())),
        );
        return Ok(false);
    }
    for placement in Placement::ALL {
        project(device, design, placement);
    }
    let Some(tile) = device.tile(col, row) else {
        return Err(InternalError::new(format!("tile X{col}Y{row} vanished during projection")).into());
    };
    let types: Vec<_> = tile.types().iter().map(|t| t.name()).collect();
    writeln!(out, "  Tile {tile} type: {}", types.join(" "))?;
    for placement in Placement::ALL {
        write_tile_placement(tile, design, placement, out)?;
    }
    Ok(true)
}

/// Prints the flags, pin counts, wirelength and Steiner tree of the net named
/// `name` (`net_<id>`) for both placements.
///
/// Returns `Ok(false)` if the net does not exist.
pub fn report_net(
    design: &Design,
    name: &str,
    flute: &mut Flute,
    out: &mut dyn Write,
    sink: &DiagnosticSink,
) -> Result<bool, CheckError> {
    let Some(net) = NetId::parse(name).and_then(|id| design.net(id)) else {
        sink.emit(Diagnostic::error(
            DiagnosticCode::UNKNOWN_NET,
            format!("net `{name}` not found"),
            Span::DUMMY,
        ));
        return Ok(false);
    };

    let mut flags = Vec::new();
    if net.clock {
        flags.push("clock");
    }
    if net.intra_tile {
        flags.push("intra_tile");
    }
    writeln!(out, "  {} {}", net.id, flags.join("| "))?;
    match net.driver {
        Some(driver) => writeln!(out, "    Driver: {driver}")?,
        None => writeln!(out, "    Driver: none")?,
    }
    writeln!(out, "    Number of fanout pins: {}", net.fanouts.len())?;

    let critical_pins = net
        .fanouts
        .iter()
        .filter(|&&pin| design.pin(pin).is_some_and(|pin| pin.timing_critical))
        .count();
    for placement in Placement::ALL {
        writeln!(out)?;
        writeln!(out, "  {}:", placement.title())?;
        writeln!(out, "    Number of critical fanout pins: {critical_pins}")?;
        writeln!(
            out,
            "    Critical wirelength = {}",
            critical_wirelength(design, net, placement)
        )?;
        writeln!(
            out,
            "    Number of non-critical fanout pins: {}",
            net.fanouts.len() - critical_pins
        )?;
        let non_critical = non_critical_wirelength(design, net, placement, flute)?;
        writeln!(out, "    Non-critical wirelength = {non_critical}")?;
        if non_critical > 0 {
            let points = rsmt_points(design, net, placement);
            writeln!(
                out,
                "    Net Rectilinear Steiner Minimum Tree with {} merged locations.",
                points.len()
            )?;
            flute.tree(&points)?.print(out)?;
        }
    }
    Ok(true)
}
