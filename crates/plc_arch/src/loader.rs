//! Loaders for the `.lib`, `.scl` and `.clk` architecture files.
//!
//! Every malformed line is reported and skipped so one run shows all
//! problems in a file. Callers decide success by checking the sink for
//! errors raised during the load.

use crate::clock_region::ClockRegion;
use crate::device::Device;
use crate::library::{LibCell, LibPin, Library, PinDir, PinProp};
use crate::types::TileType;
use plc_common::parse_tile_coord;
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use plc_source::{Record, SourceFile, Span};
use std::collections::{BTreeMap, BTreeSet};

fn malformed(sink: &DiagnosticSink, span: Span, message: impl Into<String>) {
    sink.emit(Diagnostic::error(DiagnosticCode::MALFORMED_LINE, message, span));
}

fn parse_int(record: &Record<'_>, index: usize, what: &str, sink: &DiagnosticSink) -> Option<i32> {
    let parsed = record.text(index).and_then(|t| t.parse::<i32>().ok());
    if parsed.is_none() {
        malformed(sink, record.span_of(index), format!("expected integer {what}"));
    }
    parsed
}

struct PendingPin {
    index: u32,
    pin: LibPin,
    span: Span,
}

struct PendingCell {
    name: String,
    span: Span,
    inputs: Vec<PendingPin>,
    outputs: Vec<PendingPin>,
}

impl PendingCell {
    fn add_pin(&mut self, record: &Record<'_>, sink: &DiagnosticSink) {
        if !(3..=4).contains(&record.len()) {
            malformed(
                sink,
                record.span,
                "expected `PIN <name> INPUT|OUTPUT [CTRL|CLOCK|RESET]`",
            );
            return;
        }
        let name = record.text(1).unwrap_or_default();
        let Some(index) = name
            .rsplit_once('_')
            .and_then(|(_, idx)| idx.parse::<u32>().ok())
        else {
            malformed(sink, record.span_of(1), format!("pin name `{name}` has no `_<index>` suffix"));
            return;
        };
        let dir = match record.text(2) {
            Some("INPUT") => PinDir::Input,
            Some("OUTPUT") => PinDir::Output,
            Some(other) => {
                malformed(sink, record.span_of(2), format!("invalid pin direction `{other}`"));
                return;
            }
            None => return,
        };
        let prop = match record.text(3) {
            None => PinProp::None,
            Some(keyword) => match PinProp::from_keyword(keyword) {
                Some(prop) => prop,
                None => {
                    malformed(sink, record.span_of(3), format!("invalid pin property `{keyword}`"));
                    return;
                }
            },
        };
        let pending = PendingPin {
            index,
            pin: LibPin {
                name: name.to_string(),
                prop,
            },
            span: record.span_of(1),
        };
        match dir {
            PinDir::Input => self.inputs.push(pending),
            PinDir::Output => self.outputs.push(pending),
        }
    }

    fn finish(self, sink: &DiagnosticSink) -> Option<LibCell> {
        let inputs = order_pins(&self.name, self.inputs, sink)?;
        let outputs = order_pins(&self.name, self.outputs, sink)?;
        Some(LibCell {
            name: self.name,
            inputs,
            outputs,
        })
    }
}

/// Places pins at their declared indices; the indices of one direction must be `0..n`.
fn order_pins(cell: &str, pins: Vec<PendingPin>, sink: &DiagnosticSink) -> Option<Vec<LibPin>> {
    let count = pins.len();
    let mut slots: Vec<Option<LibPin>> = vec![None; count];
    let mut ok = true;
    for pending in pins {
        let idx = pending.index as usize;
        if idx >= count {
            malformed(
                sink,
                pending.span,
                format!("pin index {idx} of cell {cell} exceeds its {count} pins"),
            );
            ok = false;
        } else if slots[idx].is_some() {
            sink.emit(Diagnostic::error(
                DiagnosticCode::DUPLICATE_DEFINITION,
                format!("pin index {idx} of cell {cell} is declared twice"),
                pending.span,
            ));
            ok = false;
        } else {
            slots[idx] = Some(pending.pin);
        }
    }
    if !ok {
        return None;
    }
    slots.into_iter().collect()
}

/// Loads the cell library.
pub fn load_library(file: &SourceFile, sink: &DiagnosticSink) -> Library {
    let mut library = Library::new();
    let mut first_seen: BTreeMap<String, u32> = BTreeMap::new();
    let mut current: Option<PendingCell> = None;

    for record in file.records() {
        match record.keyword() {
            "CELL" => {
                if let Some(open) = current.take() {
                    malformed(sink, open.span, format!("cell {} is missing END_CELL", open.name));
                }
                if record.len() != 2 {
                    malformed(sink, record.span, "expected `CELL <name>`");
                    continue;
                }
                current = Some(PendingCell {
                    name: record.text(1).unwrap_or_default().to_string(),
                    span: record.span_of(1),
                    inputs: Vec::new(),
                    outputs: Vec::new(),
                });
            }
            "PIN" => match current.as_mut() {
                Some(cell) => cell.add_pin(&record, sink),
                None => malformed(sink, record.span, "PIN line outside a CELL block"),
            },
            "END_CELL" => {
                let Some(pending) = current.take() else {
                    malformed(sink, record.span, "END_CELL without CELL");
                    continue;
                };
                let (name, span) = (pending.name.clone(), pending.span);
                let Some(cell) = pending.finish(sink) else {
                    continue;
                };
                if library.insert(cell) {
                    first_seen.insert(name, record.line);
                } else {
                    let first = first_seen.get(&name).copied().unwrap_or_default();
                    sink.emit(
                        Diagnostic::error(
                            DiagnosticCode::DUPLICATE_DEFINITION,
                            format!("library cell {name} is defined twice"),
                            span,
                        )
                        .with_label(format!("first defined in the block ending on line {first}")),
                    );
                }
            }
            other => sink.emit(Diagnostic::error(
                DiagnosticCode::UNKNOWN_KEYWORD,
                format!("unknown library keyword `{other}`"),
                record.span_of(0),
            )),
        }
    }
    if let Some(open) = current {
        malformed(sink, open.span, format!("cell {} is missing END_CELL", open.name));
    }
    library
}

/// Reads the `<KEYWORD> <cols> <rows>` header that opens `.scl` and `.clk` files.
fn read_header(
    record: Option<Record<'_>>,
    keyword: &str,
    file: &SourceFile,
    sink: &DiagnosticSink,
) -> Option<(i32, i32)> {
    let Some(record) = record else {
        malformed(sink, Span::new(file.id, 0, 0), format!("missing `{keyword} <cols> <rows>` header"));
        return None;
    };
    if record.keyword() != keyword || record.len() != 3 {
        malformed(sink, record.span, format!("expected `{keyword} <cols> <rows>` header"));
        return None;
    }
    let cols = parse_int(&record, 1, "column count", sink)?;
    let rows = parse_int(&record, 2, "row count", sink)?;
    if cols <= 0 || rows <= 0 {
        malformed(sink, record.span, "grid dimensions must be positive");
        return None;
    }
    Some((cols, rows))
}

/// Loads the site map, returning `None` when the header is unusable.
///
/// Tiles the file never mentions get the `UNDEFINED` type.
pub fn load_site_map(file: &SourceFile, sink: &DiagnosticSink) -> Option<Device> {
    let mut records = file.records();
    let (cols, rows) = read_header(records.next(), "SITEMAP", file, sink)?;
    let mut device = Device::new(cols, rows);

    for record in records {
        if record.keyword() == "END_SITEMAP" {
            break;
        }
        if record.len() != 2 {
            malformed(sink, record.span, "expected `X<col>Y<row> <tile type>`");
            continue;
        }
        let Some((col, row)) = parse_tile_coord(record.keyword()) else {
            malformed(sink, record.span_of(0), "expected `X<col>Y<row>`");
            continue;
        };
        let type_name = record.text(1).unwrap_or_default();
        let Some(tile_type) = TileType::from_name(type_name) else {
            malformed(sink, record.span_of(1), format!("invalid tile type `{type_name}`"));
            continue;
        };
        let Some(tile) = device.tile_mut(col, row) else {
            sink.emit(Diagnostic::error(
                DiagnosticCode::UNKNOWN_TILE,
                format!("tile X{col}Y{row} is outside the {cols}x{rows} site map"),
                record.span_of(0),
            ));
            continue;
        };
        if let Err(err) = tile.add_type(tile_type) {
            sink.emit(Diagnostic::error(
                DiagnosticCode::DUPLICATE_DEFINITION,
                err.to_string(),
                record.span_of(1),
            ));
        }
    }

    for tile in device.tiles_mut() {
        if tile.types().is_empty() {
            // A fresh tile cannot already carry UNDEFINED.
            let _ = tile.add_type(TileType::Undefined);
        }
    }
    Some(device)
}

/// Loads the clock-region grid into `device`.
pub fn load_clock_regions(device: &mut Device, file: &SourceFile, sink: &DiagnosticSink) {
    let mut records = file.records();
    let Some((cols, rows)) = read_header(records.next(), "CLOCKREGIONS", file, sink) else {
        return;
    };
    device.reset_clock_regions(cols, rows);
    let mut declared = BTreeSet::new();

    for record in records {
        if record.keyword() == "END_CLOCKREGIONS" {
            break;
        }
        if record.len() != 5 {
            malformed(sink, record.span, "expected `X<col>Y<row> <left> <right> <bottom> <top>`");
            continue;
        }
        let Some((col, row)) = parse_tile_coord(record.keyword()) else {
            malformed(sink, record.span_of(0), "expected `X<col>Y<row>`");
            continue;
        };
        let bounds: Option<Vec<i32>> = (1..5)
            .map(|i| parse_int(&record, i, "region bound", sink))
            .collect();
        let Some(bounds) = bounds else {
            continue;
        };
        let region = ClockRegion::new(bounds[0], bounds[1], bounds[2], bounds[3]);
        if !region.is_declared() {
            malformed(sink, record.span, format!("clock region {region} is empty"));
            continue;
        }
        let Some(slot) = device.clock_region_mut(col, row) else {
            sink.emit(Diagnostic::error(
                DiagnosticCode::UNKNOWN_TILE,
                format!("clock region X{col}Y{row} is outside the {cols}x{rows} region grid"),
                record.span_of(0),
            ));
            continue;
        };
        if !declared.insert((col, row)) {
            sink.emit(Diagnostic::error(
                DiagnosticCode::DUPLICATE_DEFINITION,
                format!("clock region X{col}Y{row} is declared twice"),
                record.span_of(0),
            ));
            continue;
        }
        *slot = region;
    }

    warn_on_region_coverage(device, file, sink);
}

/// Warns when some tile is covered by no clock region or by several.
fn warn_on_region_coverage(device: &Device, file: &SourceFile, sink: &DiagnosticSink) {
    let mut uncovered = 0usize;
    let mut overlapped = 0usize;
    for tile in device.tiles() {
        let covering = device
            .clock_regions()
            .iter()
            .filter(|region| region.contains(tile.col(), tile.row()))
            .count();
        match covering {
            0 => uncovered += 1,
            1 => {}
            _ => overlapped += 1,
        }
    }
    if uncovered + overlapped > 0 {
        sink.emit(
            Diagnostic::warning(
                DiagnosticCode::OUTSIDE_CLOCK_REGION,
                format!(
                    "{uncovered} tiles lie in no clock region and {overlapped} tiles in more than one"
                ),
                Span::new(file.id, 0, 0),
            )
            .with_note("instances on uncovered tiles fail the clock-region check"),
        );
    }
}
