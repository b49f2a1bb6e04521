//! Loaders for the node, net, timing and output files.
//!
//! Like the architecture loaders, these report each bad line and carry on,
//! leaving the verdict to the caller's sink checkpoint.

use crate::design::Design;
use crate::instance::Instance;
use crate::net::Net;
use crate::pin::{parse_pin_name, PinRef};
use plc_arch::{Library, PinDir};
use plc_common::{InstId, Location, NetId, Placement, Table};
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use plc_source::{Record, SourceFile, Span};
use std::collections::BTreeSet;
use std::io::{self, Write};

fn malformed(sink: &DiagnosticSink, span: Span, message: impl Into<String>) {
    sink.emit(Diagnostic::error(DiagnosticCode::MALFORMED_LINE, message, span));
}

/// A parsed `X..Y..Z.. <model> inst_<id> [FIXED]` line.
struct PlacementLine<'a> {
    location: Location,
    model: &'a str,
    id: InstId,
    fixed: bool,
}

fn parse_placement_line<'a>(record: &Record<'a>, sink: &DiagnosticSink) -> Option<PlacementLine<'a>> {
    if !(3..=4).contains(&record.len()) {
        malformed(sink, record.span, "expected `X<col>Y<row>Z<z> <model> inst_<id> [FIXED]`");
        return None;
    }
    let fixed = match record.text(3) {
        None => false,
        Some("FIXED") => true,
        Some(other) => {
            malformed(sink, record.span_of(3), format!("expected `FIXED`, found `{other}`"));
            return None;
        }
    };
    let Some(location) = Location::parse(record.keyword()) else {
        malformed(sink, record.span_of(0), format!("invalid location `{}`", record.keyword()));
        return None;
    };
    let name = record.text(2).unwrap_or_default();
    let Some(id) = InstId::parse(name) else {
        malformed(sink, record.span_of(2), format!("invalid instance name `{name}`"));
        return None;
    };
    Some(PlacementLine {
        location,
        model: record.text(1).unwrap_or_default(),
        id,
        fixed,
    })
}

/// Loads the node file: creates every instance at its baseline location.
pub fn load_nodes(design: &mut Design, library: &Library, file: &SourceFile, sink: &DiagnosticSink) {
    for record in file.records() {
        let Some(line) = parse_placement_line(&record, sink) else {
            continue;
        };
        let Some(cell) = library.get(line.model) else {
            sink.emit(Diagnostic::error(
                DiagnosticCode::UNKNOWN_CELL,
                format!("library cell {} not found", line.model),
                record.span_of(1),
            ));
            continue;
        };
        let inst = Instance::new(line.id, cell, line.fixed, line.location);
        if !design.insert_instance(inst) {
            sink.emit(Diagnostic::error(
                DiagnosticCode::DUPLICATE_DEFINITION,
                format!("instance {} is defined twice", line.id),
                record.span_of(2),
            ));
        }
    }
}

/// Resolves an `inst_<id> I_<n>|O_<n>` pair of tokens against the design.
fn resolve_pin(design: &Design, record: &Record<'_>, sink: &DiagnosticSink) -> Option<PinRef> {
    if record.len() != 2 {
        malformed(sink, record.span, "expected `inst_<id> I_<n>|O_<n>`");
        return None;
    }
    let inst_name = record.keyword();
    let Some(id) = InstId::parse(inst_name) else {
        malformed(sink, record.span_of(0), format!("invalid instance name `{inst_name}`"));
        return None;
    };
    let Some(inst) = design.instance(id) else {
        sink.emit(Diagnostic::error(
            DiagnosticCode::UNKNOWN_INSTANCE,
            format!("instance {id} is not in the design"),
            record.span_of(0),
        ));
        return None;
    };
    let pin_name = record.text(1).unwrap_or_default();
    let Some((dir, index)) = parse_pin_name(pin_name) else {
        malformed(sink, record.span_of(1), format!("invalid pin name `{pin_name}`"));
        return None;
    };
    if index >= inst.pins(dir).len() {
        sink.emit(
            Diagnostic::error(
                DiagnosticCode::UNKNOWN_PIN,
                format!("instance {id} has no pin {pin_name}"),
                record.span_of(1),
            )
            .with_note(format!(
                "model {} has {} {} pins",
                inst.model,
                inst.pins(dir).len(),
                match dir {
                    PinDir::Input => "input",
                    PinDir::Output => "output",
                }
            )),
        );
        return None;
    }
    Some(PinRef::new(id, dir, index))
}

/// A `net` block collected up to its `endnet`.
struct NetBlock<'a> {
    header: Record<'a>,
    body: Vec<Record<'a>>,
}

/// Loads the net file and connects pins.
///
/// A block with any bad line is dropped as a whole, so a net in the design is
/// always fully connected. The intra-tile flag is computed from baseline
/// locations.
pub fn load_nets(design: &mut Design, file: &SourceFile, sink: &DiagnosticSink) {
    let mut open: Option<NetBlock<'_>> = None;
    for record in file.records() {
        match record.keyword() {
            "net" => {
                if let Some(block) = open.take() {
                    malformed(sink, block.header.span, "net block is missing `endnet`");
                }
                open = Some(NetBlock {
                    header: record,
                    body: Vec::new(),
                });
            }
            "endnet" => match open.take() {
                Some(block) => add_net(design, block, sink),
                None => malformed(sink, record.span, "`endnet` without `net`"),
            },
            _ => match open.as_mut() {
                Some(block) => block.body.push(record),
                None => malformed(sink, record.span, "connection outside a net block"),
            },
        }
    }
    if let Some(block) = open {
        malformed(sink, block.header.span, "net block is missing `endnet`");
    }
}

fn add_net(design: &mut Design, block: NetBlock<'_>, sink: &DiagnosticSink) {
    let header = &block.header;
    if !(3..=4).contains(&header.len()) {
        malformed(sink, header.span, "expected `net net_<id> <numPins> [clock]`");
        return;
    }
    let name = header.text(1).unwrap_or_default();
    let Some(id) = NetId::parse(name) else {
        malformed(sink, header.span_of(1), format!("invalid net name `{name}`"));
        return;
    };
    let Some(num_pins) = header.text(2).and_then(|t| t.parse::<usize>().ok()) else {
        malformed(sink, header.span_of(2), "expected pin count");
        return;
    };
    let clock = match header.text(3) {
        None => false,
        Some("clock") => true,
        Some(other) => {
            malformed(sink, header.span_of(3), format!("expected `clock`, found `{other}`"));
            return;
        }
    };
    if design.net(id).is_some() {
        sink.emit(Diagnostic::error(
            DiagnosticCode::DUPLICATE_DEFINITION,
            format!("net {id} is defined twice"),
            header.span_of(1),
        ));
        return;
    }
    if block.body.len() != num_pins {
        sink.emit(
            Diagnostic::error(
                DiagnosticCode::PIN_COUNT_MISMATCH,
                format!("wrong number of connections of net {id}"),
                header.span_of(2),
            )
            .with_label(format!("declares {num_pins}, block lists {}", block.body.len())),
        );
        return;
    }

    let mut net = Net::new(id, clock);
    let mut seen = BTreeSet::new();
    let mut ok = true;
    for record in &block.body {
        let Some(pin) = resolve_pin(design, record, sink) else {
            ok = false;
            continue;
        };
        let taken = design.pin(pin).and_then(|p| p.net);
        if let Some(other) = taken {
            sink.emit(Diagnostic::error(
                DiagnosticCode::PIN_ALREADY_CONNECTED,
                format!("pin {pin} is already connected to {other}"),
                record.span,
            ));
            ok = false;
            continue;
        }
        if !seen.insert(pin) {
            sink.emit(Diagnostic::error(
                DiagnosticCode::PIN_ALREADY_CONNECTED,
                format!("pin {pin} is listed twice in net {id}"),
                record.span,
            ));
            ok = false;
            continue;
        }
        match pin.dir {
            PinDir::Output => {
                if let Some(first) = net.driver {
                    sink.emit(
                        Diagnostic::error(
                            DiagnosticCode::MULTIPLE_DRIVERS,
                            format!("multiple drivers for net {id}"),
                            record.span,
                        )
                        .with_note(format!("first driver is {first}")),
                    );
                    ok = false;
                } else {
                    net.driver = Some(pin);
                }
            }
            PinDir::Input => net.fanouts.push(pin),
        }
    }
    if !ok {
        return;
    }

    for pin in net.pins() {
        if let Some(p) = design.pin_mut(pin) {
            p.net = Some(id);
        }
    }
    net.intra_tile = design.is_intra_tile(&net, Placement::Baseline);
    design.insert_net(net);
}

/// Loads the timing file, marking each listed pin critical.
pub fn load_timing(design: &mut Design, file: &SourceFile, sink: &DiagnosticSink) {
    for record in file.records() {
        let Some(pin) = resolve_pin(design, &record, sink) else {
            continue;
        };
        if let Some(p) = design.pin_mut(pin) {
            p.timing_critical = true;
        }
    }
}

/// Instance counts gathered after an output file is read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputStats {
    /// All instances in the design.
    pub total: usize,
    /// Placed fixed instances.
    pub fixed: usize,
    /// Placed movable instances.
    pub movable: usize,
    /// Fixed instances whose location changed.
    pub moved_fixed: usize,
    /// Movable instances whose location changed.
    pub moved_movable: usize,
}

impl OutputStats {
    /// Writes the `Instance Statistics` table.
    pub fn write_to(&self, out: &mut dyn Write) -> io::Result<()> {
        fn percent(part: usize, whole: usize) -> String {
            if whole == 0 {
                return "0.0".to_string();
            }
            format!("{:.1}", part as f64 * 100.0 / whole as f64)
        }
        writeln!(out, "Instance Statistics:")?;
        let mut table = Table::new(["Category", "Count", "Re-placed", "%Re-placed"]);
        table.add_row(["Total".to_string(), self.total.to_string(), "-".into(), "-".into()]);
        table.add_row([
            "Fixed".to_string(),
            self.fixed.to_string(),
            self.moved_fixed.to_string(),
            percent(self.moved_fixed, self.fixed),
        ]);
        table.add_row([
            "Movable".to_string(),
            self.movable.to_string(),
            self.moved_movable.to_string(),
            percent(self.moved_movable, self.movable),
        ]);
        table.write_to(out)
    }
}

/// Loads the output file, setting every listed instance's optimized location.
///
/// Locations of earlier output files are discarded first. Afterwards every
/// unplaced instance and every moved fixed instance is reported.
pub fn load_output(design: &mut Design, file: &SourceFile, sink: &DiagnosticSink) -> OutputStats {
    for inst in design.instances_mut() {
        inst.location = Location::UNPLACED;
    }

    for record in file.records() {
        let Some(line) = parse_placement_line(&record, sink) else {
            continue;
        };
        let Some(inst) = design.instance_mut(line.id) else {
            sink.emit(Diagnostic::error(
                DiagnosticCode::UNKNOWN_INSTANCE,
                format!("instance {} can not be indexed", line.id),
                record.span_of(2),
            ));
            continue;
        };
        if inst.model != line.model {
            sink.emit(
                Diagnostic::warning(
                    DiagnosticCode::MODEL_CHANGED,
                    format!("instance {} is listed as {}", line.id, line.model),
                    record.span_of(1),
                )
                .with_note(format!("the node file declares it as {}", inst.model)),
            );
        }
        inst.location = line.location;
    }

    let mut stats = OutputStats {
        total: design.num_instances(),
        ..OutputStats::default()
    };
    let unplaced_span = Span::new(file.id, 0, 0);
    for inst in design.instances() {
        if !inst.is_placed() {
            sink.emit(Diagnostic::error(
                DiagnosticCode::UNPLACED_INSTANCE,
                format!("instance {} is un-placed", inst.id),
                unplaced_span,
            ));
            continue;
        }
        if inst.fixed {
            stats.fixed += 1;
            if inst.is_moved() {
                stats.moved_fixed += 1;
                sink.emit(
                    Diagnostic::error(
                        DiagnosticCode::MOVED_FIXED_INSTANCE,
                        format!("fixed instance {} is moved", inst.id),
                        unplaced_span,
                    )
                    .with_note(format!(
                        "baseline {}, optimized {}",
                        inst.base_location, inst.location
                    )),
                );
            }
        } else {
            stats.movable += 1;
            if inst.is_moved() {
                stats.moved_movable += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use plc_arch::load_library;
    use plc_source::SourceDb;

    const LIB: &str = "\
CELL LUT2
  PIN I_0 INPUT
  PIN I_1 INPUT
  PIN O_0 OUTPUT
END_CELL
CELL SEQ
  PIN I_0 INPUT
  PIN I_1 INPUT CLOCK
  PIN O_0 OUTPUT
END_CELL
";

    const NODES: &str = "\
X1Y1Z0 LUT2 inst_0
X1Y1Z1 LUT2 inst_1
X2Y1Z0 SEQ inst_2 FIXED
";

    struct Fixture {
        db: SourceDb,
        library: Library,
        design: Design,
        sink: DiagnosticSink,
    }

    impl Fixture {
        fn new() -> Self {
            let mut db = SourceDb::new();
            let lib = db.add_source("design.lib", LIB.to_string());
            let nodes = db.add_source("design.nodes", NODES.to_string());
            let sink = DiagnosticSink::new();
            let library = load_library(db.get_file(lib), &sink);
            let mut design = Design::new();
            load_nodes(&mut design, &library, db.get_file(nodes), &sink);
            assert!(!sink.has_errors());
            Self {
                db,
                library,
                design,
                sink,
            }
        }

        fn nets(&mut self, text: &str) {
            let id = self.db.add_source("design.nets", text.to_string());
            load_nets(&mut self.design, self.db.get_file(id), &self.sink);
        }

        fn output(&mut self, text: &str) -> OutputStats {
            let id = self.db.add_source("design.out", text.to_string());
            load_output(&mut self.design, self.db.get_file(id), &self.sink)
        }
    }

    fn codes(sink: &DiagnosticSink) -> Vec<DiagnosticCode> {
        sink.diagnostics().iter().map(|d| d.code).collect()
    }

    #[test]
    fn nodes_set_baseline_only() {
        let fx = Fixture::new();
        assert_eq!(fx.design.num_instances(), 3);
        let seq = fx.design.instance(InstId::from_raw(2)).unwrap();
        assert!(seq.fixed);
        assert_eq!(seq.base_location, Location::new(2, 1, 0));
        assert_eq!(seq.location, Location::UNPLACED);
        assert_eq!(fx.library.len(), 2);
    }

    #[test]
    fn node_errors() {
        let mut fx = Fixture::new();
        let id = fx.db.add_source(
            "more.nodes",
            "X1Y1Z0 LUT9 inst_5\nX1Y1Z0 LUT2 inst_0\nX1Y1 LUT2 inst_6\nX1Y1Z0 LUT2 cell_7\n".to_string(),
        );
        load_nodes(&mut fx.design, &fx.library, fx.db.get_file(id), &fx.sink);
        assert_eq!(
            codes(&fx.sink),
            vec![
                DiagnosticCode::UNKNOWN_CELL,
                DiagnosticCode::DUPLICATE_DEFINITION,
                DiagnosticCode::MALFORMED_LINE,
                DiagnosticCode::MALFORMED_LINE,
            ]
        );
        assert_eq!(fx.design.num_instances(), 3);
    }

    #[test]
    fn nets_connect_pins() {
        let mut fx = Fixture::new();
        fx.nets("net net_0 3\ninst_0 O_0\ninst_1 I_0\ninst_1 I_1\nendnet\nnet net_1 2 clock\ninst_1 O_0\ninst_2 I_1\nendnet\n");
        assert!(!fx.sink.has_errors(), "{:?}", fx.sink.diagnostics());
        let n0 = fx.design.net(NetId::from_raw(0)).unwrap();
        assert!(n0.intra_tile);
        assert_eq!(n0.num_pins(), 3);
        let n1 = fx.design.net(NetId::from_raw(1)).unwrap();
        assert!(n1.clock);
        assert!(!n1.intra_tile);
        for net in fx.design.nets() {
            for pin in net.pins() {
                let p = fx.design.pin(pin).unwrap();
                assert_eq!(p.net, Some(net.id));
                assert_eq!(p.owner, pin.inst);
            }
        }
    }

    #[test]
    fn bad_net_blocks_are_dropped() {
        let mut fx = Fixture::new();
        fx.nets(
            "net net_0 2\ninst_0 O_0\ninst_1 O_0\nendnet\n\
             net net_1 3\ninst_0 O_0\ninst_1 I_0\nendnet\n\
             net net_2 2\ninst_0 O_0\ninst_9 I_0\nendnet\n\
             net net_3 2\ninst_0 O_0\ninst_1 I_7\nendnet\n\
             net net_4 2\ninst_0 O_0\ninst_1 I_0\nendnet\n\
             net net_5 2\ninst_2 O_0\ninst_1 I_0\nendnet\n",
        );
        assert_eq!(
            codes(&fx.sink),
            vec![
                DiagnosticCode::MULTIPLE_DRIVERS,
                DiagnosticCode::PIN_COUNT_MISMATCH,
                DiagnosticCode::UNKNOWN_INSTANCE,
                DiagnosticCode::UNKNOWN_PIN,
                DiagnosticCode::PIN_ALREADY_CONNECTED,
            ]
        );
        assert_eq!(fx.design.num_nets(), 1);
        assert!(fx.design.net(NetId::from_raw(4)).is_some());
        let unconnected = PinRef::new(InstId::from_raw(1), PinDir::Output, 0);
        assert_eq!(fx.design.pin(unconnected).unwrap().net, None);
    }

    #[test]
    fn timing_marks_pins() {
        let mut fx = Fixture::new();
        let id = fx.db.add_source("design.timing", "inst_1 I_1\ninst_2 O_0\ninst_2 O_3\n".to_string());
        load_timing(&mut fx.design, fx.db.get_file(id), &fx.sink);
        assert_eq!(codes(&fx.sink), vec![DiagnosticCode::UNKNOWN_PIN]);
        assert_eq!(fx.design.num_critical_pins(), 2);
        let pin = PinRef::new(InstId::from_raw(1), PinDir::Input, 1);
        assert!(fx.design.pin(pin).unwrap().timing_critical);
    }

    #[test]
    fn output_statistics() {
        let mut fx = Fixture::new();
        let stats = fx.output("X1Y1Z0 LUT2 inst_0\nX3Y1Z0 LUT2 inst_1\nX2Y1Z0 SEQ inst_2\n");
        assert!(!fx.sink.has_errors());
        assert_eq!(
            stats,
            OutputStats {
                total: 3,
                fixed: 1,
                movable: 2,
                moved_fixed: 0,
                moved_movable: 1,
            }
        );
        let inst = fx.design.instance(InstId::from_raw(1)).unwrap();
        assert_eq!(inst.location_for(Placement::Optimized), Location::new(3, 1, 0));

        let mut buf = Vec::new();
        stats.write_to(&mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.contains("| Movable  | 2     | 1         | 50.0       |"), "{text}");
    }

    #[test]
    fn output_errors() {
        let mut fx = Fixture::new();
        let stats = fx.output("X1Y1Z0 LUT2 inst_0\nX2Y2Z0 SEQ inst_2\nX0Y0Z0 SEQ inst_8\nX1Y1Z1 SEQ inst_0\n");
        assert_eq!(
            codes(&fx.sink),
            vec![
                DiagnosticCode::UNKNOWN_INSTANCE,
                DiagnosticCode::MODEL_CHANGED,
                DiagnosticCode::UNPLACED_INSTANCE,
                DiagnosticCode::MOVED_FIXED_INSTANCE,
            ]
        );
        assert_eq!(stats.moved_fixed, 1);
        assert_eq!(stats.movable, 1);
        assert_eq!(fx.sink.error_count(), 3);
    }
}
