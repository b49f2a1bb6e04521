//! Design summary report.

use crate::design::Design;
use plc_common::{Placement, Table};
use std::collections::BTreeMap;
use std::io::{self, Write};

/// Pin-count buckets of the net histogram, as `(label, upper bound)`.
const NET_GROUPS: [(&str, usize); 7] = [
    ("grp1: < 2 pins", 1),
    ("grp2: 2 pins", 2),
    ("grp3: 3~10 pins", 10),
    ("grp4: 11~50 pins", 50),
    ("grp5: 51~100 pins", 100),
    ("grp6: 101~1000 pins", 1000),
    ("grp7: >1000 pins", usize::MAX),
];

fn net_group(num_pins: usize) -> usize {
    NET_GROUPS
        .iter()
        .position(|&(_, max)| num_pins <= max)
        .unwrap_or(NET_GROUPS.len() - 1)
}

/// Prints instance counts per unified model, net counts per pin-count group,
/// and the clock, intra-tile and timing-critical totals.
pub fn report_design(design: &Design, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Number of instances: {}", design.num_instances())?;
    let mut by_type: BTreeMap<String, (usize, usize)> = BTreeMap::new();
    for inst in design.instances() {
        let name = inst
            .kind
            .map_or_else(|| inst.model.clone(), |kind| kind.name().to_string());
        let entry = by_type.entry(name).or_default();
        entry.0 += 1;
        if inst.fixed {
            entry.1 += 1;
        }
    }
    let mut table = Table::new(["Type", "Total", "Fixed"]);
    for (name, (total, fixed)) in &by_type {
        table.add_row([name.clone(), total.to_string(), fixed.to_string()]);
    }
    table.write_to(out)?;
    writeln!(out)?;

    let mut groups = [0usize; NET_GROUPS.len()];
    let mut clock = 0;
    let mut intra_tile = 0;
    let mut total_pins = 0;
    for net in design.nets() {
        groups[net_group(net.num_pins())] += 1;
        total_pins += net.num_pins();
        clock += usize::from(net.clock);
        intra_tile += usize::from(design.is_intra_tile(net, Placement::Baseline));
    }
    writeln!(out, "Number of nets: {}", design.num_nets())?;
    writeln!(out, "Number of clock nets: {clock}")?;
    let mut table = Table::new(["Group", "Count"]);
    for (i, count) in groups.iter().enumerate() {
        // The smallest group always prints; the rest only when populated.
        if i == 0 || *count > 0 {
            table.add_row([NET_GROUPS[i].0.to_string(), count.to_string()]);
        }
    }
    table.write_to(out)?;
    writeln!(out)?;

    let critical: usize = design
        .nets()
        .flat_map(|net| net.pins())
        .filter(|&pin| design.pin(pin).is_some_and(|p| p.timing_critical))
        .count();
    writeln!(out, "{intra_tile} out of {} are intra-tile nets.", design.num_nets())?;
    writeln!(out, "{critical} out of {total_pins} are timing critical pins.")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::{load_nets, load_nodes, load_timing};
    use plc_arch::load_library;
    use plc_diagnostics::DiagnosticSink;
    use plc_source::SourceDb;

    #[test]
    fn groups() {
        assert_eq!(net_group(0), 0);
        assert_eq!(net_group(1), 0);
        assert_eq!(net_group(2), 1);
        assert_eq!(net_group(10), 2);
        assert_eq!(net_group(11), 3);
        assert_eq!(net_group(101), 5);
        assert_eq!(net_group(1001), 6);
    }

    #[test]
    fn summary() {
        let mut db = SourceDb::new();
        let lib = db.add_source(
            "d.lib",
            "CELL LUT1\nPIN I_0 INPUT\nPIN O_0 OUTPUT\nEND_CELL\nCELL GCLK\nPIN I_0 INPUT\nPIN O_0 OUTPUT\nEND_CELL\n"
                .to_string(),
        );
        let nodes = db.add_source(
            "d.nodes",
            "X0Y0Z0 LUT1 inst_0\nX0Y0Z1 LUT1 inst_1 FIXED\nX5Y0Z0 GCLK inst_2 FIXED\n".to_string(),
        );
        let nets = db.add_source(
            "d.nets",
            "net net_0 2\ninst_0 O_0\ninst_1 I_0\nendnet\nnet net_1 3 clock\ninst_2 O_0\ninst_0 I_0\ninst_2 I_0\nendnet\n"
                .to_string(),
        );
        let timing = db.add_source("d.timing", "inst_1 I_0\n".to_string());
        let sink = DiagnosticSink::new();
        let library = load_library(db.get_file(lib), &sink);
        let mut design = Design::new();
        load_nodes(&mut design, &library, db.get_file(nodes), &sink);
        load_nets(&mut design, db.get_file(nets), &sink);
        load_timing(&mut design, db.get_file(timing), &sink);
        assert!(!sink.has_errors(), "{:?}", sink.diagnostics());

        let mut buf = Vec::new();
        report_design(&design, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert!(text.starts_with("Number of instances: 3\n"));
        assert!(text.contains("| LUT  | 2     | 1     |"), "{text}");
        assert!(text.contains("| GCLK | 1     | 1     |"), "{text}");
        assert!(text.contains("Number of clock nets: 1"));
        assert!(text.contains("| grp1: < 2 pins  | 0     |"), "{text}");
        assert!(text.contains("| grp2: 2 pins    | 1     |"), "{text}");
        assert!(text.contains("| grp3: 3~10 pins | 1     |"), "{text}");
        assert!(text.contains("1 out of 2 are intra-tile nets."));
        assert!(text.ends_with("1 out of 5 are timing critical pins.\n"));
    }
}
