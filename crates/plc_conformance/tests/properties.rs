//! Whole-run properties: idempotence, determinism and the output-file rules.

use plc_arch::SlotKind;
use plc_cli::Command;
use plc_common::Placement;
use plc_conformance::{Bench, DesignText};
use plc_diagnostics::DiagnosticCode;

/// A small mixed design on a 4 x 2 grid; tile X0Y0 is over capacity.
fn busy_design() -> DesignText {
    let mut design = DesignText::new();
    design
        .node(1, "LUT4", (0, 0, 0))
        .node(2, "LUT4", (0, 0, 0))
        .node(3, "SEQ", (0, 0, 0))
        .node(4, "SEQ", (1, 1, 8))
        .node(5, "LUT2", (2, 1, 3))
        .fixed_node(6, "LUT1", (3, 0, 7))
        .move_to(5, (3, 1, 1));
    // Eight undriven inputs: the LUT pair cannot share a slot.
    for i in 0..8u32 {
        let (lut, pin) = if i < 4 { (1, i) } else { (2, i - 4) };
        let pin = format!("I_{pin}");
        design.net(10 + i, false, &[(lut, pin.as_str())]);
    }
    design
        .net(30, true, &[(3, "I_1"), (4, "I_1")])
        .net(31, false, &[(1, "O_0"), (3, "I_0"), (4, "I_0"), (5, "I_0")])
        .critical(4, "I_0");
    design
}

#[test]
fn legal_check_is_idempotent() {
    let mut bench = Bench::plb_grid(4, 2, &busy_design());

    let (first_ok, first) = bench.run(Command::LegalCheck);
    let first_codes = bench.error_codes();
    let device = bench.session.device().unwrap();
    let first_slots: Vec<_> = device.tiles().iter().map(|tile| tile.slots(SlotKind::Lut).map(<[_]>::to_vec)).collect();
    let first_regions = device.clock_regions().to_vec();

    let (second_ok, second) = bench.run(Command::LegalCheck);
    let device = bench.session.device().unwrap();
    let second_slots: Vec<_> = device.tiles().iter().map(|tile| tile.slots(SlotKind::Lut).map(<[_]>::to_vec)).collect();

    assert!(!first_ok);
    assert_eq!(first_ok, second_ok);
    assert_eq!(first, second);
    assert_eq!(first_codes, bench.error_codes());
    assert_eq!(first_slots, second_slots);
    assert_eq!(first_regions, device.clock_regions().to_vec());
}

#[test]
fn reports_are_deterministic() {
    let commands = [
        Command::ReportDesign,
        Command::ReportWirelength,
        Command::ReportPinDensity,
        Command::ReportTile { col: 0, row: 0 },
        Command::ReportNet { name: "net_31".into() },
        Command::ReportClockRegion { col: 0, row: 0 },
    ];
    let run_all = || {
        let mut bench = Bench::plb_grid(4, 2, &busy_design());
        commands.iter().map(|c| bench.run(c.clone())).collect::<Vec<_>>()
    };
    let first = run_all();
    assert!(first.iter().all(|(ok, _)| *ok));
    assert_eq!(first, run_all());
}

fn field(text: &str, prefix: &str) -> i64 {
    text.lines()
        .find_map(|l| l.strip_prefix(prefix))
        .unwrap()
        .parse()
        .unwrap()
}

#[test]
fn wirelength_is_the_sum_over_nets() {
    let mut bench = Bench::plb_grid(4, 2, &busy_design());
    let (_, text) = bench.run(Command::ReportWirelength);

    // Undriven nets add nothing and the clock net is excluded, so the
    // baseline total is net_31 alone.
    let (_, net) = bench.run(Command::ReportNet { name: "net_31".into() });
    let critical = field(&net, "    Critical wirelength = ");
    let non_critical = field(&net, "    Non-critical wirelength = ");
    // inst_1 at (0, 0) drives the critical inst_4 at (1, 1).
    assert_eq!(critical, 2);
    // (0, 0) and (2, 1) once inst_3 merges with the driver.
    assert_eq!(non_critical, 3);
    let baseline = text.lines().nth(1).unwrap();
    assert!(
        baseline.starts_with(&format!("  Total wirelength = {}; Crit = {critical} (", critical + non_critical)),
        "{text}"
    );
}

#[test]
fn intra_tile_flag_follows_the_placement() {
    let mut design = DesignText::new();
    design
        .node(1, "LUT1", (0, 0, 0))
        .node(2, "LUT1", (0, 0, 1))
        .move_to(2, (1, 0, 0))
        .net(1, false, &[(1, "O_0"), (2, "I_0")]);
    let mut bench = Bench::plb_grid(2, 1, &design);
    let (_, text) = bench.run(Command::ReportNet { name: "net_1".into() });
    assert!(text.starts_with("  net_1 intra_tile\n"));

    // Baseline HPWL is 0 inside one tile; the optimized move adds one column.
    assert!(text.contains("  Baseline:\n    Number of critical fanout pins: 0\n    Critical wirelength = 0\n    Number of non-critical fanout pins: 1\n    Non-critical wirelength = 0\n"));
    assert!(text.contains("    Non-critical wirelength = 1\n"));

    let (_, tile) = bench.run(Command::ReportTile { col: 1, row: 0 });
    assert!(tile.contains("    Input nets:\n      net_1\n"));
}

#[test]
fn moved_fixed_and_unplaced_instances_fail_the_output() {
    let mut design = DesignText::new();
    design.fixed_node(1, "LUT1", (0, 0, 0)).node(2, "LUT1", (0, 0, 1)).move_to(1, (0, 0, 2));
    let config = plc_config::CheckerConfig::default();
    let lib = plc_conformance::CELL_LIBRARY;
    let scl = plc_conformance::plb_site_map(1, 1);
    let clk = plc_conformance::single_clock_region(1, 1);
    let mut session = plc_cli::Session::new(config).unwrap();
    let db = &mut session.source_db;
    let arch = [
        db.add_source("a.lib", lib.to_string()),
        db.add_source("a.scl", scl),
        db.add_source("a.clk", clk),
    ];
    let inputs = [
        db.add_source("d.nodes", design.nodes_text()),
        db.add_source("d.nets", String::new()),
        db.add_source("d.timing", String::new()),
    ];
    // inst_2 is missing from the output file.
    let output = db.add_source("d.out", "X0Y0Z2 LUT1 inst_1 FIXED\n".to_string());

    let mut out = Vec::new();
    assert!(session.load_arch(arch, &mut out).unwrap());
    assert!(session.load_design(inputs, &mut out).unwrap());
    assert!(!session.load_output(output, &mut out).unwrap());
    let codes: Vec<_> = session.sink.take_all().iter().map(|d| d.code).collect();
    assert_eq!(
        codes,
        vec![DiagnosticCode::MOVED_FIXED_INSTANCE, DiagnosticCode::UNPLACED_INSTANCE]
    );
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("Instance Statistics:"));
    assert!(!text.contains("Successfully read output file."));

    let design = session.design().unwrap();
    let placed: Vec<_> = design.instances().map(|i| i.location_for(Placement::Optimized).is_placed()).collect();
    assert_eq!(placed, vec![true, false]);
}

#[test]
fn off_device_instances_fail_legal_check() {
    let mut design = DesignText::new();
    design.node(1, "LUT1", (0, 0, 0)).move_to(1, (5, 5, 0));
    let mut bench = Bench::plb_grid(1, 1, &design);
    let (ok, text) = bench.run(Command::LegalCheck);
    assert!(!ok);
    assert!(text.contains("        Baseline placement passed capacity check.\n"));
    assert!(!text.contains("Optimized placement passed capacity check."));
    assert_eq!(bench.error_codes(), vec![DiagnosticCode::OUTSIDE_DEVICE, DiagnosticCode::OUTSIDE_CLOCK_REGION]);
}
