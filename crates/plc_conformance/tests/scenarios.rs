//! End-to-end scenarios: small devices with one rule exercised at a time.

use plc_cli::Command;
use plc_conformance::{Bench, DesignText};
use plc_diagnostics::DiagnosticCode;

/// Adds `count` SEQ drivers at `(1, 0, z)` with ids starting at `first`.
fn seq_drivers(design: &mut DesignText, first: u32, count: u32) {
    for i in 0..count {
        design.node(first + i, "SEQ", (1, 0, i as i32));
    }
}

#[test]
fn empty_plb_passes_and_reports_nothing() {
    let mut bench = Bench::plb_grid(1, 1, &DesignText::new());

    let (ok, text) = bench.run(Command::LegalCheck);
    assert!(ok, "{}", bench.render());
    assert!(text.ends_with("  Legalization check passed.\n"));
    assert!(text.contains("        Baseline placement passed capacity check.\n"));
    assert!(text.contains("        Optimized placement passed control set check.\n"));

    let (ok, text) = bench.run(Command::ReportPinDensity);
    assert!(ok);
    assert!(text.contains("    Checked pin density on 0 tiles; top 5% count = 0 tiles.\n"));
    assert!(text.contains("    Optimized top 5% congested tiles (0 tiles) avg. pin density: 0.00%\n"));

    let (ok, text) = bench.run(Command::ReportWirelength);
    assert!(ok);
    assert_eq!(
        text,
        "  Baseline:\n  Total wirelength = 0; Crit = 0 (0.00%)\n  Optimized:\n  Total wirelength = 0; Crit = 0 (0.00%)\n"
    );
    assert!(bench.error_codes().is_empty());
}

#[test]
fn lut_pair_sharing_inputs_is_legal() {
    let mut design = DesignText::new();
    design.node(1, "LUT3", (0, 0, 0)).node(2, "LUT3", (0, 0, 0));
    seq_drivers(&mut design, 10, 4);
    design
        .net(1, false, &[(10, "O_0"), (1, "I_0"), (2, "I_0")])
        .net(2, false, &[(11, "O_0"), (1, "I_1"), (2, "I_1")])
        .net(3, false, &[(12, "O_0"), (1, "I_2")])
        .net(4, false, &[(13, "O_0"), (2, "I_2")]);
    let mut bench = Bench::plb_grid(2, 1, &design);

    let (ok, _) = bench.run(Command::LegalCheck);
    assert!(ok, "{}", bench.render());
}

#[test]
fn lut_pair_with_disjoint_inputs_overflows() {
    let mut design = DesignText::new();
    design.node(1, "LUT4", (0, 0, 0)).node(2, "LUT4", (0, 0, 0));
    seq_drivers(&mut design, 10, 8);
    for i in 0..8u32 {
        let (lut, pin) = if i < 4 { (1, i) } else { (2, i - 4) };
        let pin = format!("I_{pin}");
        design.net(i + 1, false, &[(10 + i, "O_0"), (lut, pin.as_str())]);
    }
    let mut bench = Bench::plb_grid(2, 1, &design);

    let (ok, text) = bench.run(Command::LegalCheck);
    assert!(!ok);
    assert!(!text.contains("passed capacity check"));
    let diags = bench.diagnostics();
    assert_eq!(diags.len(), 2);
    for diag in &diags {
        assert_eq!(diag.code, DiagnosticCode::CAPACITY_OVERFLOW);
        assert_eq!(diag.message, "tile X0Y0 is over the capacity");
        assert!(diag.notes.contains(&"slot type: LUT slot index: 0".to_string()));
    }
}

#[test]
fn dram_blocks_its_lut_band() {
    let mut design = DesignText::new();
    design
        .node(1, "DRAM", (0, 0, 0))
        .node(2, "LUT1", (0, 0, 0))
        .node(3, "LUT1", (0, 0, 2))
        .node(4, "LUT1", (0, 0, 5))
        .node(5, "DRAM", (1, 0, 1))
        .node(6, "LUT1", (1, 0, 5))
        .node(7, "LUT1", (1, 0, 2));
    let mut bench = Bench::plb_grid(2, 1, &design);

    let (ok, _) = bench.run(Command::LegalCheck);
    assert!(!ok);
    let diags = bench.diagnostics();
    // One error per tile and placement.
    assert_eq!(diags.len(), 4);

    let first = &diags[0];
    assert_eq!(first.message, "tile X0Y0 is over the capacity");
    let lut_dram: Vec<_> = first.notes.iter().filter(|n| n.contains("LUT-DRAM")).collect();
    assert_eq!(
        lut_dram,
        vec!["slot type: LUT-DRAM slot index: 0", "slot type: LUT-DRAM slot index: 2"]
    );

    let second = &diags[1];
    assert_eq!(second.message, "tile X1Y0 is over the capacity");
    let lut_dram: Vec<_> = second.notes.iter().filter(|n| n.contains("LUT-DRAM")).collect();
    assert_eq!(lut_dram, vec!["slot type: LUT-DRAM slot index: 5"]);
}

#[test]
fn two_clocks_in_one_bank() {
    let mut design = DesignText::new();
    design
        .node(1, "SEQ", (0, 0, 0))
        .node(2, "SEQ", (0, 0, 1))
        .net(1, true, &[(1, "I_1")])
        .net(2, true, &[(2, "I_1")]);
    let mut bench = Bench::plb_grid(1, 1, &design);

    let (ok, text) = bench.run(Command::LegalCheck);
    assert!(!ok);
    assert!(text.contains("Checked control set on 1 tiles.\n"));
    let diags = bench.diagnostics();
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].code, DiagnosticCode::BANK_CLOCK_EXCESS);
    assert_eq!(diags[0].message, "multiple clock nets in bank 0 of tile X0Y0");
    assert_eq!(diags[0].notes[1], "2 nets, limit 1: net_1 net_2");
}

#[test]
fn clock_region_over_budget() {
    let mut design = DesignText::new();
    for i in 0..29u32 {
        design.node(i + 1, "SEQ", (i as i32, 0, 0));
        design.net(i + 1, true, &[(i + 1, "I_1")]);
    }
    let mut bench = Bench::plb_grid(29, 1, &design);

    let (ok, text) = bench.run(Command::ReportClockRegion { col: 0, row: 0 });
    assert!(ok);
    assert!(text.starts_with("  Baseline:\n| 29| \n"));
    assert!(text.contains("Clock region [0,0][28,0] has 29 clock nets.\n    net_1\n"));
    let codes = bench.error_codes();
    assert_eq!(codes, vec![DiagnosticCode::REGION_OVERFLOW; 2]);

    let (ok, _) = bench.run(Command::LegalCheck);
    assert!(!ok);
    let diags = bench.diagnostics();
    assert_eq!(diags.len(), 2);
    assert_eq!(diags[0].message, "1 clock regions have more than 28 clock nets");
}

/// Driver at (0, 0), fanouts on the other corners of a 4 x 3 box.
fn rectangle() -> DesignText {
    let mut design = DesignText::new();
    design
        .node(1, "LUT1", (0, 0, 0))
        .node(2, "LUT1", (0, 3, 0))
        .node(3, "LUT1", (4, 0, 0))
        .node(4, "LUT1", (4, 3, 0))
        .net(1, false, &[(1, "O_0"), (2, "I_0"), (3, "I_0"), (4, "I_0")]);
    design
}

#[test]
fn rectangle_wirelength() {
    let mut bench = Bench::plb_grid(5, 4, &rectangle());
    let (ok, text) = bench.run(Command::ReportWirelength);
    assert!(ok);
    assert!(text.contains("  Total wirelength = 10; Crit = 0 (0.00%)\n"));

    let mut design = rectangle();
    design.critical(4, "I_0");
    let mut bench = Bench::plb_grid(5, 4, &design);
    let (_, text) = bench.run(Command::ReportWirelength);
    assert!(text.contains("  Total wirelength = 14; Crit = 7 (50.00%)\n"));

    let (ok, text) = bench.run(Command::ReportNet { name: "net_1".into() });
    assert!(ok);
    assert!(text.starts_with("  net_1 \n    Driver: inst_1 O_0\n    Number of fanout pins: 3\n"));
    assert!(text.contains("    Number of critical fanout pins: 1\n    Critical wirelength = 7\n"));
    assert!(text.contains("    Non-critical wirelength = 7\n"));
    assert!(text.contains("    Net Rectilinear Steiner Minimum Tree with 3 merged locations.\n"));
}

#[test]
fn moved_sink_changes_optimized_wirelength_only() {
    let mut design = rectangle();
    design.critical(4, "I_0").move_to(4, (2, 3, 0));
    let mut bench = Bench::plb_grid(5, 4, &design);
    let (_, text) = bench.run(Command::ReportWirelength);
    assert_eq!(
        text,
        "  Baseline:\n  Total wirelength = 14; Crit = 7 (50.00%)\n  Optimized:\n  Total wirelength = 12; Crit = 5 (41.67%)\n"
    );
}
