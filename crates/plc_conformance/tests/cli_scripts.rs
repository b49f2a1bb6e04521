//! Scripts run from disk through the interpreter, as the `plc` binary does.

use plc_cli::{resolve_config, run_script, ScriptOptions, Session};
use plc_conformance::{plb_site_map, single_clock_region, DesignText, CELL_LIBRARY};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// Writes a 2 x 1 PLB device and a two-LUT design into `dir`.
fn write_inputs(dir: &Path, design: &DesignText) {
    fs::write(dir.join("design.lib"), CELL_LIBRARY).unwrap();
    fs::write(dir.join("design.scl"), plb_site_map(2, 1)).unwrap();
    fs::write(dir.join("design.clk"), single_clock_region(2, 1)).unwrap();
    fs::write(dir.join("design.nodes"), design.nodes_text()).unwrap();
    fs::write(dir.join("design.nets"), design.nets_text()).unwrap();
    fs::write(dir.join("design.timing"), design.timing_text()).unwrap();
    fs::write(dir.join("design.out"), design.output_text()).unwrap();
}

fn two_luts() -> DesignText {
    let mut design = DesignText::new();
    design
        .node(1, "LUT2", (0, 0, 0))
        .node(2, "LUT2", (1, 0, 0))
        .move_to(2, (0, 0, 1))
        .net(1, false, &[(1, "O_0"), (2, "I_0")])
        .critical(2, "I_0");
    design
}

fn script_text(dir: &Path, tail: &str) -> String {
    let p = |name: &str| dir.join(name).display().to_string();
    format!(
        "# full flow\nread_arch {} {} {}\nread_design {} {} {}\nread_output {}\n\n{tail}",
        p("design.lib"),
        p("design.scl"),
        p("design.clk"),
        p("design.nodes"),
        p("design.nets"),
        p("design.timing"),
        p("design.out"),
    )
}

/// Runs `script` the way `main` does; returns the result, stdout and stderr.
fn run(script: &Path, options: ScriptOptions) -> (bool, String, String) {
    let config = resolve_config(None, script).unwrap();
    let mut session = Session::new(config).unwrap();
    let id = session.source_db.load_file(script).unwrap();
    let mut out = Vec::new();
    let mut err = Vec::new();
    let ok = run_script(&mut session, id, options, &mut out, &mut err).unwrap();
    (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
}

#[test]
fn full_flow_passes() {
    let dir = TempDir::new().unwrap();
    write_inputs(dir.path(), &two_luts());
    let script = dir.path().join("check.script");
    let tail = "report_arch\nreport_design\nlegal_check\nreport_wirelength\nreport_pin_density\nreport_clock_region 0 0\nreport_tile 0 0\nreport_net net_1\nexit\n";
    fs::write(&script, script_text(dir.path(), tail)).unwrap();

    let (ok, out, err) = run(&script, ScriptOptions::default());
    assert!(ok, "{err}");
    assert!(out.starts_with("Track-8 Checker V0.2\n\n"));
    assert!(out.contains("Instance Statistics:"));
    assert!(out.contains("  Legalization check passed.\n"));
    // inst_2 moves next to its driver: the critical net shrinks to nothing.
    assert!(out.contains("  Baseline:\n  Total wirelength = 1; Crit = 1 (100.00%)\n"));
    assert!(out.contains("  Optimized:\n  Total wirelength = 0; Crit = 0 (0.00%)\n"));
    assert!(out.contains("  Tile X0Y0 type: PLB\n"));
    assert!(out.ends_with("exit\nMain program result: true\n"));
}

#[test]
fn failing_check_stops_the_script() {
    let dir = TempDir::new().unwrap();
    let mut design = two_luts();
    design.move_to(2, (7, 0, 0));
    write_inputs(dir.path(), &design);
    let script = dir.path().join("check.script");
    fs::write(&script, script_text(dir.path(), "legal_check\nreport_wirelength\n")).unwrap();

    let (ok, out, err) = run(&script, ScriptOptions { quiet: true, ..ScriptOptions::default() });
    assert!(!ok);
    assert!(out.contains("  LegalCheck failed with"));
    assert!(!out.contains("Total wirelength"));
    assert!(out.ends_with("Main program result: false\n"));
    assert!(err.contains("error[T003]"), "{err}");
}

#[test]
fn missing_input_file_is_reported() {
    let dir = TempDir::new().unwrap();
    let script = dir.path().join("check.script");
    fs::write(&script, "read_arch nowhere.lib nowhere.scl nowhere.clk\nreport_arch\n").unwrap();

    let (ok, out, err) = run(&script, ScriptOptions { quiet: true, ..ScriptOptions::default() });
    assert!(!ok);
    assert_eq!(out, "Main program result: false\n");
    assert_eq!(err.matches("error[I001]").count(), 3);
}

#[test]
fn config_beside_the_script_sets_limits() {
    let dir = TempDir::new().unwrap();
    let mut design = DesignText::new();
    design
        .node(1, "SEQ", (0, 0, 0))
        .node(2, "SEQ", (0, 0, 1))
        .net(1, true, &[(1, "I_1")])
        .net(2, true, &[(2, "I_1")]);
    write_inputs(dir.path(), &design);
    let script = dir.path().join("check.script");
    fs::write(&script, script_text(dir.path(), "legal_check\n")).unwrap();

    let (ok, _, err) = run(&script, ScriptOptions::default());
    assert!(!ok);
    assert!(err.contains("multiple clock nets in bank 0 of tile X0Y0"));

    fs::write(dir.path().join("checker.toml"), "[limits]\nmax_clock_per_bank = 2\n").unwrap();
    let (ok, out, err) = run(&script, ScriptOptions::default());
    assert!(ok, "{err}");
    assert!(out.ends_with("Main program result: true\n"));
}
