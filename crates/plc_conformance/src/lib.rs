//! End-to-end test helpers for the placement checker.
//!
//! Architecture and design inputs are written as text, loaded through the
//! real loaders of a [`Session`] and then driven command by command, so the
//! tests exercise the same path a script does.

#![warn(missing_docs)]

use plc_cli::{Command, Session};
use plc_config::CheckerConfig;
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticRenderer, Severity, TerminalRenderer};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A cell library with every logic model the scenarios place.
///
/// `SEQ` pins: `I_0` data, `I_1` clock, `I_2` clock enable, `I_3` reset.
pub const CELL_LIBRARY: &str = "\
CELL LUT1
  PIN I_0 INPUT
  PIN O_0 OUTPUT
END_CELL
CELL LUT2
  PIN I_0 INPUT
  PIN I_1 INPUT
  PIN O_0 OUTPUT
END_CELL
CELL LUT3
  PIN I_0 INPUT
  PIN I_1 INPUT
  PIN I_2 INPUT
  PIN O_0 OUTPUT
END_CELL
CELL LUT4
  PIN I_0 INPUT
  PIN I_1 INPUT
  PIN I_2 INPUT
  PIN I_3 INPUT
  PIN O_0 OUTPUT
END_CELL
CELL SEQ
  PIN I_0 INPUT
  PIN I_1 INPUT CLOCK
  PIN I_2 INPUT CTRL
  PIN I_3 INPUT RESET
  PIN O_0 OUTPUT
END_CELL
CELL DRAM
  PIN I_0 INPUT
  PIN I_1 INPUT CLOCK
  PIN O_0 OUTPUT
END_CELL
";

/// A site map of `cols x rows` PLB tiles.
pub fn plb_site_map(cols: i32, rows: i32) -> String {
    let mut text = format!("SITEMAP {cols} {rows}\n");
    for col in 0..cols {
        for row in 0..rows {
            let _ = writeln!(text, "X{col}Y{row} PLB");
        }
    }
    text.push_str("END_SITEMAP\n");
    text
}

/// One clock region covering the whole `cols x rows` grid.
pub fn single_clock_region(cols: i32, rows: i32) -> String {
    format!(
        "CLOCKREGIONS 1 1\nX0Y0 0 {} 0 {}\nEND_CLOCKREGIONS\n",
        cols - 1,
        rows - 1
    )
}

type Site = (i32, i32, i32);

fn site_text((col, row, z): Site) -> String {
    format!("X{col}Y{row}Z{z}")
}

/// Text form of a design: nodes, nets, timing and the optimized output.
///
/// Instances keep their baseline site in the output unless moved.
#[derive(Debug, Clone, Default)]
pub struct DesignText {
    nodes: BTreeMap<u32, (String, Site, bool)>,
    moved: BTreeMap<u32, Site>,
    nets: String,
    timing: String,
}

impl DesignText {
    /// Creates an empty design.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a movable instance `inst_<id>` at `site`.
    pub fn node(&mut self, id: u32, model: &str, site: Site) -> &mut Self {
        self.nodes.insert(id, (model.to_string(), site, false));
        self
    }

    /// Adds a fixed instance `inst_<id>` at `site`.
    pub fn fixed_node(&mut self, id: u32, model: &str, site: Site) -> &mut Self {
        self.nodes.insert(id, (model.to_string(), site, true));
        self
    }

    /// Places `inst_<id>` at `site` in the optimized placement.
    pub fn move_to(&mut self, id: u32, site: Site) -> &mut Self {
        self.moved.insert(id, site);
        self
    }

    /// Adds `net_<id>`; `pins` are `(instance id, pin name)` pairs.
    pub fn net(&mut self, id: u32, clock: bool, pins: &[(u32, &str)]) -> &mut Self {
        let flag = if clock { " clock" } else { "" };
        let _ = writeln!(self.nets, "net net_{id} {}{flag}", pins.len());
        for (inst, pin) in pins {
            let _ = writeln!(self.nets, "  inst_{inst} {pin}");
        }
        self.nets.push_str("endnet\n");
        self
    }

    /// Marks a pin timing-critical.
    pub fn critical(&mut self, inst: u32, pin: &str) -> &mut Self {
        let _ = writeln!(self.timing, "inst_{inst} {pin}");
        self
    }

    /// The nodes file.
    pub fn nodes_text(&self) -> String {
        self.node_lines(|_, site| site)
    }

    /// The output file.
    pub fn output_text(&self) -> String {
        self.node_lines(|id, site| self.moved.get(&id).copied().unwrap_or(site))
    }

    /// The nets file.
    pub fn nets_text(&self) -> &str {
        &self.nets
    }

    /// The timing file.
    pub fn timing_text(&self) -> &str {
        &self.timing
    }

    fn node_lines(&self, site_of: impl Fn(u32, Site) -> Site) -> String {
        let mut text = String::new();
        for (&id, (model, site, fixed)) in &self.nodes {
            let fixed = if *fixed { " FIXED" } else { "" };
            let _ = writeln!(text, "{} {model} inst_{id}{fixed}", site_text(site_of(id, *site)));
        }
        text
    }
}

/// A session with an architecture, a design and an output placement loaded.
pub struct Bench {
    /// The session under test.
    pub session: Session,
}

impl Bench {
    /// Loads a PLB grid with a single clock region plus `design`.
    pub fn plb_grid(cols: i32, rows: i32, design: &DesignText) -> Self {
        Self::with_arch(
            CheckerConfig::default(),
            CELL_LIBRARY,
            &plb_site_map(cols, rows),
            &single_clock_region(cols, rows),
            design,
        )
    }

    /// Loads the given architecture texts plus `design`.
    ///
    /// Panics with the rendered diagnostics if any input fails to load.
    pub fn with_arch(config: CheckerConfig, lib: &str, scl: &str, clk: &str, design: &DesignText) -> Self {
        let mut session = Session::new(config).unwrap();
        let mut out = Vec::new();
        let db = &mut session.source_db;
        let arch = [
            db.add_source("test.lib", lib.to_string()),
            db.add_source("test.scl", scl.to_string()),
            db.add_source("test.clk", clk.to_string()),
        ];
        let inputs = [
            db.add_source("test.nodes", design.nodes_text()),
            db.add_source("test.nets", design.nets_text().to_string()),
            db.add_source("test.timing", design.timing_text().to_string()),
        ];
        let output = db.add_source("test.out", design.output_text());

        let mut bench = Self { session };
        let ok = bench.session.load_arch(arch, &mut out).unwrap()
            && bench.session.load_design(inputs, &mut out).unwrap()
            && bench.session.load_output(output, &mut out).unwrap();
        assert!(ok, "inputs failed to load:\n{}", bench.render());
        bench.session.sink.take_all();
        bench
    }

    /// Runs one command; returns its success flag and report text.
    pub fn run(&mut self, command: Command) -> (bool, String) {
        let mut out = Vec::new();
        let ok = self.session.execute(&command, &mut out).unwrap();
        (ok, String::from_utf8(out).unwrap())
    }

    /// Takes the pending diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.session.sink.take_all()
    }

    /// Takes the pending diagnostics and returns the error codes in order.
    pub fn error_codes(&self) -> Vec<DiagnosticCode> {
        self.diagnostics()
            .into_iter()
            .filter(|d| d.severity == Severity::Error)
            .map(|d| d.code)
            .collect()
    }

    /// Renders the pending diagnostics without taking them.
    pub fn render(&self) -> String {
        let renderer = TerminalRenderer::new(false);
        self.session
            .sink
            .diagnostics()
            .iter()
            .map(|d| renderer.render(d, &self.session.source_db))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
