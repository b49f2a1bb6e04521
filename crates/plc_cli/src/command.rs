//! Script commands and their parsing.

use plc_diagnostics::{Diagnostic, DiagnosticCode};
use plc_source::Record;
use std::path::PathBuf;

/// One line of a checker script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Load the cell library, site map and clock regions.
    ReadArch {
        /// `.lib` file.
        lib: PathBuf,
        /// `.scl` file.
        scl: PathBuf,
        /// `.clk` file.
        clk: PathBuf,
    },
    /// Load instances, nets and timing-critical pins.
    ReadDesign {
        /// Node file.
        nodes: PathBuf,
        /// Net file.
        nets: PathBuf,
        /// Timing file.
        timing: PathBuf,
    },
    /// Load the optimized placement.
    ReadOutput {
        /// Output node file.
        nodes: PathBuf,
    },
    /// Print the tile-type histogram.
    ReportArch,
    /// Print instance and net statistics.
    ReportDesign,
    /// Run every legality check on both placements.
    LegalCheck,
    /// Print total wirelength for both placements.
    ReportWirelength,
    /// Print the densest tiles for both placements.
    ReportPinDensity,
    /// Print the clock-region grid and one region's nets.
    ReportClockRegion {
        /// Region column.
        col: i32,
        /// Region row.
        row: i32,
    },
    /// Print one tile in detail.
    ReportTile {
        /// Tile column.
        col: i32,
        /// Tile row.
        row: i32,
    },
    /// Print one net in detail.
    ReportNet {
        /// `net_<id>`.
        name: String,
    },
    /// Stop the script.
    Exit,
}

/// Command keyword, argument count and usage line.
const COMMANDS: &[(&str, usize, &str)] = &[
    ("read_arch", 3, "read_arch <*.lib> <*.scl> <*.clk>"),
    ("read_design", 3, "read_design <input_node_file> <input_net_file> <timing_file>"),
    ("read_output", 1, "read_output <output_node_file>"),
    ("report_arch", 0, "report_arch"),
    ("report_design", 0, "report_design"),
    ("legal_check", 0, "legal_check"),
    ("report_wirelength", 0, "report_wirelength"),
    ("report_pin_density", 0, "report_pin_density"),
    ("report_clock_region", 2, "report_clock_region <col> <row>"),
    ("report_tile", 2, "report_tile <col> <row>"),
    ("report_net", 1, "report_net <net_name>"),
    ("exit", 0, "exit"),
];

fn parse_coord(record: &Record<'_>, index: usize) -> Result<i32, Diagnostic> {
    let text = record.text(index).unwrap_or_default();
    text.parse().map_err(|_| {
        Diagnostic::error(
            DiagnosticCode::MALFORMED_LINE,
            format!("invalid coordinate `{text}`"),
            record.span_of(index),
        )
        .with_label("expected an integer")
    })
}

impl Command {
    /// Parses a script record, returning the error to report on failure.
    pub fn parse(record: &Record<'_>) -> Result<Command, Diagnostic> {
        let keyword = record.keyword();
        let Some(&(_, arity, usage)) = COMMANDS.iter().find(|(name, _, _)| *name == keyword) else {
            return Err(Diagnostic::error(
                DiagnosticCode::UNKNOWN_KEYWORD,
                format!("invalid command `{keyword}`"),
                record.span_of(0),
            ));
        };
        if record.len() != arity + 1 {
            return Err(Diagnostic::error(
                DiagnosticCode::UNKNOWN_KEYWORD,
                format!("`{keyword}` takes {arity} argument(s), found {}", record.len() - 1),
                record.span,
            )
            .with_help(format!("usage: {usage}")));
        }
        let path = |index: usize| PathBuf::from(record.text(index).unwrap_or_default());

        let command = match keyword {
            "read_arch" => Command::ReadArch {
                lib: path(1),
                scl: path(2),
                clk: path(3),
            },
            "read_design" => Command::ReadDesign {
                nodes: path(1),
                nets: path(2),
                timing: path(3),
            },
            "read_output" => Command::ReadOutput { nodes: path(1) },
            "report_arch" => Command::ReportArch,
            "report_design" => Command::ReportDesign,
            "legal_check" => Command::LegalCheck,
            "report_wirelength" => Command::ReportWirelength,
            "report_pin_density" => Command::ReportPinDensity,
            "report_clock_region" => Command::ReportClockRegion {
                col: parse_coord(record, 1)?,
                row: parse_coord(record, 2)?,
            },
            "report_tile" => Command::ReportTile {
                col: parse_coord(record, 1)?,
                row: parse_coord(record, 2)?,
            },
            "report_net" => Command::ReportNet {
                name: record.text(1).unwrap_or_default().to_string(),
            },
            _ => Command::Exit,
        };
        Ok(command)
    }
}
