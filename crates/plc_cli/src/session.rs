//! The checker session: every loaded input plus the engines that read it.

use crate::command::Command;
use crate::error::SessionError;
use plc_arch::{load_clock_regions, load_library, load_site_map, report_arch, Device, Library};
use plc_check::{legal_check, report_clock_region, report_net, report_pin_density, report_tile, report_wirelength};
use plc_config::{load_config, CheckerConfig, FluteConfig, LutSourceKind, CONFIG_FILE_NAME};
use plc_design::{load_nets, load_nodes, load_output, load_timing, report_design, Design};
use plc_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink};
use plc_flute::{CheckedLutSource, EmbeddedLutSource, FileLutSource, Flute, FluteOptions};
use plc_source::{FileId, SourceDb, Span};
use std::io::Write;
use std::path::Path;

/// Picks the configuration: an explicit file, else `checker.toml` next to the
/// script, else the defaults.
pub fn resolve_config(explicit: Option<&Path>, script: &Path) -> Result<CheckerConfig, SessionError> {
    if let Some(path) = explicit {
        return Ok(load_config(path)?);
    }
    let beside = script
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(CONFIG_FILE_NAME);
    if beside.is_file() {
        Ok(load_config(&beside)?)
    } else {
        Ok(CheckerConfig::default())
    }
}

fn read_chunks(paths: &[std::path::PathBuf], mut add: impl FnMut(&str)) -> Result<(), SessionError> {
    for path in paths {
        let text = std::fs::read_to_string(path).map_err(|source| SessionError::Read {
            path: path.clone(),
            source,
        })?;
        text.lines().map(str::trim).filter(|l| !l.is_empty()).for_each(&mut add);
    }
    Ok(())
}

fn embedded_source(config: &FluteConfig) -> Result<EmbeddedLutSource, SessionError> {
    let mut source = EmbeddedLutSource::new();
    read_chunks(&config.powv_base64, |chunk| source.add_powv_chunk(chunk))?;
    read_chunks(&config.post_base64, |chunk| source.add_post_chunk(chunk))?;
    Ok(source)
}

/// Builds the Steiner tree engine selected by `[flute]`.
///
/// File tables are read lazily on first use; base64 chunk files are read here.
pub fn build_flute(config: &FluteConfig) -> Result<Flute, SessionError> {
    let options = FluteOptions {
        accuracy: config.accuracy as usize,
        remove_duplicate_pin: config.remove_duplicate_pin,
        local_refinement: config.local_refinement,
    };
    let files = || FileLutSource::new(&config.powv_file, &config.post_file);
    let flute = match config.effective_lut_source() {
        LutSourceKind::Auto | LutSourceKind::Exact => Flute::new(options),
        LutSourceKind::File => Flute::with_source(options, Box::new(files())),
        LutSourceKind::Embedded => Flute::with_source(options, Box::new(embedded_source(config)?)),
        LutSourceKind::Checked => {
            let checked = CheckedLutSource::new(Box::new(files()), Box::new(embedded_source(config)?));
            Flute::with_source(options, Box::new(checked))
        }
    };
    Ok(flute)
}

/// Owns the inputs of one script run.
///
/// Loaders replace the library, device and design wholesale; checks and
/// reports only read them, apart from the per-placement slot and clock-net
/// state they rebuild on every run.
pub struct Session {
    /// Every file read so far, for diagnostic rendering.
    pub source_db: SourceDb,
    /// Diagnostics not yet rendered.
    pub sink: DiagnosticSink,
    config: CheckerConfig,
    library: Option<Library>,
    device: Option<Device>,
    design: Option<Design>,
    flute: Flute,
}

impl Session {
    /// Creates an empty session.
    pub fn new(config: CheckerConfig) -> Result<Self, SessionError> {
        let flute = build_flute(&config.flute)?;
        Ok(Self {
            source_db: SourceDb::new(),
            sink: DiagnosticSink::new(),
            config,
            library: None,
            device: None,
            design: None,
            flute,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// The loaded device, if `read_arch` succeeded.
    pub fn device(&self) -> Option<&Device> {
        self.device.as_ref()
    }

    /// The loaded design, if `read_design` ran.
    pub fn design(&self) -> Option<&Design> {
        self.design.as_ref()
    }

    /// Reads an input file, reporting it if it cannot be opened.
    fn load(&mut self, path: &Path) -> Option<FileId> {
        match self.source_db.load_file(path) {
            Ok(id) => Some(id),
            Err(err) => {
                self.sink.emit(Diagnostic::error(
                    DiagnosticCode::UNREADABLE_FILE,
                    format!("failed to open {}: {err}", path.display()),
                    Span::DUMMY,
                ));
                None
            }
        }
    }

    fn load_all<const N: usize>(&mut self, paths: [&Path; N]) -> Option<[FileId; N]> {
        let ids = paths.map(|path| self.load(path));
        if ids.iter().any(Option::is_none) {
            return None;
        }
        Some(ids.map(|id| id.unwrap_or(FileId::DUMMY)))
    }

    fn require_library(&self) -> bool {
        if self.library.is_some() {
            return true;
        }
        self.sink.emit(
            Diagnostic::error(DiagnosticCode::MISSING_INPUT, "no cell library loaded", Span::DUMMY)
                .with_help("run `read_arch` first"),
        );
        false
    }

    /// Reports missing inputs; returns `true` if everything needed is loaded.
    fn require(&self, arch: bool, design: bool) -> bool {
        let mut ok = true;
        if arch && self.device.is_none() {
            self.sink.emit(
                Diagnostic::error(DiagnosticCode::MISSING_INPUT, "no architecture loaded", Span::DUMMY)
                    .with_help("run `read_arch` first"),
            );
            ok = false;
        }
        if design && self.design.is_none() {
            self.sink.emit(
                Diagnostic::error(DiagnosticCode::MISSING_INPUT, "no design loaded", Span::DUMMY)
                    .with_help("run `read_design` first"),
            );
            ok = false;
        }
        ok
    }

    /// Loads the cell library, site map and clock regions from files already
    /// in [`Session::source_db`], replacing any earlier architecture.
    pub fn load_arch(&mut self, [lib, scl, clk]: [FileId; 3], out: &mut dyn Write) -> Result<bool, SessionError> {
        let mark = self.sink.checkpoint();
        let library = load_library(self.source_db.get_file(lib), &self.sink);
        let device = load_site_map(self.source_db.get_file(scl), &self.sink).map(|mut device| {
            load_clock_regions(&mut device, self.source_db.get_file(clk), &self.sink);
            device
        });
        self.library = Some(library);
        self.device = device;
        let ok = self.device.is_some() && self.sink.errors_since(mark) == 0;
        if ok {
            writeln!(out, "  Successfully read architecture files.")?;
        }
        Ok(ok)
    }

    /// Loads instances, nets and timing-critical pins, replacing any earlier
    /// design. Needs a cell library.
    pub fn load_design(&mut self, [nodes, nets, timing]: [FileId; 3], out: &mut dyn Write) -> Result<bool, SessionError> {
        if !self.require_library() {
            return Ok(false);
        }
        let Some(library) = self.library.as_ref() else {
            return Ok(false);
        };
        let mark = self.sink.checkpoint();
        let mut design = Design::new();
        load_nodes(&mut design, library, self.source_db.get_file(nodes), &self.sink);
        load_nets(&mut design, self.source_db.get_file(nets), &self.sink);
        load_timing(&mut design, self.source_db.get_file(timing), &self.sink);
        self.design = Some(design);
        let ok = self.sink.errors_since(mark) == 0;
        if ok {
            writeln!(out, "  Successfully read design files.")?;
        }
        Ok(ok)
    }

    /// Loads the optimized placement and prints the instance statistics.
    pub fn load_output(&mut self, nodes: FileId, out: &mut dyn Write) -> Result<bool, SessionError> {
        if !self.require(false, true) {
            return Ok(false);
        }
        let Some(design) = self.design.as_mut() else {
            return Ok(false);
        };
        let mark = self.sink.checkpoint();
        let stats = load_output(design, self.source_db.get_file(nodes), &self.sink);
        stats.write_to(out)?;
        let ok = self.sink.errors_since(mark) == 0;
        if ok {
            writeln!(out, "  Successfully read output file.")?;
        }
        Ok(ok)
    }

    /// Runs one command, writing its report to `out`.
    ///
    /// Returns `Ok(false)` when the command failed; the reasons are in
    /// [`Session::sink`].
    pub fn execute(&mut self, command: &Command, out: &mut dyn Write) -> Result<bool, SessionError> {
        match command {
            Command::ReadArch { lib, scl, clk } => {
                return match self.load_all([lib.as_path(), scl.as_path(), clk.as_path()]) {
                    Some(files) => self.load_arch(files, out),
                    None => Ok(false),
                };
            }
            Command::ReadDesign { nodes, nets, timing } => {
                if !self.require_library() {
                    return Ok(false);
                }
                return match self.load_all([nodes.as_path(), nets.as_path(), timing.as_path()]) {
                    Some(files) => self.load_design(files, out),
                    None => Ok(false),
                };
            }
            Command::ReadOutput { nodes } => {
                if !self.require(false, true) {
                    return Ok(false);
                }
                return match self.load_all([nodes.as_path()]) {
                    Some([file]) => self.load_output(file, out),
                    None => Ok(false),
                };
            }
            Command::Exit => return Ok(true),
            _ => {}
        }

        let needs_arch = !matches!(
            command,
            Command::ReportDesign | Command::ReportWirelength | Command::ReportNet { .. }
        );
        let needs_design = !matches!(command, Command::ReportArch);
        if !self.require(needs_arch, needs_design) {
            return Ok(false);
        }

        let limits = &self.config.limits;
        let sink = &self.sink;
        let ok = match command {
            Command::ReportArch => match &self.device {
                Some(device) => {
                    report_arch(device, out)?;
                    true
                }
                None => false,
            },
            Command::ReportDesign => match &self.design {
                Some(design) => {
                    report_design(design, out)?;
                    true
                }
                None => false,
            },
            Command::ReportWirelength => match &self.design {
                Some(design) => {
                    report_wirelength(design, &mut self.flute, out)?;
                    true
                }
                None => false,
            },
            Command::ReportNet { name } => match &self.design {
                Some(design) => report_net(design, name, &mut self.flute, out, sink)?,
                None => false,
            },
            _ => {
                let (Some(device), Some(design)) = (self.device.as_mut(), self.design.as_ref()) else {
                    return Ok(false);
                };
                match command {
                    Command::LegalCheck => legal_check(device, design, limits, out, sink)?,
                    Command::ReportPinDensity => {
                        report_pin_density(device, design, limits, &self.config.report, out)?;
                        true
                    }
                    Command::ReportClockRegion { col, row } => {
                        report_clock_region(device, design, limits, *col, *row, out, sink)?
                    }
                    Command::ReportTile { col, row } => report_tile(device, design, *col, *row, out, sink)?,
                    _ => false,
                }
            }
        };
        Ok(ok)
    }
}
