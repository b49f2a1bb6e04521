//! Configuration types deserialized from `checker.toml`.

use serde::Deserialize;
use std::path::PathBuf;

/// The top-level checker configuration.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct CheckerConfig {
    /// Steiner-tree engine settings.
    #[serde(default)]
    pub flute: FluteConfig,
    /// Device limits enforced by the legality checks.
    #[serde(default)]
    pub limits: LimitsConfig,
    /// Report layout settings.
    #[serde(default)]
    pub report: ReportConfig,
}

/// Where the FLUTE lookup tables come from.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LutSourceKind {
    /// `file` when both table files exist, `exact` otherwise.
    #[default]
    Auto,
    /// No tables; small nets are solved exactly on the Hanan grid.
    Exact,
    /// Read `powv_file` and `post_file`.
    File,
    /// Decode the base64 chunks listed in `powv_base64` and `post_base64`.
    Embedded,
    /// Load both the files and the base64 chunks and require them to agree.
    Checked,
}

/// `[flute]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FluteConfig {
    /// Work/optimality trade-off for nets above the table degree, 1..=9.
    pub accuracy: u32,
    /// Lookup-table source.
    pub lut_source: LutSourceKind,
    /// Wirelength-vector table file.
    pub powv_file: PathBuf,
    /// Steiner-topology table file.
    pub post_file: PathBuf,
    /// Text files holding base64 chunks of the wirelength-vector table, one chunk per line.
    pub powv_base64: Vec<PathBuf>,
    /// Text files holding base64 chunks of the topology table, one chunk per line.
    pub post_base64: Vec<PathBuf>,
    /// Merge pins with identical coordinates before building a tree.
    pub remove_duplicate_pin: bool,
    /// Run Steiner-point refinement on merged trees when `accuracy >= 5`.
    pub local_refinement: bool,
}

impl Default for FluteConfig {
    fn default() -> Self {
        Self {
            accuracy: 3,
            lut_source: LutSourceKind::Auto,
            powv_file: PathBuf::from("../FLUTE_LIB/powv9.dat"),
            post_file: PathBuf::from("../FLUTE_LIB/post9.dat"),
            powv_base64: Vec::new(),
            post_base64: Vec::new(),
            remove_duplicate_pin: false,
            local_refinement: true,
        }
    }
}

impl FluteConfig {
    /// The table source `auto` settles on, or the configured one.
    pub fn effective_lut_source(&self) -> LutSourceKind {
        match self.lut_source {
            LutSourceKind::Auto if self.powv_file.is_file() && self.post_file.is_file() => {
                LutSourceKind::File
            }
            LutSourceKind::Auto => LutSourceKind::Exact,
            kind => kind,
        }
    }
}

/// `[limits]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct LimitsConfig {
    /// Distinct clock nets per PLB bank.
    pub max_clock_per_bank: usize,
    /// Distinct reset nets per PLB bank.
    pub max_reset_per_bank: usize,
    /// Distinct clock-enable nets per PLB bank.
    pub max_ce_per_bank: usize,
    /// Distinct clock nets per clock region.
    pub max_region_clock_nets: usize,
    /// Distinct input nets two LUTs sharing a slot may use.
    pub max_lut_inputs: usize,
    /// Input pins of a PLB, the denominator of the pin-density input column.
    pub max_tile_pin_inputs: usize,
    /// Output pins of a PLB, the denominator of the pin-density output column.
    pub max_tile_pin_outputs: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_clock_per_bank: 1,
            max_reset_per_bank: 1,
            max_ce_per_bank: 2,
            max_region_clock_nets: 28,
            max_lut_inputs: 6,
            max_tile_pin_inputs: 112,
            max_tile_pin_outputs: 32,
        }
    }
}

/// `[report]` section.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct ReportConfig {
    /// Fraction of used PLB tiles averaged by the pin-density report.
    pub pin_density_top_fraction: f64,
    /// Rows printed by the pin-density report.
    pub pin_density_rows: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            pin_density_top_fraction: 0.05,
            pin_density_rows: 10,
        }
    }
}
