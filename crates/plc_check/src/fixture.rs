//! In-memory devices and designs for unit tests.

use plc_arch::{ClockRegion, Device, LibCell, LibPin, PinDir, PinProp, TileType};
use plc_common::{InstId, Location, NetId, Placement};
use plc_config::LimitsConfig;
use plc_design::{Design, Instance, Net, PinRef};
use plc_diagnostics::{DiagnosticCode, DiagnosticSink};

pub(crate) struct Fixture {
    pub device: Device,
    pub design: Design,
    pub sink: DiagnosticSink,
    pub limits: LimitsConfig,
}

/// A library cell for `model`: `LUTk` has `k` data inputs, `SEQ` has data,
/// clock, clock-enable and reset inputs, anything else two data inputs.
pub(crate) fn cell(model: &str) -> LibCell {
    let pin = |name: String, prop| LibPin { name, prop };
    let props: Vec<PinProp> = match model {
        "SEQ" => vec![PinProp::None, PinProp::Clock, PinProp::Ce, PinProp::Reset],
        m if m.starts_with("LUT") => {
            let k = m[3..].trim_end_matches('X').parse().unwrap_or(6);
            vec![PinProp::None; k]
        }
        _ => vec![PinProp::None; 2],
    };
    LibCell {
        name: model.to_string(),
        inputs: props
            .into_iter()
            .enumerate()
            .map(|(i, prop)| pin(format!("I_{i}"), prop))
            .collect(),
        outputs: vec![pin("O_0".to_string(), PinProp::None)],
    }
}

impl Fixture {
    /// A `cols x rows` grid of PLB tiles inside one clock region.
    pub fn plb_grid(cols: i32, rows: i32) -> Self {
        let mut device = Device::new(cols, rows);
        for tile in device.tiles_mut() {
            tile.add_type(TileType::Plb).unwrap();
        }
        device.reset_clock_regions(1, 1);
        *device.clock_region_mut(0, 0).unwrap() = ClockRegion::new(0, cols - 1, 0, rows - 1);
        Self {
            device,
            design: Design::new(),
            sink: DiagnosticSink::new(),
            limits: LimitsConfig::default(),
        }
    }

    /// Adds an instance at the same location in both placements.
    pub fn place(&mut self, id: u32, model: &str, (col, row, z): (i32, i32, i32)) -> InstId {
        let id = InstId::from_raw(id);
        let mut inst = Instance::new(id, &cell(model), false, Location::new(col, row, z));
        inst.location = inst.base_location;
        assert!(self.design.insert_instance(inst));
        id
    }

    /// Moves an instance in the optimized placement.
    pub fn move_to(&mut self, id: InstId, (col, row, z): (i32, i32, i32)) {
        self.design.instance_mut(id).unwrap().location = Location::new(col, row, z);
    }

    /// Adds a net driven by output 0 of `driver` and reaching the given
    /// `(instance, input index)` pins.
    pub fn connect(&mut self, id: u32, driver: Option<InstId>, fanouts: &[(InstId, usize)], clock: bool) -> NetId {
        let id = NetId::from_raw(id);
        let mut net = Net::new(id, clock);
        net.driver = driver.map(|inst| PinRef::new(inst, PinDir::Output, 0));
        net.fanouts = fanouts
            .iter()
            .map(|&(inst, index)| PinRef::new(inst, PinDir::Input, index))
            .collect();
        for pin in net.pins().collect::<Vec<_>>() {
            self.design.pin_mut(pin).unwrap().net = Some(id);
        }
        net.intra_tile = self.design.is_intra_tile(&net, Placement::Baseline);
        assert!(self.design.insert_net(net));
        id
    }

    /// Marks an input pin timing-critical.
    pub fn critical(&mut self, inst: InstId, index: usize) {
        self.design
            .pin_mut(PinRef::new(inst, PinDir::Input, index))
            .unwrap()
            .timing_critical = true;
    }

    /// Codes of the errors emitted so far.
    pub fn error_codes(&self) -> Vec<DiagnosticCode> {
        self.sink
            .diagnostics()
            .iter()
            .filter(|d| d.severity.is_error())
            .map(|d| d.code)
            .collect()
    }
}

/// Captures a report into a string.
pub(crate) fn capture(f: impl FnOnce(&mut Vec<u8>)) -> String {
    let mut buf = Vec::new();
    f(&mut buf);
    String::from_utf8(buf).unwrap()
}
