//! Per-net and total wirelength.
//!
//! Timing-critical fanouts are measured as direct driver-to-sink Manhattan
//! distances. The remaining fanouts and the driver are joined by a
//! rectilinear Steiner tree.

use crate::error::CheckError;
use plc_common::Placement;
use plc_design::{Design, Net};
use plc_flute::{Flute, FluteError, Point};
use std::collections::BTreeSet;
use std::io::Write;

fn point_of(design: &Design, pin: plc_design::PinRef, placement: Placement) -> Option<Point> {
    design
        .pin_location(pin, placement)
        .map(|loc| Point::new(loc.col, loc.row))
}

fn is_critical(design: &Design, pin: plc_design::PinRef) -> bool {
    design.pin(pin).is_some_and(|pin| pin.timing_critical)
}

/// Sum of driver-to-sink distances over the distinct positions of the
/// timing-critical fanouts. Zero without a driver.
pub fn critical_wirelength(design: &Design, net: &Net, placement: Placement) -> i64 {
    let Some(driver) = net.driver.and_then(|pin| point_of(design, pin, placement)) else {
        return 0;
    };
    let sinks: BTreeSet<Point> = net
        .fanouts
        .iter()
        .filter(|&&pin| is_critical(design, pin))
        .filter_map(|&pin| point_of(design, pin, placement))
        .collect();
    sinks.into_iter().map(|sink| driver.dist(sink)).sum()
}

/// The distinct positions of the driver and the non-critical fanouts, sorted.
/// Empty without a driver.
pub fn rsmt_points(design: &Design, net: &Net, placement: Placement) -> Vec<Point> {
    let Some(driver) = net.driver.and_then(|pin| point_of(design, pin, placement)) else {
        return Vec::new();
    };
    let mut points = BTreeSet::from([driver]);
    points.extend(
        net.fanouts
            .iter()
            .filter(|&&pin| !is_critical(design, pin))
            .filter_map(|&pin| point_of(design, pin, placement)),
    );
    points.into_iter().collect()
}

/// Length of the Steiner tree over [`rsmt_points`]; zero for one point or none.
pub fn non_critical_wirelength(
    design: &Design,
    net: &Net,
    placement: Placement,
    flute: &mut Flute,
) -> Result<i64, FluteError> {
    let points = rsmt_points(design, net, placement);
    if points.len() <= 1 {
        return Ok(0);
    }
    flute.wirelength(&points)
}

/// Wirelength summed over the non-clock nets of a design.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WirelengthTotals {
    /// Critical plus non-critical length.
    pub total: i64,
    /// Critical length alone.
    pub critical: i64,
}

impl WirelengthTotals {
    /// Critical share of the total in percent; zero when the total is zero.
    pub fn critical_percent(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            100.0 * self.critical as f64 / self.total as f64
        }
    }
}

/// Sums both wirelength parts over every non-clock net.
pub fn total_wirelength(design: &Design, placement: Placement, flute: &mut Flute) -> Result<WirelengthTotals, FluteError> {
    let mut totals = WirelengthTotals::default();
    for net in design.nets().filter(|net| !net.clock) {
        let critical = critical_wirelength(design, net, placement);
        totals.critical += critical;
        totals.total += critical + non_critical_wirelength(design, net, placement, flute)?;
    }
    Ok(totals)
}

/// Prints the totals of the baseline and the optimized placement.
pub fn report_wirelength(design: &Design, flute: &mut Flute, out: &mut dyn Write) -> Result<(), CheckError> {
    for placement in Placement::ALL {
        let totals = total_wirelength(design, placement, flute)?;
        writeln!(out, "  {}:", placement.title())?;
        writeln!(
            out,
            "  Total wirelength = {}; Crit = {} ({:.2}%)",
            totals.total,
            totals.critical,
            totals.critical_percent()
        )?;
    }
    Ok(())
}
