//! The `legal_check` command: every legality check on both placements.

use crate::capacity::check_capacity;
use crate::clock_region::check_clock_region;
use crate::control_set::check_control_set;
use crate::error::CheckError;
use crate::project::project;
use plc_arch::Device;
use plc_common::Placement;
use plc_config::LimitsConfig;
use plc_design::Design;
use plc_diagnostics::DiagnosticSink;
use std::io::Write;

/// Runs projection and the capacity, control-set and clock-region checks on
/// the baseline and the optimized placement.
///
/// Every check runs even after a failure so all violations are reported.
/// Returns `Ok(true)` if no check failed.
pub fn legal_check(
    device: &mut Device,
    design: &Design,
    limits: &LimitsConfig,
    out: &mut dyn Write,
    sink: &DiagnosticSink,
) -> Result<bool, CheckError> {
    let mut failed = 0;

    writeln!(out, "  1.1 Check instance location and tile capacity.")?;
    for placement in Placement::ALL {
        let misplaced = project(device, design, placement);
        for problem in &misplaced {
            sink.emit(problem.to_diagnostic(placement));
        }
        let overflowing = check_capacity(device, design, placement, limits.max_lut_inputs, sink);
        if misplaced.is_empty() && overflowing == 0 {
            writeln!(out, "        {} placement passed capacity check.", placement.title())?;
        } else {
            failed += 1;
        }
    }

    writeln!(out, "  1.2 Check control set constraint.")?;
    for placement in Placement::ALL {
        writeln!(out, "        {} placement:", placement.title())?;
        if check_control_set(device, design, placement, limits, out, sink)? == 0 {
            writeln!(out, "        {} placement passed control set check.", placement.title())?;
        } else {
            failed += 1;
        }
    }

    writeln!(out, "  1.3 Check clock region constraint.")?;
    for placement in Placement::ALL {
        writeln!(out, "        {} placement:", placement.title())?;
        if check_clock_region(device, design, placement, limits, out, sink)? > 0 {
            failed += 1;
        }
    }

    if failed > 0 {
        writeln!(out, "  LegalCheck failed with {failed} errors.")?;
        Ok(false)
    } else {
        writeln!(out, "  Legalization check passed.")?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::{capture, Fixture};
    use plc_arch::SlotKind;
    use plc_diagnostics::DiagnosticCode;

    fn run(fx: &mut Fixture) -> (bool, String) {
        let mut ok = false;
        let text = capture(|out| {
            ok = legal_check(&mut fx.device, &fx.design, &fx.limits, out, &fx.sink).unwrap();
        });
        (ok, text)
    }

    #[test]
    fn empty_plb_passes() {
        let mut fx = Fixture::plb_grid(1, 1);
        let (ok, text) = run(&mut fx);
        assert!(ok);
        assert!(!fx.sink.has_errors());
        assert!(text.contains("Baseline placement passed capacity check."));
        assert!(text.contains("Optimized placement passed control set check."));
        assert!(text.ends_with("  Legalization check passed.\n"));
    }

    #[test]
    fn failures_in_one_placement_are_counted() {
        let mut fx = Fixture::plb_grid(1, 1);
        let a = fx.place(1, "SEQ", (0, 0, 0));
        fx.place(2, "SEQ", (0, 0, 1));
        fx.move_to(a, (0, 0, 1));
        let (ok, text) = run(&mut fx);
        assert!(!ok);
        assert!(text.contains("Baseline placement passed capacity check."));
        assert!(!text.contains("Optimized placement passed capacity check."));
        assert!(text.ends_with("  LegalCheck failed with 1 errors.\n"));
        assert_eq!(fx.error_codes(), vec![DiagnosticCode::CAPACITY_OVERFLOW]);
    }

    #[test]
    fn unplaced_instances_fail_projection() {
        let mut fx = Fixture::plb_grid(1, 1);
        let a = fx.place(1, "LUT1", (0, 0, 0));
        fx.move_to(a, (-1, -1, -1));
        let (ok, _) = run(&mut fx);
        assert!(!ok);
        assert_eq!(fx.error_codes(), vec![DiagnosticCode::UNPLACED_INSTANCE]);
    }

    #[test]
    fn running_twice_gives_the_same_report() {
        let mut fx = Fixture::plb_grid(2, 1);
        let ff = fx.place(1, "SEQ", (0, 0, 0));
        let lut = fx.place(2, "LUT2", (1, 0, 0));
        fx.connect(3, Some(lut), &[(ff, 1)], true);
        fx.move_to(ff, (1, 0, 4));

        let (first_ok, first) = run(&mut fx);
        let slots_after_first = fx.device.tile(1, 0).unwrap().slots(SlotKind::Seq).unwrap().to_vec();
        let regions_after_first = fx.device.clock_regions().to_vec();
        let (second_ok, second) = run(&mut fx);
        assert_eq!(first_ok, second_ok);
        assert_eq!(first, second);
        assert_eq!(fx.device.tile(1, 0).unwrap().slots(SlotKind::Seq).unwrap(), slots_after_first.as_slice());
        assert_eq!(fx.device.clock_regions(), regions_after_first.as_slice());
    }
}
