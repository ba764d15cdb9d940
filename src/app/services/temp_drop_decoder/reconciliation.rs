//! Position fix reconciliation
//!
//! Part A and Part B transmit the launch position independently; the two
//! fixes should agree. After all lines are processed, a single present fix
//! is copied into the missing slot (a documented fallback, not an error),
//! and a disagreement between two present fixes is recorded as a
//! verification flag on the report, never as a decode failure.

use crate::app::models::{PositionVerification, Report};
use tracing::{debug, warn};

/// Reconcile the Part A / Part B position fixes and set the verification flag
pub fn reconcile_position_fixes(report: &mut Report) {
    report.verification = match (&report.part_a_fix, &report.part_b_fix) {
        (None, None) => PositionVerification::BothAbsent,
        (Some(fix_a), None) => {
            debug!("Part B fix absent; filling from Part A");
            report.part_b_fix = Some(fix_a.clone());
            PositionVerification::FilledFromA
        }
        (None, Some(fix_b)) => {
            debug!("Part A fix absent; filling from Part B");
            report.part_a_fix = Some(fix_b.clone());
            PositionVerification::FilledFromB
        }
        (Some(fix_a), Some(fix_b)) => {
            if fix_a.same_position(fix_b) {
                PositionVerification::Consistent
            } else {
                warn!(
                    "Part A / Part B position mismatch: ({}, {}) vs ({}, {})",
                    fix_a.latitude, fix_a.longitude, fix_b.latitude, fix_b.longitude
                );
                PositionVerification::Mismatch
            }
        }
    };
}
