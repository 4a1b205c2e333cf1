//! Per-pair intersection classification with a fuzzy-tolerance retry
//! ladder.
//!
//! ```text
//! start → pave-fill(ε_k)
//!   timeout      → Timeout (terminal, no retry)
//!   filler error → next ε in the ladder; exhausted → Failed
//!   filler ok    → COMMON
//!                  any solid?  yes → CUT, CUT21 → Overlap
//!                              no  → SECTION
//!                                    any vertex? yes → Touching
//!                                                no  → Distinct
//! ```

use crate::driver::{BoolDriver, DriverError, PartsOutcome};
use crate::errors::EngineError;
use clearcut_kernel::Kernel;
use log::{debug, warn};
use std::time::Duration;

/// The classification of one solid pair.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum IntersectStatus {
    /// every rung of the ladder failed
    Failed,
    /// pave-fill ran out of its wall-clock budget
    Timeout,
    /// no contact within the fuzzy band
    Distinct,
    /// contact without shared volume
    Touching,
    /// shared volume
    Overlap {
        /// volume of the common region
        vol_common: f64,
        /// volume of the first solid minus the second
        vol_cut_i: f64,
        /// volume of the second solid minus the first
        vol_cut_j: f64,
    },
}

/// Classifies the intersection of `(a, b)`, retrying down the fuzzy ladder.
///
/// The first rung that does not fail determines the outcome; every retry
/// restarts paving from scratch. Only a negative non-common volume is
/// fatal; everything else is recovered into the returned status.
pub fn classify_intersection<K: Kernel>(
    kernel: &K,
    a: &K::Shape,
    b: &K::Shape,
    ladder: &[f64],
    timeout: Option<Duration>,
) -> Result<IntersectStatus, EngineError> {
    for &fuzzy in ladder {
        let driver = BoolDriver::new(kernel, fuzzy, timeout);
        match classify_once(&driver, a, b) {
            Ok(status) => return Ok(status),
            Err(DriverError::Timeout) => {
                debug!("pave-fill timed out at fuzzy {fuzzy}");
                return Ok(IntersectStatus::Timeout);
            }
            Err(DriverError::NegativeVolume(volume)) => {
                return Err(EngineError::NegativeVolume(volume));
            }
            Err(error) => {
                warn!("classification failed at fuzzy {fuzzy}: {error}; retrying");
            }
        }
    }
    Ok(IntersectStatus::Failed)
}

fn classify_once<K: Kernel>(
    driver: &BoolDriver<'_, K>,
    a: &K::Shape,
    b: &K::Shape,
) -> Result<IntersectStatus, DriverError> {
    let paved = driver.pave_fill(a, b)?;
    if !paved.common_has_solids()? {
        return match paved.section_has_vertices()? {
            true => Ok(IntersectStatus::Touching),
            false => Ok(IntersectStatus::Distinct),
        };
    }
    match paved.boolean_parts()? {
        PartsOutcome::NearCoincident => Ok(IntersectStatus::Touching),
        PartsOutcome::Parts(parts) => Ok(IntersectStatus::Overlap {
            vol_common: parts.vol_common,
            vol_cut_i: parts.vol_cut,
            vol_cut_j: parts.vol_cut21,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockKernel, MockShape};

    const LADDER: [f64; 2] = [0.001, 0.0];

    fn classify(kernel: &MockKernel) -> IntersectStatus {
        classify_intersection(kernel, &MockShape::Input, &MockShape::Input, &LADDER, None)
            .unwrap()
    }

    #[test]
    fn overlap_carries_part_volumes() {
        let status = classify(&MockKernel::volumes(3.0, 10.0, 20.0));
        assert_eq!(
            status,
            IntersectStatus::Overlap {
                vol_common: 3.0,
                vol_cut_i: 10.0,
                vol_cut_j: 20.0,
            },
        );
    }

    #[test]
    fn touching_and_distinct() {
        assert_eq!(classify(&MockKernel::touching()), IntersectStatus::Touching);
        assert_eq!(classify(&MockKernel::distinct()), IntersectStatus::Distinct);
    }

    #[test]
    fn first_non_failing_rung_decides() {
        let kernel = MockKernel::volumes(3.0, 10.0, 20.0).fail_at(0.001);
        assert_eq!(
            classify(&kernel),
            IntersectStatus::Overlap {
                vol_common: 3.0,
                vol_cut_i: 10.0,
                vol_cut_j: 20.0,
            },
        );
    }

    #[test]
    fn exhausted_ladder_is_failed() {
        let kernel = MockKernel::distinct().fail_at(0.001).fail_at(0.0);
        assert_eq!(classify(&kernel), IntersectStatus::Failed);
    }

    #[test]
    fn timeout_is_terminal_and_never_retried() {
        // were the timeout retried, the second rung would succeed
        let kernel = MockKernel::timing_out();
        assert_eq!(classify(&kernel), IntersectStatus::Timeout);
    }

    #[test]
    fn near_coincident_common_is_touching() {
        let kernel = MockKernel::volumes(-0.5, 10.0, 20.0);
        assert_eq!(classify(&kernel), IntersectStatus::Touching);
    }

    #[test]
    fn negative_cut_volume_aborts() {
        let kernel = MockKernel::volumes(1.0, -2.0, 20.0);
        let result = classify_intersection(
            &kernel,
            &MockShape::Input,
            &MockShape::Input,
            &LADDER,
            None,
        );
        assert!(matches!(result, Err(EngineError::NegativeVolume(_))));
    }
}
