//! Idempotent, timeout-bounded wrappers over the kernel's pave filler and
//! boolean operations. Input shapes are never mutated; replacement shapes
//! are returned by value together with the operation reports.

use clearcut_kernel::{Kernel, KernelError, OpReport, ProgressScope};
use log::debug;
use std::time::Duration;
use thiserror::Error;

/// The workaround threshold for a negative COMMON volume: magnitudes up to
/// this share of the smaller cut volume reclassify the pair as touching.
pub const NEGATIVE_COMMON_RATIO: f64 = 0.1;

/// Failures of one driven boolean call.
#[derive(Debug, Error)]
pub enum DriverError {
    /// the pave-fill deadline passed; terminal for the pair, never retried
    #[error("pave-fill timed out")]
    Timeout,
    /// a recoverable kernel failure; the caller may retry on the next rung
    #[error(transparent)]
    Kernel(KernelError),
    /// a negative COMMON volume beyond the workaround threshold
    #[error("negative common volume {0} exceeds the workaround threshold")]
    NegativeCommon(f64),
    /// a negative non-common volume; indicates kernel misuse and aborts the
    /// stage
    #[error("kernel returned negative volume {0} from a cut operation")]
    NegativeVolume(f64),
}

impl From<KernelError> for DriverError {
    fn from(error: KernelError) -> Self {
        match error {
            KernelError::Cancelled => DriverError::Timeout,
            other => DriverError::Kernel(other),
        }
    }
}

impl DriverError {
    /// Returns whether the failure aborts the whole stage rather than the
    /// pair.
    pub fn is_fatal(&self) -> bool { matches!(self, DriverError::NegativeVolume(_)) }
}

/// The boolean parts of one filled pair, with their volumes.
#[derive(Clone, Debug)]
pub struct BooleanParts<S> {
    /// the COMMON shape
    pub common: S,
    /// first minus second
    pub cut: S,
    /// second minus first
    pub cut21: S,
    /// volume of `common`, clamped to zero inside the workaround band
    pub vol_common: f64,
    /// volume of `cut`
    pub vol_cut: f64,
    /// volume of `cut21`
    pub vol_cut21: f64,
}

/// Outcome of evaluating the boolean parts of a filled pair.
#[derive(Clone, Debug)]
pub enum PartsOutcome<S> {
    /// the pair genuinely overlaps
    Parts(BooleanParts<S>),
    /// the COMMON volume was negative within the workaround band: the two
    /// solids have near-coincident faces inside the fuzzy band and the pair
    /// is touching, not overlapping
    NearCoincident,
}

/// A pave-filled pair, ready for the boolean operations.
pub struct Paved<'k, K: Kernel> {
    kernel: &'k K,
    pave: K::Pave,
    /// the pave-fill report
    pub report: OpReport,
}

impl<K: Kernel> std::fmt::Debug for Paved<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Paved").field("report", &self.report).finish_non_exhaustive()
    }
}

/// Timeout-bounded driver over one kernel.
pub struct BoolDriver<'k, K> {
    kernel: &'k K,
    fuzzy: f64,
    timeout: Option<Duration>,
}

impl<K> Clone for BoolDriver<'_, K> {
    fn clone(&self) -> Self { *self }
}

impl<K> Copy for BoolDriver<'_, K> {}

impl<K> std::fmt::Debug for BoolDriver<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoolDriver")
            .field("fuzzy", &self.fuzzy)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl<'k, K: Kernel> BoolDriver<'k, K> {
    /// Creates a driver applying `fuzzy` and `timeout` to every pave-fill.
    pub fn new(kernel: &'k K, fuzzy: f64, timeout: Option<Duration>) -> Self {
        Self {
            kernel,
            fuzzy,
            timeout,
        }
    }

    /// The fuzzy value this driver applies.
    #[inline(always)]
    pub fn fuzzy(&self) -> f64 { self.fuzzy }

    /// Runs the timed pave-fill of `(a, b)`. Once this has completed, the
    /// later operations run untimed; paving dominates their cost.
    pub fn pave_fill(&self, a: &K::Shape, b: &K::Shape) -> Result<Paved<'k, K>, DriverError> {
        let scope = ProgressScope::with_optional_timeout(self.timeout);
        let (pave, report) = self.kernel.pave_fill(a, b, self.fuzzy, &scope)?;
        debug!(
            "pave-fill done in {:.3}s (fuzzy {})",
            report.elapsed.as_secs_f64(),
            report.fuzzy_used,
        );
        Ok(Paved {
            kernel: self.kernel,
            pave,
            report,
        })
    }

    /// Fuses two interior-disjoint shapes, untimed.
    pub fn fuse(&self, a: &K::Shape, b: &K::Shape) -> Result<K::Shape, DriverError> {
        let scope = ProgressScope::unbounded();
        let (shape, _) = self.kernel.fuse(a, b, self.fuzzy, &scope)?;
        Ok(shape)
    }
}

impl<K: Kernel> Paved<'_, K> {
    /// The COMMON of the filled pair.
    pub fn common(&self) -> Result<K::Shape, DriverError> {
        Ok(self.kernel.common(&self.pave)?.0)
    }

    /// Returns whether the COMMON of the filled pair contains any solid.
    pub fn common_has_solids(&self) -> Result<bool, DriverError> {
        Ok(self.kernel.has_solids(&self.common()?))
    }

    /// Returns whether the SECTION of the filled pair carries any vertex.
    pub fn section_has_vertices(&self) -> Result<bool, DriverError> {
        let (section, _) = self.kernel.section(&self.pave)?;
        Ok(self.kernel.section_has_vertices(&section))
    }

    /// Runs COMMON, CUT and CUT21 and evaluates their volumes, applying the
    /// negative-COMMON workaround.
    pub fn boolean_parts(&self) -> Result<PartsOutcome<K::Shape>, DriverError> {
        let (common, _) = self.kernel.common(&self.pave)?;
        let (cut, _) = self.kernel.cut(&self.pave)?;
        let (cut21, _) = self.kernel.cut21(&self.pave)?;
        let vol_cut = non_negative(self.kernel.volume(&cut)?)?;
        let vol_cut21 = non_negative(self.kernel.volume(&cut21)?)?;
        let vol_common = self.kernel.volume(&common)?;
        if vol_common < 0.0 {
            // near-coincident faces inside the fuzzy band make the kernel
            // report a small negative intersection
            let threshold = NEGATIVE_COMMON_RATIO * f64::min(vol_cut, vol_cut21);
            return match vol_common.abs() <= threshold {
                true => Ok(PartsOutcome::NearCoincident),
                false => Err(DriverError::NegativeCommon(vol_common)),
            };
        }
        Ok(PartsOutcome::Parts(BooleanParts {
            common,
            cut,
            cut21,
            vol_common,
            vol_cut,
            vol_cut21,
        }))
    }
}

fn non_negative(volume: f64) -> Result<f64, DriverError> {
    match volume < 0.0 {
        true => Err(DriverError::NegativeVolume(volume)),
        false => Ok(volume),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockKernel, MockShape};

    #[test]
    fn negative_common_threshold_is_pinned_at_ten_percent() {
        // cut volumes 10 and 20: the workaround must accept -1.0 and
        // reject anything beyond
        let kernel = MockKernel::volumes(-1.0, 10.0, 20.0);
        let driver = BoolDriver::new(&kernel, 0.0, None);
        let paved = driver.pave_fill(&MockShape::Input, &MockShape::Input).unwrap();
        assert!(matches!(
            paved.boolean_parts().unwrap(),
            PartsOutcome::NearCoincident,
        ));

        let kernel = MockKernel::volumes(-1.0001, 10.0, 20.0);
        let driver = BoolDriver::new(&kernel, 0.0, None);
        let paved = driver.pave_fill(&MockShape::Input, &MockShape::Input).unwrap();
        assert!(matches!(
            paved.boolean_parts().unwrap_err(),
            DriverError::NegativeCommon(_),
        ));
    }

    #[test]
    fn negative_cut_volume_is_fatal() {
        let kernel = MockKernel::volumes(5.0, -0.5, 20.0);
        let driver = BoolDriver::new(&kernel, 0.0, None);
        let paved = driver.pave_fill(&MockShape::Input, &MockShape::Input).unwrap();
        let err = paved.boolean_parts().unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn cancelled_pave_fill_maps_to_timeout() {
        let kernel = MockKernel::timing_out();
        let driver = BoolDriver::new(&kernel, 0.0, Some(Duration::ZERO));
        assert!(matches!(
            driver.pave_fill(&MockShape::Input, &MockShape::Input).unwrap_err(),
            DriverError::Timeout,
        ));
    }
}
