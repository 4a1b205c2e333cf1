//! Imprinting: rewriting an overlapping pair so that the overlap region
//! becomes a child of the larger solid and is removed from the smaller one.

use crate::config::ImprintConfig;
use crate::document::Document;
use crate::driver::{BoolDriver, DriverError, PartsOutcome};
use crate::errors::EngineError;
use clearcut_kernel::Kernel;
use log::{info, warn};
use rustc_hash::FxHashSet as HashSet;

/// The outcome of imprinting one pair.
#[derive(Clone, Debug)]
pub enum ImprintStatus<S> {
    /// the pair could not be imprinted; both slots stay untouched
    Failed,
    /// the pair shares no volume; nothing to do
    Distinct,
    /// the overlap was merged into the first solid of the pair
    MergeIntoShape(S, S),
    /// the overlap was merged into the second solid of the pair
    MergeIntoTool(S, S),
}

/// Imprints one pair: pave-fill, COMMON, CUT, CUT21, then FUSE of the
/// common region into the larger solid. The smaller of the two cut volumes
/// identifies the smaller solid. Inputs are never mutated; the replacement
/// pair is returned by value.
pub fn imprint_pair<K: Kernel>(
    kernel: &K,
    shape: &K::Shape,
    tool: &K::Shape,
    config: &ImprintConfig,
) -> Result<ImprintStatus<K::Shape>, EngineError> {
    let driver = BoolDriver::new(kernel, config.tolerance, config.time_per_pair);
    let recipe = || -> Result<ImprintStatus<K::Shape>, DriverError> {
        let paved = driver.pave_fill(shape, tool)?;
        if !paved.common_has_solids()? {
            return Ok(ImprintStatus::Distinct);
        }
        let parts = match paved.boolean_parts()? {
            PartsOutcome::NearCoincident => return Ok(ImprintStatus::Distinct),
            PartsOutcome::Parts(parts) => parts,
        };
        // the solid that loses the overlap is the one with the smaller
        // remainder; the common region is fused back into the other
        Ok(match parts.vol_cut >= parts.vol_cut21 {
            true => ImprintStatus::MergeIntoShape(
                driver.fuse(&parts.cut, &parts.common)?,
                parts.cut21,
            ),
            false => ImprintStatus::MergeIntoTool(
                parts.cut,
                driver.fuse(&parts.cut21, &parts.common)?,
            ),
        })
    };
    match recipe() {
        Ok(status) => Ok(status),
        Err(DriverError::NegativeVolume(volume)) => Err(EngineError::NegativeVolume(volume)),
        Err(error) => {
            warn!("imprint recipe failed: {error}");
            Ok(ImprintStatus::Failed)
        }
    }
}

/// Totals of one imprinting pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImprintOutcome {
    /// pairs whose slots were rewritten
    pub applied: usize,
    /// pairs that turned out distinct
    pub distinct: usize,
    /// pairs that failed; a non-zero count withholds the stage output
    pub failed: usize,
}

impl ImprintOutcome {
    /// Converts the totals into the stage result: any failed pair refuses
    /// the output.
    pub fn into_result(self) -> Result<Self, EngineError> {
        match self.failed {
            0 => Ok(self),
            failed => Err(EngineError::ImprintFailures(failed)),
        }
    }
}

/// Applies the consumed pair list to the document, sequentially and in the
/// supplied order. Processing order determines the final shape when three
/// or more solids overlap; callers wanting reproducibility sort the list by
/// `(i, j)` first.
pub fn imprint_document<K: Kernel>(
    kernel: &K,
    document: &mut Document<K::Shape>,
    pairs: &[(usize, usize)],
    config: &ImprintConfig,
) -> Result<ImprintOutcome, EngineError> {
    config.validate()?;
    let mut seen = HashSet::default();
    for &(i, j) in pairs {
        for index in [i, j] {
            if index >= document.len() {
                return Err(EngineError::PairIndexOutOfRange {
                    index,
                    len: document.len(),
                });
            }
        }
        if !seen.insert((i, j)) {
            return Err(EngineError::DuplicatePair { i, j });
        }
    }
    let mut outcome = ImprintOutcome::default();
    for &(i, j) in pairs {
        let status = {
            let (shape, tool) = (&document.shapes()[i], &document.shapes()[j]);
            imprint_pair(kernel, shape, tool, config)?
        };
        match status {
            ImprintStatus::Failed => {
                warn!("pair ({i}, {j}) left untouched after a failed imprint");
                outcome.failed += 1;
            }
            ImprintStatus::Distinct => outcome.distinct += 1,
            ImprintStatus::MergeIntoShape(shape, tool)
            | ImprintStatus::MergeIntoTool(shape, tool) => {
                document.replace(i, shape)?;
                document.replace(j, tool)?;
                outcome.applied += 1;
            }
        }
    }
    info!(
        "imprinting done: {} applied, {} distinct, {} failed",
        outcome.applied, outcome.distinct, outcome.failed,
    );
    Ok(outcome)
}
