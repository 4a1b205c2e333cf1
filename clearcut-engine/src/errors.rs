use clearcut_kernel::KernelError;
use thiserror::Error;

/// Configuration rejected before any work starts.
#[derive(Clone, Copy, PartialEq, Debug, Error)]
pub enum ConfigError {
    /// a fuzzy tolerance below zero
    #[error("tolerance must be non-negative, got {0}")]
    NegativeTolerance(f64),
    /// an empty retry ladder
    #[error("the tolerance ladder must contain at least one value")]
    EmptyLadder,
    /// a volume ratio outside the open unit interval
    #[error("max common volume ratio must lie in (0, 1), got {0}")]
    RatioOutOfRange(f64),
    /// a worker count outside 1..=1024
    #[error("thread count must lie in 1..=1024, got {0}")]
    ThreadCount(usize),
    /// a bounding-box clearance below zero
    #[error("bbox clearance must be non-negative, got {0}")]
    NegativeClearance(f64),
}

/// Errors that abort a stage.
#[derive(Debug, Error)]
pub enum EngineError {
    /// invalid configuration
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// a pair row refers to a slot outside the document
    #[error("pair index {index} out of range for a document of {len} solids")]
    PairIndexOutOfRange {
        /// the offending index
        index: usize,
        /// the document size
        len: usize,
    },
    /// the same pair was supplied twice to the imprinter
    #[error("duplicate pair ({i}, {j}) in the imprint input")]
    DuplicatePair {
        /// first ordinal
        i: usize,
        /// second ordinal
        j: usize,
    },
    /// a non-common kernel volume came back negative, which indicates
    /// kernel misuse rather than bad input geometry
    #[error("kernel returned negative volume {0} outside the common workaround")]
    NegativeVolume(f64),
    /// a fatal kernel failure outside the per-pair recovery discipline
    #[error(transparent)]
    Kernel(#[from] KernelError),
    /// imprinting finished with failed pairs; the stage output is withheld
    #[error("{0} pair(s) failed imprinting")]
    ImprintFailures(usize),
    /// the final same-parameter fix could not reconcile an edge
    #[error("same-parameter fix failed: {0}")]
    SameParameter(String),
}
