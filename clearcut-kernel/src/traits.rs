use rustc_hash::FxHashMap as HashMap;
use std::time::{Duration, Instant};
use thiserror::Error;

/// The phases of one boolean-operation call.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Phase {
    /// the pave-fill precomputation
    PaveFill,
    /// COMMON
    Common,
    /// CUT, first minus second
    Cut,
    /// CUT21, second minus first
    Cut21,
    /// SECTION
    Section,
    /// FUSE
    Fuse,
}

/// free-function conversion for logging
pub fn phase_name(phase: Phase) -> &'static str {
    match phase {
        Phase::PaveFill => "pave-fill",
        Phase::Common => "common",
        Phase::Cut => "cut",
        Phase::Cut21 => "cut21",
        Phase::Section => "section",
        Phase::Fuse => "fuse",
    }
}

/// Metadata returned with every kernel operation.
#[derive(Clone, Debug, Default)]
pub struct OpReport {
    /// the fuzzy value the kernel actually applied
    pub fuzzy_used: f64,
    /// warnings raised, counted per phase
    pub warning_counts: HashMap<Phase, u32>,
    /// wall clock spent in the operation
    pub elapsed: Duration,
}

impl OpReport {
    /// Creates a report for an operation started at `start`.
    pub fn finish(fuzzy_used: f64, start: Instant) -> Self {
        Self {
            fuzzy_used,
            warning_counts: HashMap::default(),
            elapsed: start.elapsed(),
        }
    }

    /// Total warnings over all phases.
    pub fn warning_total(&self) -> u32 { self.warning_counts.values().sum() }
}

/// Per-call cancellation scope. The kernel polls `should_stop` from its
/// progress callback; the deadline is wall clock.
#[derive(Clone, Copy, Debug, Default)]
pub struct ProgressScope {
    deadline: Option<Instant>,
}

impl ProgressScope {
    /// A scope that never cancels.
    pub const fn unbounded() -> Self { Self { deadline: None } }

    /// A scope that cancels `timeout` from now.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// A scope that cancels `timeout` from now, if given.
    pub fn with_optional_timeout(timeout: Option<Duration>) -> Self {
        match timeout {
            Some(timeout) => Self::with_timeout(timeout),
            None => Self::unbounded(),
        }
    }

    /// Polled by the kernel between units of work.
    #[inline(always)]
    pub fn should_stop(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Returns `KernelError::Cancelled` once the deadline has passed.
    #[inline(always)]
    pub fn check(&self) -> Result<(), KernelError> {
        match self.should_stop() {
            true => Err(KernelError::Cancelled),
            false => Ok(()),
        }
    }
}

/// Errors surfaced by a kernel binding.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum KernelError {
    /// the progress scope reported cancel during pave-fill
    #[error("operation cancelled by its progress scope")]
    Cancelled,
    /// an operation phase returned an error status
    #[error("kernel {phase} phase failed: {message}")]
    Failed {
        /// the phase that failed
        phase: &'static str,
        /// kernel diagnostic
        message: String,
    },
    /// the kernel cannot represent the input geometry
    #[error("unsupported geometry: {0}")]
    Unsupported(String),
    /// the minimum-distance query did not converge
    #[error("distance query failed")]
    DistanceFailed,
    /// a topological constraint was violated while building the result
    #[error(transparent)]
    Topology(#[from] clearcut_topology::errors::Error),
}

/// kernel operation result: payload plus report
pub type OpResult<T> = Result<(T, OpReport), KernelError>;

/// Kinds of defects the validity checker reports.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Defect {
    /// a boundary shell is not closed
    OpenShell,
    /// a boundary shell is closed but inconsistently oriented
    MisorientedShell,
    /// the shape contains no solid
    Empty,
}

/// Validity report of one shape.
#[derive(Clone, Debug, Default)]
pub struct Validity {
    /// the defects found, empty for a valid shape
    pub defects: Vec<Defect>,
}

impl Validity {
    /// Returns whether no defect was found.
    #[inline(always)]
    pub fn is_valid(&self) -> bool { self.defects.is_empty() }
}

/// The binding surface the cleanup engine requires of a CAD kernel.
///
/// One `pave_fill` precomputes the intersection structure of a pair; the
/// boolean operations consume the filled pair. Implementations must not
/// mutate input shapes, must not spawn their own worker threads, and must
/// poll the progress scope during paving.
pub trait Kernel: Send + Sync {
    /// the shapes this kernel operates on
    type Shape: Clone + Send + Sync + 'static;
    /// the pave-fill precomputation of one pair
    type Pave: Send;
    /// the result of a SECTION, queried only for vertex content
    type Section: Send;

    /// Shared precomputation for the boolean operations on `(a, b)`.
    fn pave_fill(
        &self,
        a: &Self::Shape,
        b: &Self::Shape,
        fuzzy: f64,
        scope: &ProgressScope,
    ) -> OpResult<Self::Pave>;

    /// The COMMON (intersection) of the filled pair; may be empty.
    fn common(&self, pave: &Self::Pave) -> OpResult<Self::Shape>;

    /// The CUT (first minus second) of the filled pair; may be empty.
    fn cut(&self, pave: &Self::Pave) -> OpResult<Self::Shape>;

    /// The CUT21 (second minus first) of the filled pair; may be empty.
    fn cut21(&self, pave: &Self::Pave) -> OpResult<Self::Shape>;

    /// The SECTION of the filled pair.
    fn section(&self, pave: &Self::Pave) -> OpResult<Self::Section>;

    /// Returns whether a section carries at least one vertex.
    fn section_has_vertices(&self, section: &Self::Section) -> bool;

    /// Fuses two interior-disjoint shapes into one.
    fn fuse(
        &self,
        a: &Self::Shape,
        b: &Self::Shape,
        fuzzy: f64,
        scope: &ProgressScope,
    ) -> OpResult<Self::Shape>;

    /// Returns whether the shape contains at least one solid.
    fn has_solids(&self, shape: &Self::Shape) -> bool;

    /// The raw volume of the shape. May be negative for degenerate kernel
    /// output; interpreting the sign is the caller's concern.
    fn volume(&self, shape: &Self::Shape) -> Result<f64, KernelError>;

    /// The minimum surface distance between two shapes.
    fn min_distance(&self, a: &Self::Shape, b: &Self::Shape) -> Result<f64, KernelError>;

    /// Fits an oriented bounding box to the shape.
    fn oriented_bbox(&self, shape: &Self::Shape) -> Result<clearcut_base::obb::Obb, KernelError>;

    /// Checks the structural validity of the shape.
    fn check(&self, shape: &Self::Shape) -> Validity;
}
