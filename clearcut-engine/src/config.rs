use crate::errors::ConfigError;
use std::time::Duration;

/// The default fuzzy-tolerance retry ladder.
pub const DEFAULT_LADDER: [f64; 2] = [0.001, 0.0];

fn check_tolerance(value: f64) -> Result<(), ConfigError> {
    match value < 0.0 || !value.is_finite() {
        true => Err(ConfigError::NegativeTolerance(value)),
        false => Ok(()),
    }
}

fn check_threads(threads: usize) -> Result<(), ConfigError> {
    match (1..=1024).contains(&threads) {
        true => Ok(()),
        false => Err(ConfigError::ThreadCount(threads)),
    }
}

/// Knobs of the overlap-checking stage.
#[derive(Clone, Debug)]
pub struct OverlapConfig {
    /// worker count, 1..=1024
    pub threads: usize,
    /// clearance added to every oriented bounding box before the
    /// disjointness pre-filter
    pub bbox_clearance: f64,
    /// the fuzzy-tolerance retry ladder, tried in order
    pub ladder: Vec<f64>,
    /// overlaps beyond this share of the smaller solid are `bad_overlap`
    pub max_common_volume_ratio: f64,
    /// wall-clock budget of one pave-fill
    pub time_per_pair: Option<Duration>,
}

impl Default for OverlapConfig {
    fn default() -> Self {
        Self {
            threads: std::thread::available_parallelism().map_or(1, |n| n.get().min(1024)),
            bbox_clearance: 0.5,
            ladder: DEFAULT_LADDER.to_vec(),
            max_common_volume_ratio: 0.01,
            time_per_pair: Some(Duration::from_secs(60)),
        }
    }
}

impl OverlapConfig {
    /// Rejects impossible configuration before any work starts.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_threads(self.threads)?;
        if self.bbox_clearance < 0.0 || !self.bbox_clearance.is_finite() {
            return Err(ConfigError::NegativeClearance(self.bbox_clearance));
        }
        if self.ladder.is_empty() {
            return Err(ConfigError::EmptyLadder);
        }
        self.ladder.iter().try_for_each(|&tol| check_tolerance(tol))?;
        let ratio = self.max_common_volume_ratio;
        match ratio > 0.0 && ratio < 1.0 {
            true => Ok(()),
            false => Err(ConfigError::RatioOutOfRange(ratio)),
        }
    }
}

/// Knobs of the imprinting stage.
#[derive(Clone, Debug)]
pub struct ImprintConfig {
    /// fuzzy value of the imprint recipe
    pub tolerance: f64,
    /// wall-clock budget of one pave-fill
    pub time_per_pair: Option<Duration>,
}

impl Default for ImprintConfig {
    fn default() -> Self {
        Self {
            tolerance: 0.001,
            time_per_pair: Some(Duration::from_secs(60)),
        }
    }
}

impl ImprintConfig {
    /// Rejects impossible configuration before any work starts.
    pub fn validate(&self) -> Result<(), ConfigError> { check_tolerance(self.tolerance) }
}

/// Knobs of the merging stage.
#[derive(Clone, Debug)]
pub struct MergeConfig {
    /// coincidence tolerance of the clustering stages
    pub tolerance: f64,
}

impl Default for MergeConfig {
    fn default() -> Self { Self { tolerance: 0.001 } }
}

impl MergeConfig {
    /// Rejects impossible configuration before any work starts.
    pub fn validate(&self) -> Result<(), ConfigError> { check_tolerance(self.tolerance) }
}
