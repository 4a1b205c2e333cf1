//! Pair discovery: an oriented-bounding-box pre-filter over all pairs, a
//! parallel classification pass, and a single consumer loop that reports
//! rows as pairs complete.

use crate::classify::{classify_intersection, IntersectStatus};
use crate::config::OverlapConfig;
use crate::document::Document;
use crate::errors::EngineError;
use crate::pool::WorkerPool;
use crate::report::{PairClass, PairRow};
use clearcut_base::obb::Obb;
use clearcut_kernel::{Kernel, KernelError};
use log::{debug, info, warn};
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::{Duration, Instant};

const HEARTBEAT: Duration = Duration::from_secs(5);

/// Totals of one overlap-checking pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ScanSummary {
    /// all pairs of the document
    pub pairs: usize,
    /// pairs that survived the bounding-box pre-filter
    pub candidates: usize,
    /// classified distinct
    pub distinct: usize,
    /// classified touching
    pub touch: usize,
    /// classified overlapping within the accepted ratio
    pub overlap: usize,
    /// classified overlapping beyond the accepted ratio
    pub bad_overlap: usize,
    /// pairs whose ladder was exhausted
    pub failed: usize,
    /// pairs whose pave-fill timed out
    pub timeout: usize,
}

impl ScanSummary {
    /// Returns whether the scan found nothing that should fail the stage:
    /// no failed pair, no timed-out pair, no overlap beyond the ratio.
    pub fn is_clean(&self) -> bool {
        self.failed == 0 && self.timeout == 0 && self.bad_overlap == 0
    }
}

struct PrePass {
    bounds: Vec<Obb>,
    volumes: Vec<f64>,
}

/// Computes every shape's oriented bounding box and volume in parallel
/// through a barrier group.
fn pre_pass<K: Kernel + 'static>(
    kernel: &Arc<K>,
    shapes: &[K::Shape],
    pool: &WorkerPool,
) -> Result<PrePass, EngineError> {
    type Slot = Result<(Obb, f64), KernelError>;
    let results: Arc<Mutex<Vec<Option<Slot>>>> =
        Arc::new(Mutex::new(vec![None; shapes.len()]));
    let barrier = pool.barrier();
    for (index, shape) in shapes.iter().enumerate() {
        let kernel = Arc::clone(kernel);
        let shape = shape.clone();
        let results = Arc::clone(&results);
        barrier.submit(move || {
            let slot = kernel
                .oriented_bbox(&shape)
                .and_then(|obb| Ok((obb, kernel.volume(&shape)?)));
            results.lock()[index] = Some(slot);
        });
    }
    barrier.wait();
    let results = Arc::into_inner(results)
        .expect("barrier tasks released their result handles")
        .into_inner();
    let mut pre = PrePass {
        bounds: Vec::with_capacity(shapes.len()),
        volumes: Vec::with_capacity(shapes.len()),
    };
    for (index, slot) in results.into_iter().enumerate() {
        let (obb, volume) = slot.expect("barrier waited for every slot")?;
        if volume < 0.0 {
            return Err(EngineError::NegativeVolume(volume));
        }
        debug!("solid {index}: volume {volume:.6}");
        pre.bounds.push(obb);
        pre.volumes.push(volume);
    }
    Ok(pre)
}

/// Runs the overlap-checking pass over the whole document.
///
/// Candidate pairs are enumerated in lexicographic order and dispatched to
/// the pool; `on_row` observes one row per non-distinct pair in completion
/// order. A progress line is logged on a fixed interval while results
/// drain.
pub fn scan_overlaps<K: Kernel + 'static>(
    kernel: &Arc<K>,
    document: &Document<K::Shape>,
    config: &OverlapConfig,
    pool: &WorkerPool,
    mut on_row: impl FnMut(&PairRow),
) -> Result<ScanSummary, EngineError> {
    config.validate()?;
    let shapes = document.shapes();
    let pre = pre_pass(kernel, shapes, pool)?;
    let mut summary = ScanSummary::default();

    let map = pool.async_map::<(usize, usize, Result<IntersectStatus, EngineError>)>();
    for x in 1..shapes.len() {
        for y in 0..x {
            summary.pairs += 1;
            let near = !pre.bounds[y]
                .enlarged(config.bbox_clearance)
                .is_disjoint(&pre.bounds[x].enlarged(config.bbox_clearance));
            if !near {
                continue;
            }
            summary.candidates += 1;
            let kernel = Arc::clone(kernel);
            let (a, b) = (shapes[y].clone(), shapes[x].clone());
            let ladder = config.ladder.clone();
            let timeout = config.time_per_pair;
            map.submit(move || {
                let status = classify_intersection(&*kernel, &a, &b, &ladder, timeout);
                (y, x, status)
            });
        }
    }

    let mut done = 0usize;
    let mut last_beat = Instant::now();
    while let Some((i, j, status)) = map.get() {
        done += 1;
        match status? {
            IntersectStatus::Distinct => summary.distinct += 1,
            IntersectStatus::Touching => {
                summary.touch += 1;
                on_row(&PairRow {
                    i,
                    j,
                    class: PairClass::Touch,
                    volumes: None,
                });
            }
            IntersectStatus::Overlap { vol_common, .. } => {
                let smaller = f64::min(pre.volumes[i], pre.volumes[j]);
                let class = match vol_common > config.max_common_volume_ratio * smaller {
                    true => {
                        summary.bad_overlap += 1;
                        PairClass::BadOverlap
                    }
                    false => {
                        summary.overlap += 1;
                        PairClass::Overlap
                    }
                };
                on_row(&PairRow {
                    i,
                    j,
                    class,
                    volumes: Some((vol_common, pre.volumes[i], pre.volumes[j])),
                });
            }
            IntersectStatus::Failed => {
                warn!("pair ({i}, {j}) failed on every rung of the ladder");
                summary.failed += 1;
            }
            IntersectStatus::Timeout => {
                warn!("pair ({i}, {j}) timed out during pave-fill");
                summary.timeout += 1;
            }
        }
        if last_beat.elapsed() >= HEARTBEAT {
            info!("classified {done}/{} candidate pairs", summary.candidates);
            last_beat = Instant::now();
        }
    }
    info!(
        "overlap scan done: {} pairs, {} candidates, {} distinct, {} touch, {} overlap, \
         {} bad_overlap, {} failed, {} timeout",
        summary.pairs,
        summary.candidates,
        summary.distinct,
        summary.touch,
        summary.overlap,
        summary.bad_overlap,
        summary.failed,
        summary.timeout,
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockKernel, MockShape};

    fn scan(
        kernel: MockKernel,
        count: usize,
        config: &OverlapConfig,
    ) -> (ScanSummary, Vec<PairRow>) {
        let kernel = Arc::new(kernel);
        let document = Document::new(vec![MockShape::Input; count]);
        let pool = WorkerPool::new(2);
        let mut rows = Vec::new();
        let summary = scan_overlaps(&kernel, &document, config, &pool, |row| rows.push(*row))
            .unwrap();
        (summary, rows)
    }

    #[test]
    fn every_pair_is_enumerated_once() {
        let (summary, rows) = scan(MockKernel::distinct(), 5, &OverlapConfig::default());
        assert_eq!(summary.pairs, 10);
        assert_eq!(summary.candidates, 10);
        assert_eq!(summary.distinct, 10);
        assert!(rows.is_empty());
        assert!(summary.is_clean());
    }

    #[test]
    fn overlap_ratio_splits_good_from_bad() {
        // input volume 10, ratio 0.01: anything above 0.1 is bad
        let mut config = OverlapConfig::default();
        config.max_common_volume_ratio = 0.01;
        let (summary, rows) = scan(MockKernel::volumes(0.05, 4.0, 5.0), 2, &config);
        assert_eq!(summary.overlap, 1);
        assert_eq!(summary.bad_overlap, 0);
        assert_eq!(rows[0].class, PairClass::Overlap);
        assert_eq!(rows[0].volumes, Some((0.05, 10.0, 10.0)));
        assert!(summary.is_clean());

        let (summary, rows) = scan(MockKernel::volumes(0.2, 4.0, 5.0), 2, &config);
        assert_eq!(summary.bad_overlap, 1);
        assert_eq!(rows[0].class, PairClass::BadOverlap);
        assert!(!summary.is_clean());
    }

    #[test]
    fn failures_and_timeouts_spoil_the_scan() {
        let kernel = MockKernel::distinct().fail_at(0.001).fail_at(0.0);
        let (summary, _) = scan(kernel, 3, &OverlapConfig::default());
        assert_eq!(summary.failed, 3);
        assert!(!summary.is_clean());

        let (summary, _) = scan(MockKernel::timing_out(), 2, &OverlapConfig::default());
        assert_eq!(summary.timeout, 1);
        assert!(!summary.is_clean());
    }

    #[test]
    fn invalid_config_is_rejected_before_work() {
        let kernel = Arc::new(MockKernel::distinct());
        let document = Document::new(vec![MockShape::Input; 2]);
        let pool = WorkerPool::new(1);
        let mut config = OverlapConfig::default();
        config.bbox_clearance = -1.0;
        let err = scan_overlaps(&kernel, &document, &config, &pool, |_| {}).unwrap_err();
        assert!(matches!(err, EngineError::Config(_)));
    }
}
