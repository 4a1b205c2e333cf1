//! Fixed-size worker pool with two submission styles: a barrier group that
//! awaits completion of everything submitted through it, and an async map
//! that hands results back in completion order.
//!
//! The pool is the single parallelism primitive of the engine; the kernel
//! is required to stay single-threaded, so worker threads never compete
//! with kernel-internal parallelism.

use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::JoinHandle;

type Job = Box<dyn FnOnce() + Send + 'static>;

#[derive(Default)]
struct PoolState {
    queue: VecDeque<Job>,
    shutting_down: bool,
}

struct PoolShared {
    state: Mutex<PoolState>,
    job_ready: Condvar,
}

/// The fixed-size worker pool.
///
/// Dropping the pool is a join: the queue is drained, never discarded, and
/// every worker is joined before `drop` returns.
pub struct WorkerPool {
    shared: Arc<PoolShared>,
    workers: Vec<JoinHandle<()>>,
}

impl std::fmt::Debug for WorkerPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkerPool")
            .field("workers", &self.workers.len())
            .finish()
    }
}

impl WorkerPool {
    /// Spawns a pool of `threads` workers.
    pub fn new(threads: usize) -> Self {
        let shared = Arc::new(PoolShared {
            state: Mutex::new(PoolState::default()),
            job_ready: Condvar::new(),
        });
        let workers = (0..threads.max(1))
            .map(|index| {
                let shared = Arc::clone(&shared);
                std::thread::Builder::new()
                    .name(format!("clearcut-worker-{index}"))
                    .spawn(move || worker_loop(&shared))
                    .expect("failed to spawn worker thread")
            })
            .collect();
        Self { shared, workers }
    }

    /// The number of workers.
    #[inline(always)]
    pub fn worker_count(&self) -> usize { self.workers.len() }

    fn submit(&self, job: Job) {
        let mut state = self.shared.state.lock();
        state.queue.push_back(job);
        drop(state);
        self.shared.job_ready.notify_one();
    }

    /// Opens a barrier group. Tasks submitted through it run on the pool;
    /// `wait` returns once all of them have completed.
    pub fn barrier(&self) -> BarrierScope<'_> {
        BarrierScope {
            pool: self,
            state: Arc::new(CounterState {
                pending: Mutex::new(0),
                all_done: Condvar::new(),
            }),
        }
    }

    /// Opens an async map delivering results of type `T` in completion
    /// order.
    pub fn async_map<T: Send + 'static>(&self) -> AsyncMap<'_, T> {
        AsyncMap {
            pool: self,
            state: Arc::new(MapState {
                inner: Mutex::new(MapInner {
                    results: VecDeque::new(),
                    in_flight: 0,
                }),
                result_ready: Condvar::new(),
            }),
        }
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        {
            let mut state = self.shared.state.lock();
            state.shutting_down = true;
        }
        self.shared.job_ready.notify_all();
        for worker in self.workers.drain(..) {
            let _ = worker.join();
        }
    }
}

fn worker_loop(shared: &PoolShared) {
    loop {
        let job = {
            let mut state = shared.state.lock();
            loop {
                if let Some(job) = state.queue.pop_front() {
                    break job;
                }
                if state.shutting_down {
                    return;
                }
                shared.job_ready.wait(&mut state);
            }
        };
        job();
    }
}

struct CounterState {
    pending: Mutex<usize>,
    all_done: Condvar,
}

/// A group of tasks awaited together.
#[derive(Debug)]
#[must_use = "a barrier group must be waited on"]
pub struct BarrierScope<'a> {
    pool: &'a WorkerPool,
    state: Arc<CounterState>,
}

impl std::fmt::Debug for CounterState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CounterState").finish_non_exhaustive()
    }
}

impl BarrierScope<'_> {
    /// Submits one task into the group.
    pub fn submit(&self, task: impl FnOnce() + Send + 'static) {
        *self.state.pending.lock() += 1;
        let state = Arc::clone(&self.state);
        self.pool.submit(Box::new(move || {
            task();
            let mut pending = state.pending.lock();
            *pending -= 1;
            if *pending == 0 {
                state.all_done.notify_all();
            }
        }));
    }

    /// Blocks until every submitted task has completed.
    pub fn wait(self) {
        let mut pending = self.state.pending.lock();
        while *pending > 0 {
            self.state.all_done.wait(&mut pending);
        }
    }
}

struct MapInner<T> {
    results: VecDeque<T>,
    in_flight: usize,
}

struct MapState<T> {
    inner: Mutex<MapInner<T>>,
    result_ready: Condvar,
}

/// Completion-order delivery of task results.
#[derive(Debug)]
pub struct AsyncMap<'a, T> {
    pool: &'a WorkerPool,
    state: Arc<MapState<T>>,
}

impl<T> std::fmt::Debug for MapState<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapState").finish_non_exhaustive()
    }
}

impl<T: Send + 'static> AsyncMap<'_, T> {
    /// Submits one task whose result will be delivered by `get`.
    pub fn submit(&self, task: impl FnOnce() -> T + Send + 'static) {
        self.state.inner.lock().in_flight += 1;
        let state = Arc::clone(&self.state);
        self.pool.submit(Box::new(move || {
            let result = task();
            let mut inner = state.inner.lock();
            inner.results.push_back(result);
            inner.in_flight -= 1;
            drop(inner);
            state.result_ready.notify_one();
        }));
    }

    /// Blocks for the next completed result. Returns `None` once no task is
    /// in flight and no result is buffered.
    pub fn get(&self) -> Option<T> {
        let mut inner = self.state.inner.lock();
        loop {
            if let Some(result) = inner.results.pop_front() {
                return Some(result);
            }
            if inner.in_flight == 0 {
                return None;
            }
            self.state.result_ready.wait(&mut inner);
        }
    }

    /// Returns whether no work is in flight and no result is buffered.
    pub fn is_empty(&self) -> bool {
        let inner = self.state.inner.lock();
        inner.results.is_empty() && inner.in_flight == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[test]
    fn barrier_completes_all_tasks() {
        let pool = WorkerPool::new(4);
        let counter = Arc::new(AtomicUsize::new(0));
        let barrier = pool.barrier();
        for _ in 0..100 {
            let counter = Arc::clone(&counter);
            barrier.submit(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            });
        }
        barrier.wait();
        assert_eq!(counter.load(Ordering::SeqCst), 100);
    }

    #[test]
    fn async_map_delivers_every_result_once() {
        let pool = WorkerPool::new(3);
        let map = pool.async_map::<usize>();
        for i in 0..50 {
            map.submit(move || {
                if i % 7 == 0 {
                    std::thread::sleep(Duration::from_millis(2));
                }
                i
            });
        }
        let mut seen = Vec::new();
        while let Some(result) = map.get() {
            seen.push(result);
        }
        assert!(map.is_empty());
        seen.sort_unstable();
        assert_eq!(seen, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn drop_joins_and_drains() {
        let counter = Arc::new(AtomicUsize::new(0));
        {
            let pool = WorkerPool::new(2);
            let barrier = pool.barrier();
            for _ in 0..20 {
                let counter = Arc::clone(&counter);
                barrier.submit(move || {
                    std::thread::sleep(Duration::from_millis(1));
                    counter.fetch_add(1, Ordering::SeqCst);
                });
            }
            barrier.wait();
        }
        // the pool joined on drop, nothing may run after this point
        assert_eq!(counter.load(Ordering::SeqCst), 20);
    }

    #[test]
    fn empty_map_returns_none() {
        let pool = WorkerPool::new(1);
        let map = pool.async_map::<()>();
        assert!(map.is_empty());
        assert!(map.get().is_none());
    }
}
