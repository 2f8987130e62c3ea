//! FIFO admission under a hard concurrency ceiling, plus batch drain.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use crossbeam::channel::{unbounded, Receiver, Sender};
use thiserror::Error;
use tracing::{debug, trace};

use super::executor::{self, WorkFn};
use super::job::{Job, JobReport};
use super::progress::{LineSink, ProgressAggregator, ProgressState};

/// Default concurrency ceiling when none is configured
pub const DEFAULT_CAPACITY: usize = 4;

/// Default capacity clamped to the machine: never more workers than cores.
pub fn suggested_capacity() -> usize {
    num_cpus::get().clamp(1, DEFAULT_CAPACITY)
}

/// Default supervision timeout for a single worker
pub const DEFAULT_WORKER_TIMEOUT: Duration = Duration::from_secs(300);

/// Configuration for the task pool, fixed at construction
#[derive(Debug, Clone)]
pub struct PoolConfig {
    /// Maximum number of jobs in flight at once (must be >= 1)
    pub capacity: usize,
    /// How long a worker may run before its slot is forcibly released
    pub worker_timeout: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
            worker_timeout: DEFAULT_WORKER_TIMEOUT,
        }
    }
}

#[derive(Debug, Error)]
pub enum PoolError {
    #[error("pool capacity must be at least 1 (got {0})")]
    InvalidCapacity(usize),
}

/// Bounded-concurrency task pool.
///
/// Owned and driven by a single coordinating thread: `submit` and `drain`
/// are the only mutation points, so pending-queue and in-flight bookkeeping
/// need no locking. Workers communicate back exclusively through the
/// completion channel.
pub struct TaskPool<P> {
    config: PoolConfig,
    work_fn: WorkFn<P>,
    pending: VecDeque<Job<P>>,
    in_flight: usize,
    completion_tx: Sender<JobReport>,
    completion_rx: Receiver<JobReport>,
    aggregator: Option<ProgressAggregator>,
    summary: ProgressState,
}

impl<P: Send + 'static> TaskPool<P> {
    /// Create a pool that runs `work_fn` for each submitted job, reporting
    /// progress lines to `sink`.
    pub fn new(config: PoolConfig, work_fn: WorkFn<P>, sink: LineSink) -> Result<Self, PoolError> {
        if config.capacity < 1 {
            return Err(PoolError::InvalidCapacity(config.capacity));
        }
        let (completion_tx, completion_rx) = unbounded();
        Ok(Self {
            config,
            work_fn,
            pending: VecDeque::new(),
            in_flight: 0,
            completion_tx,
            completion_rx,
            aggregator: Some(ProgressAggregator::spawn(sink)),
            summary: ProgressState::default(),
        })
    }

    /// Enqueue a job. Never blocks; the job starts as soon as a slot frees up.
    pub fn submit(&mut self, job: Job<P>) {
        // Completions may have arrived since the last call; reclaim their
        // slots so admission re-runs on both submit and completion events.
        self.reap_completions();
        trace!(job = %job.id, pending = self.pending.len() + 1, "job submitted");
        if let Some(aggregator) = &self.aggregator {
            aggregator.note_submitted();
        }
        self.pending.push_back(job);
        self.admit();
    }

    /// Block until every submitted job has produced exactly one report and
    /// nothing is pending or in flight, then return the final batch state.
    ///
    /// Draining an empty or already-drained pool returns immediately.
    pub fn drain(&mut self) -> ProgressState {
        while self.in_flight > 0 || !self.pending.is_empty() {
            self.admit();
            // in_flight > 0 here, so a report is guaranteed to arrive:
            // every admitted job releases its slot exactly once.
            match self.completion_rx.recv() {
                Ok(report) => self.on_completion(report),
                Err(_) => break,
            }
        }
        if let Some(aggregator) = self.aggregator.take() {
            self.summary = aggregator.finish();
            debug!(completed = self.summary.completed, "batch drained");
        }
        self.summary.clone()
    }

    /// Jobs currently executing
    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    /// Jobs waiting for a free slot
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    fn reap_completions(&mut self) {
        while let Ok(report) = self.completion_rx.try_recv() {
            self.on_completion(report);
        }
    }

    fn on_completion(&mut self, report: JobReport) {
        self.in_flight = self.in_flight.saturating_sub(1);
        debug!(job = %report.job_id, status = ?report.status, in_flight = self.in_flight, "job completed");
        if let Some(aggregator) = &self.aggregator {
            aggregator.deliver(report);
        }
        self.admit();
    }

    /// Pop pending jobs in submission order while headroom exists.
    fn admit(&mut self) {
        while self.in_flight < self.config.capacity {
            let Some(job) = self.pending.pop_front() else {
                break;
            };
            self.in_flight += 1;
            debug!(job = %job.id, in_flight = self.in_flight, "job admitted");
            executor::spawn(
                job,
                Arc::clone(&self.work_fn),
                self.completion_tx.clone(),
                self.config.worker_timeout,
            );
        }
    }
}
