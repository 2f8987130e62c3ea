//! Isolated execution of a single job.
//!
//! Each admitted job gets a supervisor thread and a worker thread. The worker
//! runs the work function under `catch_unwind` and sends its single report
//! over a rendezvous channel; the supervisor waits on that channel with a
//! timeout and forwards exactly one report (real or synthesized) to the
//! pool's completion channel. The slot a job occupies is therefore always
//! released, even when the worker panics, hangs, or never starts.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::Sender;
use tracing::warn;

use super::job::{Job, JobReport};

/// The externally supplied work function, invoked once per job with no
/// shared state beyond the job itself.
pub type WorkFn<P> = Arc<dyn Fn(&Job<P>) -> Result<JobReport> + Send + Sync>;

/// Start the isolated execution unit for one job.
///
/// Never blocks. Exactly one `JobReport` for `job` reaches `completions`,
/// whatever happens to the worker.
pub fn spawn<P: Send + 'static>(
    job: Job<P>,
    work_fn: WorkFn<P>,
    completions: Sender<JobReport>,
    timeout: Duration,
) {
    let job_id = job.id.clone();
    let forward = completions.clone();
    let spawned = thread::Builder::new()
        .name("filepress-supervisor".into())
        .spawn(move || supervise(job, work_fn, completions, timeout));

    if let Err(e) = spawned {
        // Treated as a completion so the in-flight slot is still released.
        forward
            .send(JobReport::failed(job_id, format!("executor failed to start: {e}")))
            .ok();
    }
}

fn supervise<P: Send + 'static>(
    job: Job<P>,
    work_fn: WorkFn<P>,
    completions: Sender<JobReport>,
    timeout: Duration,
) {
    let job_id = job.id.clone();
    let (report_tx, report_rx) = mpsc::sync_channel::<JobReport>(1);

    let worker = thread::Builder::new()
        .name("filepress-worker".into())
        .spawn(move || {
            let report = run_isolated(&job, &work_fn);
            report_tx.send(report).ok();
        });

    let report = match worker {
        Err(e) => JobReport::failed(job_id, format!("worker thread failed to start: {e}")),
        Ok(handle) => match report_rx.recv_timeout(timeout) {
            Ok(report) => {
                handle.join().ok();
                report
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // The worker cannot be killed; it is abandoned and its slot
                // released so the rest of the batch keeps moving.
                warn!(job = %job_id, ?timeout, "worker exceeded timeout, abandoning");
                JobReport::failed(
                    job_id,
                    format!("worker timed out after {}s", timeout.as_secs_f32()),
                )
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                JobReport::failed(job_id, "worker exited without reporting")
            }
        },
    };

    completions.send(report).ok();
}

/// Run the work function, converting errors and panics into failed reports.
fn run_isolated<P>(job: &Job<P>, work_fn: &WorkFn<P>) -> JobReport {
    match panic::catch_unwind(AssertUnwindSafe(|| work_fn(job))) {
        Ok(Ok(report)) => report,
        Ok(Err(e)) => JobReport::failed(job.id.as_str(), e.to_string()),
        Err(payload) => JobReport::failed(job.id.as_str(), panic_message(payload.as_ref())),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("worker panicked: {s}")
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("worker panicked: {s}")
    } else {
        "worker panicked".to_string()
    }
}
