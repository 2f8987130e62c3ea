//! Job and report records exchanged between the pool and its workers.

use serde::Serialize;

/// One unit of work submitted to the pool.
///
/// Immutable once submitted; consumed exactly once by exactly one worker.
#[derive(Debug, Clone, Serialize)]
pub struct Job<P> {
    /// Opaque identifier, typically the target file path
    pub id: String,
    /// Input handed to the work function
    pub payload: P,
}

impl<P> Job<P> {
    pub fn new(id: impl Into<String>, payload: P) -> Self {
        Self { id: id.into(), payload }
    }
}

/// Outcome class of one completed job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum JobStatus {
    /// The transform ran and the file was rewritten
    Succeeded,
    /// Policy refused the transform (e.g. no significant size reduction)
    Skipped,
    /// The work function errored, panicked, hung, or never started
    Failed,
}

/// Byte counts measured by a successful transform.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct JobMetrics {
    pub original_bytes: u64,
    pub transformed_bytes: u64,
}

/// The structured outcome of one job. Exactly one report exists per
/// submitted job, whatever happened to its worker.
///
/// Constructors enforce the shape: `Succeeded` always carries metrics,
/// `Skipped` and `Failed` always carry a non-empty reason.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub job_id: String,
    pub status: JobStatus,
    pub metrics: Option<JobMetrics>,
    pub reason: Option<String>,
}

impl JobReport {
    pub fn succeeded(job_id: impl Into<String>, metrics: JobMetrics) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Succeeded,
            metrics: Some(metrics),
            reason: None,
        }
    }

    pub fn skipped(job_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Skipped,
            metrics: None,
            reason: Some(non_empty(reason.into())),
        }
    }

    pub fn failed(job_id: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            status: JobStatus::Failed,
            metrics: None,
            reason: Some(non_empty(reason.into())),
        }
    }

    pub fn success(&self) -> bool {
        self.status == JobStatus::Succeeded
    }
}

fn non_empty(reason: String) -> String {
    if reason.trim().is_empty() {
        "unspecified".to_string()
    } else {
        reason
    }
}
