//! Progress aggregation over completed job reports.
//!
//! The aggregator owns all progress counters on its own thread, fed by an
//! unbounded channel, so a slow output sink can never throttle admission.
//! Reports arrive in completion order, which under concurrent execution is
//! unrelated to submission order.

use std::thread::{self, JoinHandle};

use crossbeam::channel::{unbounded, Sender};
use serde::Serialize;

use super::job::{JobReport, JobStatus};
use crate::utils::format_bytes;

/// Line-based output sink, fire-and-forget
pub type LineSink = Box<dyn Fn(&str) + Send + 'static>;

/// Running batch counters. Mutated only by the aggregator thread, once per
/// report; monotonically non-decreasing.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProgressState {
    pub total: usize,
    pub completed: usize,
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
    pub original_bytes: u64,
    pub transformed_bytes: u64,
}

impl ProgressState {
    /// Aggregate size-reduction percentage, or "N/A" when nothing was
    /// measured (avoids the divide-by-zero on an all-skipped batch).
    pub fn reduction_label(&self) -> String {
        if self.original_bytes == 0 {
            return "N/A".to_string();
        }
        let ratio = self.transformed_bytes as f64 / self.original_bytes as f64;
        format!("{:.1}%", (1.0 - ratio) * 100.0)
    }

    fn absorb(&mut self, report: &JobReport) {
        self.completed += 1;
        match report.status {
            JobStatus::Succeeded => {
                self.succeeded += 1;
                if let Some(metrics) = &report.metrics {
                    self.original_bytes += metrics.original_bytes;
                    self.transformed_bytes += metrics.transformed_bytes;
                }
            }
            JobStatus::Skipped => self.skipped += 1,
            JobStatus::Failed => self.failed += 1,
        }
    }

    fn format_line(&self, report: &JobReport) -> String {
        let prefix = format!("[{}/{}]", self.completed, self.total);
        match report.status {
            JobStatus::Succeeded => {
                let metrics = report.metrics.unwrap_or_default();
                let per_job = if metrics.original_bytes == 0 {
                    "N/A".to_string()
                } else {
                    let ratio = metrics.transformed_bytes as f64 / metrics.original_bytes as f64;
                    format!("{:.1}%", (1.0 - ratio) * 100.0)
                };
                format!(
                    "{prefix} ✔ {} {} -> {} ({per_job} smaller)",
                    report.job_id,
                    format_bytes(metrics.original_bytes),
                    format_bytes(metrics.transformed_bytes),
                )
            }
            JobStatus::Skipped => format!(
                "{prefix} ↷ {} skipped: {}",
                report.job_id,
                report.reason.as_deref().unwrap_or("unspecified"),
            ),
            JobStatus::Failed => format!(
                "{prefix} ✖ {} failed: {}",
                report.job_id,
                report.reason.as_deref().unwrap_or("unspecified"),
            ),
        }
    }

    fn format_summary(&self) -> String {
        format!(
            "{} jobs: {} succeeded, {} skipped, {} failed ({} -> {}, reduction {})",
            self.completed,
            self.succeeded,
            self.skipped,
            self.failed,
            format_bytes(self.original_bytes),
            format_bytes(self.transformed_bytes),
            self.reduction_label(),
        )
    }
}

enum Event {
    Submitted,
    Completed(JobReport),
}

/// Single-owner consumer of completed reports.
pub struct ProgressAggregator {
    events: Sender<Event>,
    handle: JoinHandle<ProgressState>,
}

impl ProgressAggregator {
    /// Start the aggregator thread. It runs until `finish` closes the
    /// event channel, then emits the final summary line.
    pub fn spawn(sink: LineSink) -> Self {
        let (events, rx) = unbounded::<Event>();
        let handle = thread::spawn(move || {
            let mut state = ProgressState::default();
            for event in rx {
                match event {
                    Event::Submitted => state.total += 1,
                    Event::Completed(report) => {
                        state.absorb(&report);
                        sink(&state.format_line(&report));
                    }
                }
            }
            sink(&state.format_summary());
            state
        });
        Self { events, handle }
    }

    pub fn note_submitted(&self) {
        self.events.send(Event::Submitted).ok();
    }

    pub fn deliver(&self, report: JobReport) {
        self.events.send(Event::Completed(report)).ok();
    }

    /// Close the event stream and wait for the final state.
    pub fn finish(self) -> ProgressState {
        drop(self.events);
        self.handle.join().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::job::{JobMetrics, JobReport};
    use std::sync::{Arc, Mutex};

    #[test]
    fn reduction_label_handles_zero_original_bytes() {
        let state = ProgressState::default();
        assert_eq!(state.reduction_label(), "N/A");

        let state = ProgressState {
            original_bytes: 1000,
            transformed_bytes: 600,
            ..Default::default()
        };
        assert_eq!(state.reduction_label(), "40.0%");
    }

    #[test]
    fn negative_reduction_is_reported_as_growth() {
        // Checksum mutation makes files slightly larger.
        let state = ProgressState {
            original_bytes: 1000,
            transformed_bytes: 1010,
            ..Default::default()
        };
        assert_eq!(state.reduction_label(), "-1.0%");
    }

    #[test]
    fn aggregator_counts_each_report_once() {
        let lines: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let captured = Arc::clone(&lines);
        let aggregator = ProgressAggregator::spawn(Box::new(move |line| {
            captured.lock().unwrap().push(line.to_string());
        }));

        aggregator.note_submitted();
        aggregator.note_submitted();
        aggregator.note_submitted();
        aggregator.deliver(JobReport::succeeded(
            "a.jpg",
            JobMetrics { original_bytes: 200, transformed_bytes: 100 },
        ));
        aggregator.deliver(JobReport::skipped("b.jpg", "no significant size reduction"));
        aggregator.deliver(JobReport::failed("c.jpg", "decode failure"));

        let state = aggregator.finish();
        assert_eq!(state.total, 3);
        assert_eq!(state.completed, 3);
        assert_eq!(state.succeeded, 1);
        assert_eq!(state.skipped, 1);
        assert_eq!(state.failed, 1);

        let lines = lines.lock().unwrap();
        assert_eq!(lines.len(), 4, "three progress lines plus the summary");
        assert!(lines[0].contains("[1/3]"));
        assert!(lines[3].contains("1 succeeded, 1 skipped, 1 failed"));
    }
}
