use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Event counters for one input file.
pub struct MetricsRecorder {
    inner: Mutex<Metrics>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub events_read: usize,
    pub events_selected: usize,
}

impl MetricsRecorder {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Metrics::default()),
        }
    }

    pub fn record_event(&self, selected: bool) {
        if let Ok(mut metrics) = self.inner.lock() {
            metrics.events_read += 1;
            if selected {
                metrics.events_selected += 1;
            }
        }
    }

    pub fn snapshot(&self) -> Metrics {
        if let Ok(metrics) = self.inner.lock() {
            *metrics
        } else {
            Metrics::default()
        }
    }
}

impl Default for MetricsRecorder {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of reading one input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileSummary {
    pub path: String,
    pub events_total: usize,
    pub events_selected: usize,
    pub selected_fraction: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FileSummary {
    pub fn new(path: impl Into<String>, metrics: Metrics) -> Self {
        let selected_fraction = if metrics.events_read > 0 {
            metrics.events_selected as f64 / metrics.events_read as f64
        } else {
            0.0
        };
        Self {
            path: path.into(),
            events_total: metrics.events_read,
            events_selected: metrics.events_selected,
            selected_fraction,
            error: None,
        }
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn summary_line(&self) -> String {
        if let Some(error) = &self.error {
            return format!("Failed to read {}: {}", self.path, error);
        }
        format!(
            "Total events = {}, Selected events = {} ({:.2}%)",
            self.events_total,
            self.events_selected,
            self.selected_fraction * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recorder_counts_read_and_selected() {
        let recorder = MetricsRecorder::new();
        recorder.record_event(true);
        recorder.record_event(false);
        recorder.record_event(true);
        let snapshot = recorder.snapshot();
        assert_eq!(snapshot.events_read, 3);
        assert_eq!(snapshot.events_selected, 2);
    }

    #[test]
    fn summary_line_reports_percentage() {
        let summary = FileSummary::new(
            "signal.lhco",
            Metrics {
                events_read: 8,
                events_selected: 1,
            },
        );
        assert_eq!(
            summary.summary_line(),
            "Total events = 8, Selected events = 1 (12.50%)"
        );
    }

    #[test]
    fn empty_file_does_not_divide_by_zero() {
        let summary = FileSummary::new("empty.lhco", Metrics::default());
        assert_eq!(summary.selected_fraction, 0.0);
        assert!(summary.summary_line().ends_with("(0.00%)"));
    }

    #[test]
    fn failed_file_reports_its_error() {
        let summary = FileSummary::new("broken.lhco", Metrics::default())
            .with_error("line 2: expected 11 columns");
        assert_eq!(
            summary.summary_line(),
            "Failed to read broken.lhco: line 2: expected 11 columns"
        );
    }
}
