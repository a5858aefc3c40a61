// Verdict evaluation: full-GC counter deltas against configured thresholds.

use crate::config::ThresholdSet;
use crate::models::{GcSnapshot, FIELD_FULL_GC_COUNT, FIELD_FULL_GC_TIME};
use std::fmt;
use tracing::debug;

/// Monitoring-plugin status, mapped to the conventional exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Status {
    pub fn exit_code(self) -> i32 {
        match self {
            Status::Ok => 0,
            Status::Warning => 1,
            Status::Critical => 2,
            Status::Unknown => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::Warning => "WARNING",
            Status::Critical => "CRITICAL",
            Status::Unknown => "UNKNOWN",
        }
    }
}

/// Final verdict: status plus the message for the single plugin output line.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub status: Status,
    pub message: String,
}

impl Verdict {
    pub fn new(status: Status, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status.as_str(), self.message)
    }
}

/// First-match-wins evaluation: critical time, warning time, critical count,
/// warning count, OK. Time breaches take priority over count breaches.
pub fn evaluate(
    current: Option<&GcSnapshot>,
    baseline: Option<&GcSnapshot>,
    thresholds: &ThresholdSet,
) -> Verdict {
    let Some(current) = current else {
        return Verdict::new(Status::Unknown, "unable to obtain statistics.");
    };
    let Some(baseline) = baseline else {
        // Normal first-window state, not a degraded one.
        return Verdict::new(Status::Ok, "now collecting data.");
    };

    let Some(time_delta) = counter_delta(current, baseline, FIELD_FULL_GC_TIME) else {
        return missing_counter(FIELD_FULL_GC_TIME);
    };
    let Some(count_delta) = counter_delta(current, baseline, FIELD_FULL_GC_COUNT) else {
        return missing_counter(FIELD_FULL_GC_COUNT);
    };
    debug!(time_delta, count_delta, "GC deltas");

    if thresholds.time_critical as f64 <= time_delta {
        return Verdict::new(
            Status::Critical,
            format!("GC time is too long. ({} msec)", time_delta as i64),
        );
    }
    if thresholds.time_warning as f64 <= time_delta {
        return Verdict::new(
            Status::Warning,
            format!("GC time is too long. ({} msec)", time_delta as i64),
        );
    }
    if thresholds.count_critical as f64 <= count_delta {
        return Verdict::new(
            Status::Critical,
            format!("GC count is too high. ({} times)", count_delta as i64),
        );
    }
    if thresholds.count_warning as f64 <= count_delta {
        return Verdict::new(
            Status::Warning,
            format!("GC count is too high. ({} times)", count_delta as i64),
        );
    }

    Verdict::new(
        Status::Ok,
        format!(
            "GC time is {:.3} msec, GC count is {}.",
            time_delta, count_delta as i64
        ),
    )
}

fn counter_delta(current: &GcSnapshot, baseline: &GcSnapshot, field: &str) -> Option<f64> {
    Some(current.metric(field)? - baseline.metric(field)?)
}

fn missing_counter(field: &str) -> Verdict {
    Verdict::new(
        Status::Unknown,
        format!("snapshot is missing the {} counter.", field),
    )
}
