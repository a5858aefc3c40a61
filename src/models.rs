// Domain models: one sampled gcutil counter snapshot

use crate::error::{CheckError, CheckResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// gcutil columns the check depends on. Everything else is carried verbatim.
pub const FIELD_TIMESTAMP: &str = "Timestamp";
pub const FIELD_FULL_GC_COUNT: &str = "FGC";
pub const FIELD_FULL_GC_TIME: &str = "FGCT";

/// One parsed gcutil cell: numeric when the token parses as a float,
/// verbatim text otherwise (jstat prints `-` for unavailable counters).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MetricValue {
    Number(f64),
    Text(String),
}

impl MetricValue {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            MetricValue::Number(n) => Some(*n),
            MetricValue::Text(_) => None,
        }
    }

    fn coerce(token: &str) -> Self {
        match token.parse::<f64>() {
            Ok(n) => MetricValue::Number(n),
            Err(_) => MetricValue::Text(token.to_string()),
        }
    }
}

/// Immutable snapshot of a JVM's cumulative GC counters, either freshly
/// sampled or restored from a history slot. For a fixed `pid`, `timestamp`
/// and the full-GC counters are non-decreasing across samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GcSnapshot {
    pub pid: u32,
    /// JVM uptime in seconds, from the `jstat -t` Timestamp column.
    pub timestamp: f64,
    pub metrics: BTreeMap<String, MetricValue>,
}

impl GcSnapshot {
    /// Parse `jstat -gcutil -t <pid>` output: a fixed-width header line
    /// followed by one value line, columns matched by position.
    pub fn from_gcutil(pid: u32, output: &str) -> CheckResult<Self> {
        let mut lines = output.lines();
        let header = lines
            .next()
            .ok_or_else(|| CheckError::StatParse("empty jstat output".into()))?;
        let row = lines
            .next()
            .ok_or_else(|| CheckError::StatParse("jstat output has no value row".into()))?;

        let names: Vec<&str> = header.split_whitespace().collect();
        let tokens: Vec<&str> = row.split_whitespace().collect();
        if names.len() != tokens.len() {
            return Err(CheckError::StatParse(format!(
                "jstat column mismatch: {} header fields, {} values",
                names.len(),
                tokens.len()
            )));
        }

        let mut metrics = BTreeMap::new();
        for (name, token) in names.iter().zip(&tokens) {
            metrics.insert((*name).to_string(), MetricValue::coerce(token));
        }

        let timestamp = metrics
            .get(FIELD_TIMESTAMP)
            .and_then(MetricValue::as_number)
            .ok_or_else(|| {
                CheckError::StatParse("missing numeric Timestamp column (jstat -t)".into())
            })?;

        Ok(Self {
            pid,
            timestamp,
            metrics,
        })
    }

    /// Numeric metric by column name, if present and numeric.
    pub fn metric(&self, name: &str) -> Option<f64> {
        self.metrics.get(name).and_then(MetricValue::as_number)
    }

    /// Cumulative full-GC time (FGCT), in jstat's time unit.
    pub fn full_gc_time(&self) -> Option<f64> {
        self.metric(FIELD_FULL_GC_TIME)
    }

    /// Cumulative full-GC count (FGC).
    pub fn full_gc_count(&self) -> Option<f64> {
        self.metric(FIELD_FULL_GC_COUNT)
    }
}
