use crate::error::{CheckError, CheckResult};
use std::path::PathBuf;

/// Warning/critical bounds for the full-GC deltas. Both pairs must be set
/// and ordered before evaluation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThresholdSet {
    /// WARNING when the FGCT delta reaches this value (msec)
    pub time_warning: u64,
    /// CRITICAL when the FGCT delta reaches this value (msec)
    pub time_critical: u64,
    /// WARNING when the FGC delta reaches this value
    pub count_warning: u64,
    /// CRITICAL when the FGC delta reaches this value
    pub count_critical: u64,
}

impl Default for ThresholdSet {
    fn default() -> Self {
        Self {
            time_warning: 200,
            time_critical: 1000,
            count_warning: 3,
            count_critical: 10,
        }
    }
}

impl ThresholdSet {
    pub fn validate(&self) -> CheckResult<()> {
        if self.time_warning > self.time_critical {
            return Err(CheckError::Config(format!(
                "time-warning ({}) must be <= time-critical ({})",
                self.time_warning, self.time_critical
            )));
        }
        if self.count_warning > self.count_critical {
            return Err(CheckError::Config(format!(
                "count-warning ({}) must be <= count-critical ({})",
                self.count_warning, self.count_critical
            )));
        }
        Ok(())
    }
}

/// Full configuration for one check invocation, assembled from the
/// command line before any sampling happens.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    /// Substring matched against jps process names. Required, no default.
    pub process_name: String,
    /// Target spacing between the current sample and its baseline (seconds).
    pub interval_secs: u64,
    /// Directory holding the two history slot files.
    pub storage_dir: PathBuf,
    /// Directory containing the jps and jstat binaries.
    pub tool_dir: PathBuf,
    pub thresholds: ThresholdSet,
}

impl CheckConfig {
    pub fn validate(&self) -> CheckResult<()> {
        if self.process_name.is_empty() {
            return Err(CheckError::Config(
                "process name filter must be non-empty".into(),
            ));
        }
        if self.interval_secs == 0 {
            return Err(CheckError::Config(format!(
                "interval must be > 0, got {}",
                self.interval_secs
            )));
        }
        self.thresholds.validate()
    }
}
