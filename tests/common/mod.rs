// Shared test helpers

#![allow(dead_code)]

use check_jvm_gc::models::{GcSnapshot, MetricValue};
use std::collections::BTreeMap;

pub const PID: u32 = 16276;
pub const NOW: f64 = 1800.0;
pub const INTERVAL: u64 = 100;

/// Snapshot with the full gcutil column set, mirroring real
/// `jstat -gcutil -t` output.
pub fn snapshot(pid: u32, timestamp: f64, fgc: f64, fgct: f64) -> GcSnapshot {
    let mut metrics = BTreeMap::new();
    for (name, value) in [
        ("Timestamp", timestamp),
        ("S0", 0.0),
        ("S1", 52.0),
        ("E", 59.0),
        ("O", 90.0),
        ("P", 68.0),
        ("YGC", 655.0),
        ("YGCT", 10.0),
        ("FGC", fgc),
        ("FGCT", fgct),
        ("GCT", 10.0),
    ] {
        metrics.insert(name.to_string(), MetricValue::Number(value));
    }
    GcSnapshot {
        pid,
        timestamp,
        metrics,
    }
}

/// The "current" sample most selector tests compare against.
pub fn current() -> GcSnapshot {
    snapshot(PID, NOW, 10.0, 500.0)
}

/// A history record `age` seconds older than [`NOW`], same pid.
pub fn aged(age: f64) -> GcSnapshot {
    snapshot(PID, NOW - age, 5.0, 300.0)
}
