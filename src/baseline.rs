// Baseline selection: the two-slot rotating cache.
//
// Each invocation loads both slots, classifies the run into one of six
// phases from the age of each slot relative to the configured interval,
// then rewrites the slots so one trends toward ~1 interval old and the
// other toward ~2 intervals old, alternating roles each cycle. Too-early
// runs leave both slots untouched: a burst of rapid invocations must not
// corrupt an in-progress rotation. Stale history triggers a full reset.

use crate::error::{CheckError, CheckResult};
use crate::history_repo::{HistoryRepo, Slot};
use crate::models::GcSnapshot;
use tracing::{debug, warn};

/// Phase of the rotation, classified per invocation. The conditions are
/// mutually exclusive and checked in this order; the boundaries are
/// inclusive at one interval and exclusive at two (`I <= d < 2I` selects
/// a slot as baseline).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No slot1 history: first run, post-restart, or corrupt slot1.
    Initializing,
    /// Slot1 younger than one interval and slot2 unusable: no-op run.
    TooEarlySlot1,
    /// Symmetric no-op with the slot roles swapped.
    TooEarlySlot2,
    /// Slot1 is the ~1-interval-old baseline.
    UseSlot1,
    /// Slot2 is the ~1-interval-old baseline.
    UseSlot2,
    /// No usable candidate and history older than two intervals: reset.
    Stale,
}

/// What one invocation decided: the baseline to compare against (if any)
/// and which slots to overwrite with the current snapshot.
#[derive(Debug, Clone)]
pub struct Selection {
    pub phase: Phase,
    pub baseline: Option<GcSnapshot>,
    pub write_slot1: bool,
    pub write_slot2: bool,
}

/// Pure selection over already-loaded slots; no file I/O.
pub fn select_baseline(
    current: &GcSnapshot,
    slot1: Option<GcSnapshot>,
    slot2: Option<GcSnapshot>,
    interval_secs: u64,
) -> Selection {
    // A slot written by a different pid means the target was restarted;
    // partial history from the dead process must not mix with the new one,
    // so one mismatch discards both slots.
    let (slot1, slot2) = discard_on_restart(current.pid, slot1, slot2);

    let interval = interval_secs as f64;
    let d1 = slot1.as_ref().map(|s| current.timestamp - s.timestamp);
    let d2 = slot2.as_ref().map(|s| current.timestamp - s.timestamp);
    let phase = classify(d1, d2, interval);
    debug!(?d1, ?d2, interval, ?phase, "rotation phase");

    match phase {
        Phase::TooEarlySlot1 | Phase::TooEarlySlot2 => Selection {
            phase,
            baseline: None,
            write_slot1: false,
            write_slot2: false,
        },
        Phase::Initializing | Phase::Stale => Selection {
            phase,
            baseline: None,
            write_slot1: true,
            write_slot2: true,
        },
        Phase::UseSlot1 => {
            // Advance slot2 only once the rotation is consistent (slot1 no
            // older than slot2). A missing slot2 is always rewritten.
            let write_slot2 = match (&slot1, &slot2) {
                (Some(s1), Some(s2)) => s1.timestamp >= s2.timestamp,
                _ => true,
            };
            Selection {
                phase,
                baseline: slot1,
                write_slot1: false,
                write_slot2,
            }
        }
        Phase::UseSlot2 => {
            let write_slot1 = match (&slot1, &slot2) {
                (Some(s1), Some(s2)) => s2.timestamp >= s1.timestamp,
                _ => false,
            };
            Selection {
                phase,
                baseline: slot2,
                write_slot1,
                write_slot2: false,
            }
        }
    }
}

fn classify(d1: Option<f64>, d2: Option<f64>, interval: f64) -> Phase {
    let Some(d1) = d1 else {
        return Phase::Initializing;
    };
    let twice = interval * 2.0;
    // A missing or out-of-window candidate cannot serve as baseline.
    let d1_unusable = interval > d1 || d1 >= twice;
    let d2_unusable = d2.map_or(true, |d| interval > d || d >= twice);

    if interval > d1 && d2_unusable {
        Phase::TooEarlySlot1
    } else if d2.is_some_and(|d| interval > d) && d1_unusable {
        Phase::TooEarlySlot2
    } else if interval <= d1 && d1 < twice {
        Phase::UseSlot1
    } else if d2.is_some_and(|d| interval <= d && d < twice) {
        Phase::UseSlot2
    } else {
        Phase::Stale
    }
}

fn discard_on_restart(
    pid: u32,
    slot1: Option<GcSnapshot>,
    slot2: Option<GcSnapshot>,
) -> (Option<GcSnapshot>, Option<GcSnapshot>) {
    let restarted = slot1.as_ref().is_some_and(|s| s.pid != pid)
        || slot2.as_ref().is_some_and(|s| s.pid != pid);
    if restarted {
        debug!(pid, "target process restarted, discarding history");
        (None, None)
    } else {
        (slot1, slot2)
    }
}

/// Repo-backed selection for one invocation.
pub struct BaselineSelector<'a> {
    repo: &'a HistoryRepo,
    interval_secs: u64,
}

impl<'a> BaselineSelector<'a> {
    pub fn new(repo: &'a HistoryRepo, interval_secs: u64) -> Self {
        Self {
            repo,
            interval_secs,
        }
    }

    /// Load both slots (a corrupt slot counts as absent), pick the baseline,
    /// and persist the rotation. Slot write failures are fatal: a half-done
    /// rotation would silently skew every later comparison.
    pub fn advance(&self, current: &GcSnapshot) -> CheckResult<Option<GcSnapshot>> {
        let slot1 = self.load_tolerant(Slot::One)?;
        let slot2 = self.load_tolerant(Slot::Two)?;
        let selection = select_baseline(current, slot1, slot2, self.interval_secs);
        if selection.write_slot1 {
            self.repo.save(Slot::One, current)?;
        }
        if selection.write_slot2 {
            self.repo.save(Slot::Two, current)?;
        }
        Ok(selection.baseline)
    }

    fn load_tolerant(&self, slot: Slot) -> CheckResult<Option<GcSnapshot>> {
        match self.repo.load(slot) {
            Err(CheckError::CorruptSlot { slot, source }) => {
                warn!(slot, error = %source, "corrupt slot treated as absent");
                Ok(None)
            }
            other => other,
        }
    }
}
