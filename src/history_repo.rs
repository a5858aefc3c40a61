// Two-slot JSON history. Each slot file holds one whole GcSnapshot record;
// a missing file is the normal first-run state, a corrupt file is reported
// as CorruptSlot and tolerated by the selector.

use crate::error::{CheckError, CheckResult};
use crate::models::GcSnapshot;
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

/// The two rotation slots, with their fixed file names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    One,
    Two,
}

impl Slot {
    pub fn file_name(self) -> &'static str {
        match self {
            Slot::One => "jstat_1.log",
            Slot::Two => "jstat_2.log",
        }
    }
}

pub struct HistoryRepo {
    dir: PathBuf,
}

impl HistoryRepo {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn slot_path(&self, slot: Slot) -> PathBuf {
        self.dir.join(slot.file_name())
    }

    /// Load a slot record. `Ok(None)` when the slot file does not exist.
    pub fn load(&self, slot: Slot) -> CheckResult<Option<GcSnapshot>> {
        let path = self.slot_path(slot);
        let data = match fs::read_to_string(&path) {
            Ok(d) => d,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(slot = slot.file_name(), "slot not found");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&data).map_err(|source| CheckError::CorruptSlot {
            slot: slot.file_name(),
            source,
        })?;
        Ok(Some(snapshot))
    }

    /// Whole-record replace: write a sibling temp file, then rename it over
    /// the slot so no reader observes a partially written record.
    pub fn save(&self, slot: Slot, snapshot: &GcSnapshot) -> CheckResult<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.slot_path(slot);
        let tmp = path.with_extension("tmp");
        let data = serde_json::to_string_pretty(snapshot)?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &path)?;
        debug!(
            slot = slot.file_name(),
            pid = snapshot.pid,
            timestamp = snapshot.timestamp,
            "slot saved"
        );
        Ok(())
    }
}
