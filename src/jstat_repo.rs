// JVM stat sampling via the JDK's jps and jstat tools

use crate::error::{CheckError, CheckResult};
use crate::models::GcSnapshot;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, warn};

/// Narrow sampling capability, so selection and evaluation are testable
/// without spawning any external tool.
pub trait StatSource {
    /// Snapshot of the unique live JVM matching `filter`, or `None` when
    /// no such process exists.
    fn sample(&self, filter: &str) -> CheckResult<Option<GcSnapshot>>;
}

pub struct JstatRepo {
    tool_dir: PathBuf,
}

impl JstatRepo {
    pub fn new(tool_dir: impl Into<PathBuf>) -> Self {
        Self {
            tool_dir: tool_dir.into(),
        }
    }

    fn find_pid(&self, filter: &str) -> CheckResult<Option<u32>> {
        let output = run_tool(&self.tool_dir.join("jps"), &[])?;
        Ok(match_unique_pid(&output, filter))
    }
}

impl StatSource for JstatRepo {
    fn sample(&self, filter: &str) -> CheckResult<Option<GcSnapshot>> {
        let Some(pid) = self.find_pid(filter)? else {
            return Ok(None);
        };
        let output = run_tool(
            &self.tool_dir.join("jstat"),
            &["-gcutil", "-t", &pid.to_string()],
        )?;
        GcSnapshot::from_gcutil(pid, &output).map(Some)
    }
}

/// Pick the one jps entry whose process name contains `filter`. Zero or
/// multiple matches both mean "no usable process": the check targets a
/// single JVM and must not guess between duplicates.
pub fn match_unique_pid(jps_output: &str, filter: &str) -> Option<u32> {
    let matches: Vec<u32> = jps_output
        .lines()
        .filter_map(|line| {
            let (pid, name) = line.trim().split_once(char::is_whitespace)?;
            let pid = pid.parse().ok()?;
            name.trim().contains(filter).then_some(pid)
        })
        .collect();

    match matches.as_slice() {
        [pid] => Some(*pid),
        [] => {
            debug!(filter, "no jps entry matched");
            None
        }
        many => {
            warn!(filter, count = many.len(), "multiple jps entries matched");
            None
        }
    }
}

fn run_tool(path: &Path, args: &[&str]) -> CheckResult<String> {
    debug!(tool = %path.display(), ?args, "spawning stat tool");
    let output = Command::new(path).args(args).output()?;
    if !output.status.success() {
        return Err(CheckError::StatParse(format!(
            "{} exited with {}",
            path.display(),
            output.status
        )));
    }
    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}
