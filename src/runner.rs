// One check invocation: validate config, sample, select baseline, evaluate.

use crate::baseline::BaselineSelector;
use crate::config::CheckConfig;
use crate::error::CheckResult;
use crate::evaluator::{self, Status, Verdict};
use crate::history_repo::HistoryRepo;
use crate::jstat_repo::StatSource;
use tracing::error;

/// Run the whole check. Every failure path collapses to an UNKNOWN verdict;
/// the caller only prints the line and exits with the mapped code.
pub fn run(config: &CheckConfig, source: &dyn StatSource) -> Verdict {
    match try_run(config, source) {
        Ok(v) => v,
        Err(e) => {
            error!(error = %e, "check aborted");
            Verdict::new(Status::Unknown, e.to_string())
        }
    }
}

fn try_run(config: &CheckConfig, source: &dyn StatSource) -> CheckResult<Verdict> {
    config.validate()?;

    let Some(current) = source.sample(&config.process_name)? else {
        return Ok(evaluator::evaluate(None, None, &config.thresholds));
    };

    let repo = HistoryRepo::new(&config.storage_dir);
    let selector = BaselineSelector::new(&repo, config.interval_secs);
    let baseline = selector.advance(&current)?;
    Ok(evaluator::evaluate(
        Some(&current),
        baseline.as_ref(),
        &config.thresholds,
    ))
}
