use std::path::Path;

use rayon::prelude::*;

use crate::{
    config::model::LayoutConfig,
    foundation::error::{PanelizerError, PanelizerResult},
    process::unit::{UnitOutcome, process_unit_detailed},
    queue::builder::{WorkUnit, build_queue},
};

/// How [`process_batch`] schedules units.
#[derive(Clone, Debug, Default)]
pub struct BatchOptions {
    /// Run units on a worker pool instead of one after another.
    pub parallel: bool,
    /// Worker count; `None` lets rayon decide. Must be >= 1 when set.
    pub threads: Option<usize>,
}

/// Per-unit outcomes of a batch, in queue order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub outcomes: Vec<UnitOutcome>,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchReport {
    fn from_outcomes(outcomes: Vec<UnitOutcome>) -> Self {
        let succeeded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - succeeded;
        Self {
            outcomes,
            succeeded,
            failed,
        }
    }
}

/// Process every unit. Unit failures are recorded in the report, never returned as errors;
/// only an invalid thread count fails the call.
pub fn process_batch(units: &[WorkUnit], opts: &BatchOptions) -> PanelizerResult<BatchReport> {
    if !opts.parallel {
        let outcomes: Vec<UnitOutcome> = units.iter().map(process_unit_detailed).collect();
        return Ok(BatchReport::from_outcomes(outcomes));
    }

    let pool = build_thread_pool(opts.threads)?;
    let outcomes: Vec<UnitOutcome> = pool.install(|| units.par_iter().map(process_unit_detailed).collect());
    Ok(BatchReport::from_outcomes(outcomes))
}

/// Build the queue for `files` and process it.
pub fn run_batch<P: AsRef<Path>>(
    files: &[P],
    config: &LayoutConfig,
    opts: &BatchOptions,
) -> PanelizerResult<BatchReport> {
    config.validate()?;
    let units = build_queue(files, config);
    tracing::info!(files = files.len(), units = units.len(), "queue built");
    let report = process_batch(&units, opts)?;
    tracing::info!(
        succeeded = report.succeeded,
        failed = report.failed,
        "batch finished"
    );
    Ok(report)
}

fn build_thread_pool(threads: Option<usize>) -> PanelizerResult<rayon::ThreadPool> {
    if let Some(n) = threads
        && n == 0
    {
        return Err(PanelizerError::validation(
            "batch 'threads' must be >= 1 when set",
        ));
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if let Some(n) = threads {
        builder = builder.num_threads(n);
    }
    builder
        .build()
        .map_err(|e| PanelizerError::Other(anyhow::anyhow!("failed to build rayon thread pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/process/batch.rs"]
mod tests;
