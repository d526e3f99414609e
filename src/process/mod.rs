// src/process/mod.rs
use std::path::Path;
use tracing::instrument;

use crate::error::Result;
use crate::settings::Settings;
use crate::table::Table;

pub mod combine;
pub mod filter;
pub mod ingest;
pub mod progress;
pub mod prune;

pub use progress::Progress;

/// Final result of a run as delivered to the completion sink.
#[derive(Debug)]
pub enum Outcome {
    Completed(Table),
    /// Human-readable reason; no partial table is ever delivered.
    Failed(String),
}

impl Outcome {
    pub fn success(&self) -> bool {
        matches!(self, Outcome::Completed(_))
    }

    pub fn into_result(self) -> std::result::Result<Table, String> {
        match self {
            Outcome::Completed(t) => Ok(t),
            Outcome::Failed(msg) => Err(msg),
        }
    }
}

impl From<Result<Table>> for Outcome {
    fn from(r: Result<Table>) -> Self {
        match r {
            Ok(t) => Outcome::Completed(t),
            Err(e) => Outcome::Failed(e.to_string()),
        }
    }
}

/// ingest → combine → filter → prune, strictly in that order.
/// The first error short-circuits the rest.
#[instrument(level = "debug", skip_all, fields(files = paths.len()))]
pub fn run_pipeline<P: AsRef<Path>>(
    paths: &[P],
    settings: &Settings,
    on_progress: &mut dyn FnMut(Progress),
) -> Result<Table> {
    on_progress(Progress::Started { files: paths.len() });
    let tables = ingest::ingest_all(paths, &settings.dialects, on_progress)?;
    let combined = combine::combine(tables, on_progress)?;
    let filtered = filter::filter(combined, settings, on_progress)?;
    Ok(prune::prune(
        filtered,
        &settings.pruned_columns,
        on_progress,
    ))
}

/// Callback-pair form of [`run_pipeline`]: progress goes to `on_progress`,
/// and `on_done` is called exactly once with the outcome.
pub fn process_files<P, F, D>(paths: &[P], settings: &Settings, mut on_progress: F, on_done: D)
where
    P: AsRef<Path>,
    F: FnMut(Progress),
    D: FnOnce(Outcome),
{
    let result = run_pipeline(paths, settings, &mut on_progress);
    on_done(Outcome::from(result));
}
