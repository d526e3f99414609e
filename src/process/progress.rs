use serde::Serialize;
use std::fmt;

/// Notifications emitted by the pipeline while it runs, in order.
/// `Display` renders the human-readable status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Progress {
    Started { files: usize },
    /// `index` is 1-based.
    Reading { index: usize, total: usize, file: String },
    Combining,
    Combined { rows: usize },
    Filtering { column: String },
    Filtered { removed: usize },
    Pruning,
    Pruned { columns: Vec<String> },
    /// Too few columns to prune; the table is left as it was.
    PruneSkipped { columns: usize, required: usize },
}

impl Progress {
    pub fn is_warning(&self) -> bool {
        matches!(self, Progress::PruneSkipped { .. })
    }
}

impl fmt::Display for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Progress::Started { files } => write!(f, "Starting to combine {} file(s)...", files),
            Progress::Reading { index, total, file } => {
                write!(f, "Reading file {}/{}: {}", index, total, file)
            }
            Progress::Combining => f.write_str("Combining all sheets..."),
            Progress::Combined { rows } => write!(f, "Sheets combined! {} rows in total.", rows),
            Progress::Filtering { column } => write!(f, "Filtering on column '{}'...", column),
            Progress::Filtered { removed } => write!(f, "Filter done! {} rows removed.", removed),
            Progress::Pruning => f.write_str("Removing leading columns..."),
            Progress::Pruned { columns } => write!(f, "Columns removed: {}.", columns.join(", ")),
            Progress::PruneSkipped { columns, required } => write!(
                f,
                "Warning: sheet has {} column(s), fewer than {}; no columns removed.",
                columns, required
            ),
        }
    }
}
