use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PipelineError>;

/// Every way a run can fail. Each variant aborts the run.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// No dialect in the chain produced a table for this file.
    #[error("could not parse {}: {reason}", .path.display())]
    Parse { path: PathBuf, reason: String },

    #[error("no input file produced a table")]
    NoInput,

    /// The email column position is past the end of the combined schema.
    #[error("table has {found} columns; no email column at position {position} (column {})", .position + 1)]
    Schema { position: usize, found: usize },

    #[error("could not read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl PipelineError {
    pub fn parse<E: std::fmt::Display>(path: impl Into<PathBuf>, e: E) -> Self {
        Self::Parse {
            path: path.into(),
            reason: e.to_string(),
        }
    }
}
