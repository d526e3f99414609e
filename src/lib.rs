//! Merge lead spreadsheets exported as delimited text, drop rows whose email
//! belongs to a denylisted domain, drop the leading columns and write one file.

pub mod error;
pub mod output;
pub mod process;
pub mod settings;
pub mod table;
pub mod worker;

pub use error::PipelineError;
pub use process::{process_files, run_pipeline, Outcome, Progress};
pub use settings::Settings;
pub use table::Table;
