// src/worker.rs
use std::path::PathBuf;
use tokio::{
    sync::mpsc::{self, UnboundedReceiver},
    task::JoinHandle,
};
use tracing::error;

use crate::process::{process_files, Outcome, Progress};
use crate::settings::Settings;

/// A pipeline run executing on tokio's blocking pool.
/// Progress arrives on an unbounded channel so the worker never waits on the consumer;
/// the channel closes once the run has finished.
pub struct PipelineHandle {
    progress: UnboundedReceiver<Progress>,
    task: JoinHandle<Outcome>,
}

/// Start a run off the calling task. Must be called inside a tokio runtime.
/// One run per handle; callers must not start overlapping runs on the same inputs.
pub fn spawn_pipeline(paths: Vec<PathBuf>, settings: Settings) -> PipelineHandle {
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::task::spawn_blocking(move || {
        let mut outcome = Outcome::Failed("pipeline finished without reporting".into());
        process_files(
            &paths,
            &settings,
            |p| {
                // receiver gone means nobody is listening; keep going
                let _ = tx.send(p);
            },
            |o| outcome = o,
        );
        outcome
    });
    PipelineHandle { progress: rx, task }
}

impl PipelineHandle {
    /// Next notification, or `None` once the run is over.
    pub async fn recv(&mut self) -> Option<Progress> {
        self.progress.recv().await
    }

    /// Wait for the run to end.
    pub async fn finish(self) -> Outcome {
        match self.task.await {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("pipeline worker failed: {}", e);
                Outcome::Failed(format!("pipeline worker failed: {}", e))
            }
        }
    }
}
