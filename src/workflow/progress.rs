//! Progress reporting and the worker thread that runs a workflow.
//!
//! The workflow blocks on every git command. Running it on a worker thread
//! keeps the caller responsive; step and phase events come back over an
//! mpsc channel. There is no mid-step cancellation.

use super::Phase;
use super::step::Step;
use crate::error::{GenesisError, Result};
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread::{self, JoinHandle};

/// Something that happened while a workflow ran.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent {
    PhaseStarted(Phase),
    StepStarted(Step),
    StepCompleted(Step),
    StepSkipped { step: Step, reason: String },
    StepFailed { step: Step, detail: String },
    PhaseCompleted(Phase),
    /// Free-form note from work outside the git sequence (file writes,
    /// remote provisioning).
    Note(String),
}

/// Sending half of the progress channel. Silent when not connected.
#[derive(Debug, Clone, Default)]
pub struct Progress {
    tx: Option<Sender<ProgressEvent>>,
}

impl Progress {
    /// A sink that drops every event.
    pub fn silent() -> Self {
        Self::default()
    }

    /// A connected sink and the receiver for its events.
    pub fn channel() -> (Self, Receiver<ProgressEvent>) {
        let (tx, rx) = mpsc::channel();
        (Self { tx: Some(tx) }, rx)
    }

    pub fn emit(&self, event: ProgressEvent) {
        if let Some(tx) = &self.tx {
            // A dropped receiver only means nobody is listening.
            let _ = tx.send(event);
        }
    }

    pub fn note(&self, message: impl Into<String>) {
        self.emit(ProgressEvent::Note(message.into()));
    }
}

/// Handle to a job running on a worker thread.
#[derive(Debug)]
pub struct Worker<T> {
    events: Receiver<ProgressEvent>,
    handle: JoinHandle<Result<T>>,
}

impl<T> Worker<T> {
    /// Events from the job. Iteration ends when the job finishes.
    pub fn events(&self) -> &Receiver<ProgressEvent> {
        &self.events
    }

    /// Wait for the job and take its result.
    pub fn join(self) -> Result<T> {
        self.handle.join().unwrap_or_else(|_| {
            Err(GenesisError::UserError(
                "workflow worker panicked; the project directory may be partially configured"
                    .to_string(),
            ))
        })
    }
}

/// Run `job` on a worker thread, handing it a connected [`Progress`].
pub fn spawn_worker<T, F>(job: F) -> Worker<T>
where
    T: Send + 'static,
    F: FnOnce(Progress) -> Result<T> + Send + 'static,
{
    let (progress, events) = Progress::channel();
    let handle = thread::spawn(move || job(progress));
    Worker { events, handle }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_progress_drops_events() {
        Progress::silent().note("nobody listens");
    }

    #[test]
    fn test_worker_streams_events_then_returns() {
        let worker = spawn_worker(|progress| {
            progress.emit(ProgressEvent::PhaseStarted(Phase::Setup));
            progress.note("writing files");
            Ok(42)
        });

        let events: Vec<ProgressEvent> = worker.events().iter().collect();
        assert_eq!(
            events,
            vec![
                ProgressEvent::PhaseStarted(Phase::Setup),
                ProgressEvent::Note("writing files".to_string()),
            ]
        );
        assert_eq!(worker.join().unwrap(), 42);
    }

    #[test]
    fn test_worker_propagates_errors() {
        let worker: Worker<()> =
            spawn_worker(|_| Err(GenesisError::UserError("bad input".to_string())));
        let err = worker.join().unwrap_err();
        assert_eq!(err.to_string(), "bad input");
    }
}
