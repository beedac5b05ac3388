//! Export job bookkeeping.
//!
//! `ExportRunner` turns a builder output into a render request, hands it
//! to the engine, and wraps the engine callback so that exactly one
//! terminal outcome is ever delivered per submission. State transitions
//! are Pending → Running → Completed | Failed, and terminal states are
//! sticky.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clipforge_compose::BuildOutput;
use clipforge_core::{ClipForgeError, Result};
use crossbeam_channel::{bounded, Receiver};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::{CompletionHandler, EngineStatus, MediaEngine, RenderRequest};

// ── Output container ────────────────────────────────────────────

/// Output container format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContainerFormat {
    Mov,
    Mp4,
}

impl ContainerFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Mov => "mov",
            Self::Mp4 => "mp4",
        }
    }
}

impl Default for ContainerFormat {
    fn default() -> Self {
        Self::Mov
    }
}

// ── Job state ───────────────────────────────────────────────────

/// Lifecycle state of a submitted export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportState {
    Pending,
    Running,
    Completed,
    Failed,
}

impl ExportState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// The single terminal outcome of an export job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    Completed { output: PathBuf },
    Failed { reason: String },
}

// ── Runner ──────────────────────────────────────────────────────

/// Submits builder outputs to a media engine as export jobs.
pub struct ExportRunner<E> {
    engine: E,
}

impl<E: MediaEngine> ExportRunner<E> {
    pub fn new(engine: E) -> Self {
        Self { engine }
    }

    /// Submit `build` for export into `out_dir`.
    ///
    /// The output file is named `<job-id>.<ext>`. Fails synchronously
    /// when the composition is empty or invalid, or when the engine
    /// cannot create a session; in that case no outcome is delivered.
    /// Otherwise exactly one [`ExportOutcome`] reaches the ticket, and
    /// any unclassified engine status maps to `Failed`.
    pub fn submit(
        &self,
        build: BuildOutput,
        out_dir: &Path,
        format: ContainerFormat,
    ) -> Result<ExportTicket> {
        build.composition.validate()?;
        if build.composition.duration().is_zero() {
            return Err(ClipForgeError::ExportFailed(
                "composition has zero duration".into(),
            ));
        }

        let job_id = Uuid::new_v4();
        let output = out_dir.join(format!("{}.{}", job_id, format.extension()));
        let state = Arc::new(Mutex::new(ExportState::Pending));
        let (sender, receiver) = bounded::<ExportOutcome>(1);

        let handler_state = Arc::clone(&state);
        let handler_output = output.clone();
        let handler: CompletionHandler = Box::new(move |report| {
            let (terminal, outcome) = match report.status {
                EngineStatus::Completed => (
                    ExportState::Completed,
                    ExportOutcome::Completed {
                        output: handler_output,
                    },
                ),
                EngineStatus::Failed => (
                    ExportState::Failed,
                    ExportOutcome::Failed {
                        reason: report
                            .error
                            .unwrap_or_else(|| "engine reported failure".into()),
                    },
                ),
                EngineStatus::Cancelled => (
                    ExportState::Failed,
                    ExportOutcome::Failed {
                        reason: report.error.unwrap_or_else(|| "export cancelled".into()),
                    },
                ),
                EngineStatus::Unknown => (
                    ExportState::Failed,
                    ExportOutcome::Failed {
                        reason: report
                            .error
                            .unwrap_or_else(|| "engine finished in unknown state".into()),
                    },
                ),
            };

            *handler_state.lock() = terminal;
            // Channel capacity is one and this closure fires once, so
            // the send only fails when the ticket was dropped.
            let _ = sender.send(outcome);
        });

        let request = RenderRequest {
            composition: build.composition,
            overlay: build.overlay,
            output: output.clone(),
            format,
        };

        tracing::info!(job_id = %job_id, output = %output.display(), "submitting export");
        *state.lock() = ExportState::Running;
        if let Err(err) = self.engine.export(request, handler) {
            let mut current = state.lock();
            if !current.is_terminal() {
                *current = ExportState::Failed;
            }
            return Err(err);
        }

        Ok(ExportTicket {
            job_id,
            output,
            state,
            receiver,
        })
    }
}

// ── Ticket ──────────────────────────────────────────────────────

/// Handle to a submitted export job.
#[derive(Debug)]
pub struct ExportTicket {
    pub job_id: Uuid,
    /// Destination the job renders into.
    pub output: PathBuf,
    state: Arc<Mutex<ExportState>>,
    receiver: Receiver<ExportOutcome>,
}

impl ExportTicket {
    /// Current state without blocking.
    pub fn state(&self) -> ExportState {
        *self.state.lock()
    }

    /// Outcome if the job already finished, without blocking.
    pub fn try_outcome(&self) -> Option<ExportOutcome> {
        self.receiver.try_recv().ok()
    }

    /// Block until the job reaches a terminal state.
    pub fn wait(self) -> ExportOutcome {
        match self.receiver.recv() {
            Ok(outcome) => outcome,
            // The engine dropped the handler without firing it.
            Err(_) => {
                let mut current = self.state.lock();
                if !current.is_terminal() {
                    *current = ExportState::Failed;
                }
                ExportOutcome::Failed {
                    reason: "engine dropped the completion handler".into(),
                }
            }
        }
    }
}
