//! The external media-engine seam.
//!
//! A `MediaEngine` takes a fully built composition and renders it to a
//! file. Engines are asynchronous by contract: `export` returns as soon
//! as the job is accepted, and the completion handler fires exactly once
//! later from whatever thread the engine chooses. A synchronous `Err`
//! means the engine could not start a session at all, and the handler
//! will never fire.

use std::path::PathBuf;

use clipforge_annotate::OverlayStack;
use clipforge_compose::Composition;
use clipforge_core::Result;

use crate::export::ContainerFormat;

/// Everything an engine needs to render one export job.
#[derive(Debug, Clone)]
pub struct RenderRequest {
    pub composition: Composition,
    /// Overlay layers composited over the video, bottom to top.
    pub overlay: Option<OverlayStack>,
    /// Destination file. The extension matches `format`.
    pub output: PathBuf,
    pub format: ContainerFormat,
}

/// Terminal status reported by an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineStatus {
    Completed,
    Failed,
    Cancelled,
    /// Engine finished in a state it could not classify.
    Unknown,
}

/// What the engine reports when a job reaches a terminal state.
#[derive(Debug, Clone)]
pub struct EngineReport {
    pub status: EngineStatus,
    /// Diagnostic accompanying a non-completed status, when available.
    pub error: Option<String>,
}

impl EngineReport {
    pub fn completed() -> Self {
        Self {
            status: EngineStatus::Completed,
            error: None,
        }
    }

    pub fn failed(reason: impl Into<String>) -> Self {
        Self {
            status: EngineStatus::Failed,
            error: Some(reason.into()),
        }
    }
}

/// Fired exactly once when the engine finishes, from any thread.
pub type CompletionHandler = Box<dyn FnOnce(EngineReport) + Send + 'static>;

/// Renders compositions to media files.
///
/// A synchronous `Err` from `export` means no session could be created
/// (`ExportSessionUnavailable`); the handler is dropped unfired in that
/// case. Once `export` returns `Ok`, the engine owns the handler and
/// must eventually invoke it.
pub trait MediaEngine: Send + Sync {
    fn export(&self, request: RenderRequest, on_complete: CompletionHandler) -> Result<()>;
}
