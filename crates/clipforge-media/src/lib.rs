//! ClipForge Media - FFmpeg integration for probing and export
//!
//! This crate handles:
//! - Source file probing (stream metadata, rotation) via ffprobe
//! - The external media-engine seam used by export jobs
//! - Export job bookkeeping with single-fire completion delivery
//! - A concrete FFmpeg engine driven through the sidecar process

pub mod engine;
pub mod export;
pub mod probe;
pub mod sidecar;

pub use engine::{CompletionHandler, EngineReport, EngineStatus, MediaEngine, RenderRequest};
pub use export::{ContainerFormat, ExportOutcome, ExportRunner, ExportState, ExportTicket};
pub use probe::FfprobeInspector;
pub use sidecar::SidecarEngine;
