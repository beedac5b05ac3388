//! Shared mocks for cross-crate tests: a canned source inspector and a
//! scriptable media engine.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Once};

use clipforge_compose::{
    AudioStreamInfo, SourceInfo, SourceInspector, VideoStreamInfo,
};
use clipforge_core::{
    AffineTransform, ClipForgeError, RationalTime, Result, Size,
};
use clipforge_media::{
    CompletionHandler, EngineReport, EngineStatus, MediaEngine, RenderRequest,
};
use parking_lot::Mutex;

static INIT: Once = Once::new();

/// Install a tracing subscriber once so degradation warnings show up
/// under `RUST_LOG`.
pub fn init_tracing() {
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

// ── Inspector ───────────────────────────────────────────────────

#[derive(Default)]
pub struct MockInspector {
    sources: HashMap<PathBuf, SourceInfo>,
}

impl MockInspector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, path: impl Into<PathBuf>, info: SourceInfo) -> Self {
        self.sources.insert(path.into(), info);
        self
    }
}

impl SourceInspector for MockInspector {
    fn inspect(&self, path: &Path) -> Result<SourceInfo> {
        self.sources
            .get(path)
            .cloned()
            .ok_or_else(|| ClipForgeError::SourceCorrupt(path.display().to_string()))
    }
}

pub fn landscape(secs: i64) -> SourceInfo {
    SourceInfo {
        duration: RationalTime::from_secs(secs),
        video: vec![VideoStreamInfo {
            natural_size: Size::new(1280.0, 720.0),
            transform: AffineTransform::IDENTITY,
            duration: RationalTime::from_secs(secs),
            codec: Some("h264".into()),
        }],
        audio: vec![AudioStreamInfo {
            duration: RationalTime::from_secs(secs),
            sample_rate: 48_000,
            channels: 2,
            codec: Some("aac".into()),
        }],
    }
}

pub fn portrait(secs: i64) -> SourceInfo {
    SourceInfo {
        duration: RationalTime::from_secs(secs),
        video: vec![VideoStreamInfo {
            natural_size: Size::new(1920.0, 1080.0),
            transform: AffineTransform::ROTATE_90.then_translate(1080.0, 0.0),
            duration: RationalTime::from_secs(secs),
            codec: Some("h264".into()),
        }],
        audio: Vec::new(),
    }
}

pub fn audio_only(secs: i64) -> SourceInfo {
    SourceInfo {
        duration: RationalTime::from_secs(secs),
        video: Vec::new(),
        audio: vec![AudioStreamInfo {
            duration: RationalTime::from_secs(secs),
            sample_rate: 48_000,
            channels: 2,
            codec: Some("aac".into()),
        }],
    }
}

// ── Engine ──────────────────────────────────────────────────────

/// Engine that records the request it was given and reports a fixed
/// status through the completion handler.
pub struct MockEngine {
    status: EngineStatus,
    error: Option<String>,
    pub last_request: Arc<Mutex<Option<RenderRequest>>>,
}

impl MockEngine {
    pub fn completing() -> Self {
        Self {
            status: EngineStatus::Completed,
            error: None,
            last_request: Arc::new(Mutex::new(None)),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            status: EngineStatus::Failed,
            error: Some(reason.to_string()),
            last_request: Arc::new(Mutex::new(None)),
        }
    }
}

impl MediaEngine for MockEngine {
    fn export(&self, request: RenderRequest, on_complete: CompletionHandler) -> Result<()> {
        *self.last_request.lock() = Some(request);
        on_complete(EngineReport {
            status: self.status,
            error: self.error.clone(),
        });
        Ok(())
    }
}
