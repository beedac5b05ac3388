//! Source clips and the media-inspection seam.

use std::path::{Path, PathBuf};

use clipforge_core::{AffineTransform, RationalTime, Result, Size, TimeRange};
use serde::{Deserialize, Serialize};

/// Reference to a source media file, optionally trimmed.
///
/// Immutable once constructed; consumed once per build operation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceClip {
    /// Location of the media.
    pub path: PathBuf,
    /// Sub-range of the source to use. `None` means the full duration.
    pub range: Option<TimeRange>,
}

impl SourceClip {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            range: None,
        }
    }

    /// Restrict the clip to `(start, duration)` of the source.
    pub fn with_range(mut self, start: RationalTime, duration: RationalTime) -> Self {
        self.range = Some(TimeRange::new(start, duration));
        self
    }
}

/// Metadata for one video stream of a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoStreamInfo {
    /// Frame size before any display rotation.
    pub natural_size: Size,
    /// Preferred display transform (carries rotation metadata).
    pub transform: AffineTransform,
    pub duration: RationalTime,
    pub codec: Option<String>,
}

/// Metadata for one audio stream of a source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioStreamInfo {
    pub duration: RationalTime,
    pub sample_rate: u32,
    pub channels: u16,
    pub codec: Option<String>,
}

/// Probed metadata for a source file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceInfo {
    pub duration: RationalTime,
    pub video: Vec<VideoStreamInfo>,
    pub audio: Vec<AudioStreamInfo>,
}

impl SourceInfo {
    pub fn has_video(&self) -> bool {
        !self.video.is_empty()
    }

    pub fn primary_video(&self) -> Option<&VideoStreamInfo> {
        self.video.first()
    }

    pub fn primary_audio(&self) -> Option<&AudioStreamInfo> {
        self.audio.first()
    }

    /// The full source duration as a range starting at zero.
    pub fn full_range(&self) -> TimeRange {
        TimeRange::new(RationalTime::ZERO, self.duration)
    }
}

/// The probing seam between builders and the media engine.
///
/// Builders never touch decoders directly; they ask an inspector for
/// stream metadata and do the rest themselves.
pub trait SourceInspector {
    fn inspect(&self, path: &Path) -> Result<SourceInfo>;
}

impl<T: SourceInspector + ?Sized> SourceInspector for &T {
    fn inspect(&self, path: &Path) -> Result<SourceInfo> {
        (**self).inspect(path)
    }
}
